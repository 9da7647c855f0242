//! Interview capabilities: schemas, prompt rendering, flows and the action gateway.

#[cfg(test)]
pub mod fixtures;
pub mod flows;
pub mod gateway;
pub mod handlers;
pub mod prompts;
pub mod render;
pub mod resume;
pub mod schema;
pub mod summarize;
pub mod validation;
