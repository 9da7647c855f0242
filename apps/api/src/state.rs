use std::sync::Arc;

use crate::interview::gateway::ActionGateway;
use crate::session::aggregator::SessionAggregator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ActionGateway>,
    pub aggregator: Arc<SessionAggregator>,
}

impl AppState {
    pub fn new(gateway: ActionGateway) -> Self {
        let gateway = Arc::new(gateway);
        Self {
            aggregator: Arc::new(SessionAggregator::new(gateway.clone())),
            gateway,
        }
    }
}
