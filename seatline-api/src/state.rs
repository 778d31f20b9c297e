use std::sync::Arc;
use std::time::Duration;

use seatline_core::{CallContext, TokenIssuer};
use seatline_order::AllocationEngine;
use seatline_store::Config;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AllocationEngine>,
    pub tokens: Arc<TokenIssuer>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(engine: AllocationEngine, tokens: TokenIssuer, request_timeout: Duration) -> Self {
        Self {
            engine: Arc::new(engine),
            tokens: Arc::new(tokens),
            request_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, seatline_store::ConfigError> {
        let table = config.route_table()?;
        Ok(Self::new(
            AllocationEngine::new(table),
            config.token_issuer(),
            config.request_timeout(),
        ))
    }

    /// Context for one engine call, bounded by the request timeout.
    pub fn call_context(&self) -> CallContext {
        CallContext::with_timeout(self.request_timeout)
    }
}
