use std::sync::Arc;

use crate::{config::Config, services::SessionLedger};

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<SessionLedger>,
    pub config: Config,
}

impl AppState {
    pub fn new(ledger: Arc<SessionLedger>, config: Config) -> Self {
        Self { ledger, config }
    }
}
