use std::sync::Arc;

use crate::config::Config;
use crate::contacts::intake::ContactIntake;
use crate::contacts::store::ContactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read/update/delete go straight to the store; creation goes through `intake`.
    pub store: Arc<dyn ContactStore>,
    pub intake: ContactIntake,
    pub config: Config,
}
