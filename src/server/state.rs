use crate::core::status::Prober;
use std::sync::Arc;

/// Process-wide, read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    prober: Arc<dyn Prober>,
}

impl AppState {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self { prober }
    }

    pub fn prober(&self) -> &dyn Prober {
        self.prober.as_ref()
    }
}
