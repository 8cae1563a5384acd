//! Application state
//!
//! Process-scoped adapters shared by every handler.

use std::sync::Arc;

use adextract_core::{AdsSource, CommerceSource};

#[derive(Clone)]
pub struct AppState {
    pub commerce: Arc<dyn CommerceSource>,
    pub ads: Arc<dyn AdsSource>,
}

impl AppState {
    pub fn new(commerce: Arc<dyn CommerceSource>, ads: Arc<dyn AdsSource>) -> Self {
        Self { commerce, ads }
    }
}
