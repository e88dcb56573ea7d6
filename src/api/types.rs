//! Shared context for the API router.

use std::sync::Arc;

use crate::core_state::CoreState;
use crate::pipeline::ScanPipeline;

/// State handed to every handler: the ledger state plus the scan pipeline.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub pipeline: Arc<ScanPipeline>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>, pipeline: Arc<ScanPipeline>) -> Self {
        Self { core, pipeline }
    }
}
