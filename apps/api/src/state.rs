use std::sync::Arc;

use crate::drafts::DraftStore;
use crate::generation::generator::ResumeGenerator;
use crate::profiles::store::ProfileStore;
use crate::render::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable profile persistence. Default: PgProfileStore.
    pub profiles: Arc<dyn ProfileStore>,
    pub generator: ResumeGenerator,
    pub drafts: DraftStore,
    pub pdf: PdfRenderer,
}
