use std::sync::Arc;

use crate::convert::DocumentConverter;
use crate::resume::builder::GroupLimits;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every render builds its own record.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable DOCX → PDF backend. Default: `CommandConverter` running LibreOffice.
    pub converter: Arc<dyn DocumentConverter>,
    pub group_limits: GroupLimits,
}
