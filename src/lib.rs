//! Validate GA4 measurement ids and describe the gtag script tags a host
//! page needs to load them. The crate never talks to the analytics backend:
//! it produces [`ScriptDirective`]s and leaves fetching, scheduling, and
//! teardown to the host's script-loading subsystem.
#![forbid(unsafe_code)]

pub mod error;
pub mod inject;
pub mod json_output;
pub mod loader;
pub mod model;
pub mod snippet;
pub mod util;

pub use error::{Result, TagError};
pub use loader::{Activation, AnalyticsLoader};
pub use model::{LoadStrategy, ScriptDirective, ScriptSource, TrackingId};

/// Render the loader + bootstrap directive pair for a validated id.
pub fn gtag_directives(gid: &TrackingId) -> Result<Vec<ScriptDirective>> {
    snippet::SnippetRenderer::new().gtag_directives(gid)
}
