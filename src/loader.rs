use tracing::error;

use crate::{
    error::Result,
    model::{ScriptDirective, TrackingId},
    snippet::SnippetRenderer,
};

/// Outcome of one activation.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// The identifier did not change since the previous activation; nothing
    /// was re-validated and no diagnostic was re-logged.
    Unchanged,
    /// The identifier validated; the directives to register with the host,
    /// in order.
    Loaded(Vec<ScriptDirective>),
    /// The identifier failed validation. The diagnostic was logged; no
    /// directives are produced.
    Rejected,
}

/// The analytics component: given a tracking identifier, validate it and
/// describe the two script loads the host page must perform.
///
/// Validation re-runs only when the identifier changes, so repeated
/// activations with the same value are idempotent. An invalid identifier is
/// contained: reported through the logging channel, never surfaced as an
/// error, and the host simply ends up without analytics.
pub struct AnalyticsLoader {
    renderer: SnippetRenderer,
    last_seen: Option<String>,
}

impl AnalyticsLoader {
    pub fn new() -> Self {
        Self {
            renderer: SnippetRenderer::new(),
            last_seen: None,
        }
    }

    /// Activate (or re-activate) with `gid`.
    ///
    /// `Err` is reserved for internal template faults; a malformed `gid` is
    /// not an error from the caller's point of view.
    pub fn activate(&mut self, gid: &str) -> Result<Activation> {
        if self.last_seen.as_deref() == Some(gid) {
            return Ok(Activation::Unchanged);
        }
        self.last_seen = Some(gid.to_string());
        match TrackingId::parse(gid) {
            Ok(id) => Ok(Activation::Loaded(self.renderer.gtag_directives(&id)?)),
            Err(err) => {
                error!(gid, "{err}");
                Ok(Activation::Rejected)
            }
        }
    }

    /// The identifier the last activation ran against, if any.
    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }
}

impl Default for AnalyticsLoader {
    fn default() -> Self {
        Self::new()
    }
}
