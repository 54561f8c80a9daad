use handlebars::Handlebars;
use serde_json::json;
use url::Url;

use crate::{
    error::{Result, TagError},
    model::{ScriptDirective, TrackingId},
};

pub const GTAG_LOADER_BASE: &str = "https://www.googletagmanager.com/gtag/js";
/// Element id of the inline bootstrap script, so hosts can find it again.
pub const INLINE_SCRIPT_ID: &str = "google-analytics";

const BOOTSTRAP_TEMPLATE: &str = include_str!("../templates/gtag_bootstrap.js.hbs");
const BOOTSTRAP_TEMPLATE_NAME: &str = "gtag_bootstrap.js.hbs";

lazy_static::lazy_static! {
    static ref LOADER_BASE_URL: Url = Url::parse(GTAG_LOADER_BASE).unwrap();
}

/// URL of the remote gtag.js loader, parameterized by the measurement id.
pub fn loader_url(gid: &TrackingId) -> Url {
    let mut url = LOADER_BASE_URL.clone();
    url.query_pairs_mut().append_pair("id", gid.as_str());
    url
}

pub struct SnippetRenderer {
    handlebars: Handlebars<'static>,
}

impl SnippetRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Snippets are JavaScript, not HTML; entity escaping would corrupt them.
        handlebars.register_escape_fn(|s| s.to_string());
        Self { handlebars }
    }

    /// Render the inline bootstrap body: seed `window.dataLayer`, define the
    /// `gtag` dispatch function, then issue the `js` timestamp call and the
    /// `config` call carrying the measurement id and current page path.
    pub fn render_bootstrap(&self, gid: &TrackingId) -> Result<String> {
        let ctx = json!({ "gid": gid.as_str() });
        self.handlebars
            .render_template(BOOTSTRAP_TEMPLATE, &ctx)
            .map_err(|e| TagError::Template {
                template: BOOTSTRAP_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })
    }

    /// The ordered directive pair for a validated id: the remote loader tag,
    /// then the inline bootstrap. Both load lazily, after the page `load`
    /// event.
    pub fn gtag_directives(&self, gid: &TrackingId) -> Result<Vec<ScriptDirective>> {
        let loader = ScriptDirective::external(loader_url(gid)).with_attr("async", "");
        let bootstrap = ScriptDirective::inline(self.render_bootstrap(gid)?).with_id(INLINE_SCRIPT_ID);
        Ok(vec![loader, bootstrap])
    }
}

impl Default for SnippetRenderer {
    fn default() -> Self {
        Self::new()
    }
}
