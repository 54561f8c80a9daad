use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use url::Url;

use crate::{
    error::{Result, TagError},
    util::is_valid_tracking_id,
};

/// A validated GA4 measurement id: `G-` followed by one or more characters
/// from A–Z / 0–9. Construction goes through [`TrackingId::parse`], so a
/// held value always satisfies the format invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    pub fn parse(gid: &str) -> Result<Self> {
        if !is_valid_tracking_id(gid) {
            return Err(TagError::InvalidTrackingId {
                gid: gid.to_string(),
            });
        }
        Ok(Self(gid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TrackingId {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self> {
        TrackingId::parse(s)
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When the host fetches and executes a script relative to page lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    /// Fetch and execute in document order.
    Eager,
    /// Postpone fetch and execution until after the page's `load` event.
    #[default]
    LazyOnload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptSource {
    External { src: Url },
    Inline { body: String },
}

/// A declarative instruction describing one script resource and its load
/// timing, handed to the host page for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDirective {
    /// Element id the host should assign to the script element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub strategy: LoadStrategy,
    pub source: ScriptSource,
    /// Extra HTML attributes, rendered in insertion order. An empty value
    /// renders as a bare boolean attribute.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,
}

impl ScriptDirective {
    pub fn external(src: Url) -> Self {
        Self {
            id: None,
            strategy: LoadStrategy::default(),
            source: ScriptSource::External { src },
            attrs: IndexMap::new(),
        }
    }

    pub fn inline(body: impl Into<String>) -> Self {
        Self {
            id: None,
            strategy: LoadStrategy::default(),
            source: ScriptSource::Inline { body: body.into() },
            attrs: IndexMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_strategy(mut self, strategy: LoadStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}
