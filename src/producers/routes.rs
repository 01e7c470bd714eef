//! Frozen URL route listings.
//!
//! A route manifest is a TOML tree of route patterns. Leaves name a handler;
//! includes nest further routes under a URL prefix and an optional namespace:
//!
//! ```toml
//! include_handlers = ["shop."]
//! exclude_urls = ["/_admin*", "/test*"]
//!
//! [[routes]]
//! pattern = "/"
//! name = "home"
//! handler = "shop.views.home"
//!
//! [[routes]]
//! pattern = "/api/"
//! namespace = "api"
//!
//!   [[routes.routes]]
//!   pattern = "orders/<int:id>/"
//!   name = "order-detail"
//!   handler = "shop.api.OrderDetail"
//! ```
//!
//! Each kept route renders as `<url>\t<name>\t<handler>`, sorted by URL.

use crate::error::{CheckError, Result};
use crate::lines::Lines;
use crate::output;
use crate::runner::ContentProducer;
use glob::Pattern;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};

/// Top level of a route manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteManifest {
    /// Handler prefixes to keep. Empty keeps every handler.
    #[serde(default)]
    pub include_handlers: Vec<String>,
    /// URL globs to drop, checked before `include_handlers`.
    #[serde(default)]
    pub exclude_urls: Vec<String>,
    /// Top-level route entries.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// A leaf route (`handler` set) or an include (`routes` set), never both.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    /// URL fragment, appended to the enclosing include's prefix.
    pub pattern: String,
    /// Route name; on an include it is ignored.
    #[serde(default)]
    pub name: Option<String>,
    /// Dotted path of the view serving a leaf route.
    #[serde(default)]
    pub handler: Option<String>,
    /// Namespace prepended to the names of nested routes.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Nested entries of an include.
    #[serde(default)]
    pub routes: Option<Vec<RouteEntry>>,
}

/// A flattened route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Full URL, always starting with `/`.
    pub url: String,
    /// Fully qualified name (`outer:inner:name`), if the route has one.
    pub name: Option<String>,
    /// Handler that serves the URL.
    pub handler: String,
}

impl Route {
    /// `<url>\t<name>\t<handler>`, with an empty name column for unnamed routes.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.url,
            self.name.as_deref().unwrap_or(""),
            self.handler
        )
    }
}

impl RouteManifest {
    /// Read a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] if the file is missing or is not a
    /// valid manifest.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CheckError::Configuration(format!(
                "Unable to read route manifest '{}': {e}",
                path.display()
            ))
        })?;
        Self::parse(&content).map_err(|e| match e {
            CheckError::Configuration(msg) => {
                CheckError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse manifest TOML.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] for invalid TOML or schema.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CheckError::Configuration(format!("Invalid route manifest: {e}")))
    }

    /// Flatten the tree, apply the filters and sort by URL.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] for an invalid glob or a malformed
    /// entry.
    pub fn collect(&self) -> Result<Vec<Route>> {
        let excludes = self
            .exclude_urls
            .iter()
            .map(|glob| {
                Pattern::new(glob).map_err(|e| {
                    CheckError::Configuration(format!("Invalid exclude_urls pattern '{glob}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut routes = Vec::new();
        flatten(&self.routes, "", None, &mut routes)?;

        routes.retain(|route| {
            if excludes.iter().any(|pattern| pattern.matches(&route.url)) {
                return false;
            }
            self.include_handlers.is_empty()
                || self
                    .include_handlers
                    .iter()
                    .any(|prefix| route.handler.starts_with(prefix.as_str()))
        });
        routes.sort_by(|a, b| a.url.cmp(&b.url));

        Ok(routes)
    }
}

fn flatten(
    entries: &[RouteEntry],
    base: &str,
    namespace: Option<&str>,
    out: &mut Vec<Route>,
) -> Result<()> {
    for entry in entries {
        let joined = format!("{base}{}", entry.pattern);

        match (&entry.handler, &entry.routes) {
            (Some(handler), None) => {
                let name = entry.name.as_ref().filter(|n| !n.is_empty()).map(|n| {
                    namespace.map_or_else(|| n.clone(), |ns| format!("{ns}:{n}"))
                });
                out.push(Route {
                    url: display_url(&joined),
                    name,
                    handler: handler.clone(),
                });
            }
            (None, Some(children)) => {
                let nested = match (namespace, entry.namespace.as_deref()) {
                    (Some(outer), Some(inner)) => Some(format!("{outer}:{inner}")),
                    (outer, inner) => inner.or(outer).map(str::to_string),
                };
                flatten(children, &joined, nested.as_deref(), out)?;
            }
            (Some(_), Some(_)) => {
                return Err(CheckError::Configuration(format!(
                    "Route '{joined}' has both a handler and nested routes"
                )));
            }
            (None, None) => {
                return Err(CheckError::Configuration(format!(
                    "Route '{joined}' needs either a handler or nested routes"
                )));
            }
        }
    }
    Ok(())
}

/// Drop regex anchors and make the URL absolute.
fn display_url(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != '^' && *c != '$').collect();
    if cleaned.starts_with('/') {
        cleaned
    } else {
        format!("/{cleaned}")
    }
}

/// Produces the rendered route listing of a manifest file.
#[derive(Debug, Clone)]
pub struct RoutesProducer {
    manifest: PathBuf,
}

impl RoutesProducer {
    /// Producer reading the manifest at `manifest` on every run.
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }
}

impl ContentProducer for RoutesProducer {
    fn produce(&mut self) -> Result<Lines> {
        let span = span!(Level::DEBUG, "routes_producer", manifest = %self.manifest.display());
        let _guard = span.enter();

        let routes = RouteManifest::load(&self.manifest)?.collect()?;
        debug!(count = routes.len(), "Collected routes");
        for route in &routes {
            output::verbose(&route.url);
        }
        output::info(&format!("Collected {} urls", routes.len()));

        Ok(routes.iter().map(Route::render).collect())
    }
}
