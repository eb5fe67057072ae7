use std::path::PathBuf;

use mime_guess::Mime;
use tracing::{trace, warn};

use crate::config::{StaticConfig, StaticOptions};
use crate::error::ConfigError;
use crate::util::{guess_media_type, RequestedPath};

/// A file that existed under the static root when the request was resolved.
///
/// Nothing is cached: the file may have changed or vanished by the time it is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Full filesystem path of the file.
    pub path: PathBuf,
    /// Media type guessed from the file name.
    pub mime: Mime,
}

/// The result of `Static::resolve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// The path is outside the URL prefix, does not name a regular file, or the resolver is
    /// disabled.
    NotFound,
    /// The request path names a regular file under the static root.
    Found(ResolvedFile),
}

/// Resolves request paths under a URL prefix onto files in a static root.
///
/// The root is checked once, at construction. If it is not a directory at that point, the
/// resolver is disabled for its whole lifetime and every request misses.
#[derive(Clone, Debug)]
pub struct Static {
    config: Option<StaticConfig>,
}

impl Static {
    /// Validate the options and create a resolver.
    ///
    /// A malformed URL prefix or encoding is an error. A missing root is not.
    pub fn new(options: &StaticOptions) -> Result<Self, ConfigError> {
        Ok(Self::from_config(options.build()?))
    }

    /// Create a resolver from a validated configuration.
    pub fn from_config(config: StaticConfig) -> Self {
        if config.root_directory.is_dir() {
            Static {
                config: Some(config),
            }
        } else {
            warn!(
                root = %config.root_directory.display(),
                "static directory does not exist, static files are disabled"
            );
            Static { config: None }
        }
    }

    /// Whether the static root existed at construction.
    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// The active configuration, or `None` when disabled.
    pub fn config(&self) -> Option<&StaticConfig> {
        self.config.as_ref()
    }

    /// Resolve a (decoded) request path.
    ///
    /// Strips the URL prefix, maps the remainder onto the root according to the path policy, and
    /// checks that the result is a regular file. Any error while checking is treated as a miss.
    pub async fn resolve(&self, request_path: &str) -> ResolveResult {
        let Some(config) = &self.config else {
            return ResolveResult::NotFound;
        };
        let Some(remainder) = request_path.strip_prefix(config.url_prefix.as_str()) else {
            return ResolveResult::NotFound;
        };

        let requested = RequestedPath::resolve(remainder, config.path_policy);
        let path = requested.full_path(&config.root_directory);

        match tokio::fs::metadata(&path).await {
            // A trailing slash never names a regular file.
            Ok(metadata) if metadata.is_file() && !requested.is_dir_request => {
                trace!(path = %path.display(), "static file hit");
                let mime = guess_media_type(&path);
                ResolveResult::Found(ResolvedFile { path, mime })
            }
            Ok(_) => {
                trace!(path = %path.display(), "not a regular file");
                ResolveResult::NotFound
            }
            Err(err) => {
                trace!(path = %path.display(), error = %err, "static file miss");
                ResolveResult::NotFound
            }
        }
    }
}
