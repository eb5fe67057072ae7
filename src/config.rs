use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{self, Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// URL prefix used when none is configured.
pub const DEFAULT_URL: &str = "/static/";
/// Directory name, relative to the base directory, used when none is configured.
pub const DEFAULT_DIRECTORY: &str = "static";
/// Charset appended to non-empty text files when the media type carries none.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// How the part of the request path after the URL prefix is mapped onto the static root.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PathPolicy {
    /// Lexically normalize the remainder first, so `..` and absolute components can never leave
    /// the static root.
    #[default]
    Normalize,
    /// Join the remainder onto the static root as-is.
    ///
    /// `..` segments and absolute remainders (such as `/static//etc/passwd`) are not sanitized,
    /// and may resolve to files outside the root.
    Raw,
}

/// Construction inputs for the static file resolver.
///
/// This struct allows direct access to its fields, but these fields are typically initialized by
/// the accessors, using the builder pattern. Unset options fall back to `DEFAULT_URL`,
/// `DEFAULT_DIRECTORY` and `DEFAULT_ENCODING`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StaticOptions {
    /// Directory that a relative `directory` is resolved against.
    ///
    /// If `Path::new("")` is given, the current directory is used.
    pub base_dir: PathBuf,
    /// URL prefix that static files are served under.
    pub url: Option<String>,
    /// Static root, absolute or relative to `base_dir`.
    pub directory: Option<PathBuf>,
    /// Charset for text files whose media type carries none.
    pub encoding: Option<String>,
    /// How request paths are mapped onto the static root.
    pub path_policy: PathPolicy,
}

impl StaticOptions {
    /// Create options with the given base directory and defaults for everything else.
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Set the directory that a relative static directory is resolved against.
    pub fn base_dir<P: Into<PathBuf>>(&mut self, value: P) -> &mut Self {
        self.base_dir = value.into();
        self
    }

    /// Serve static files under the given URL prefix.
    pub fn url<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.url = Some(value.into());
        self
    }

    /// Serve static files from the given directory.
    pub fn directory<P: Into<PathBuf>>(&mut self, value: P) -> &mut Self {
        self.directory = Some(value.into());
        self
    }

    /// Use the given charset for text files whose media type carries none.
    pub fn encoding<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.encoding = Some(value.into());
        self
    }

    /// Map request paths onto the static root using the given policy.
    pub fn path_policy(&mut self, value: PathPolicy) -> &mut Self {
        self.path_policy = value;
        self
    }

    /// Validate the options and compute the absolute static root.
    ///
    /// This does not check whether the root exists; see `Static::from_config`.
    pub fn build(&self) -> Result<StaticConfig, ConfigError> {
        let url_prefix = static_url(self.url.as_deref())?;
        let default_encoding = static_encoding(self.encoding.as_deref())?;
        let directory = self
            .directory
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DIRECTORY));
        let root_directory = path::absolute(self.base_dir.join(directory))?;

        Ok(StaticConfig {
            url_prefix,
            root_directory,
            default_encoding,
            path_policy: self.path_policy,
        })
    }
}

fn static_url(url: Option<&str>) -> Result<String, ConfigError> {
    match url {
        None => Ok(DEFAULT_URL.to_owned()),
        Some(url) if url.starts_with('/') && url.ends_with('/') => Ok(url.to_owned()),
        Some(url) => Err(ConfigError::InvalidUrlPrefix(url.to_owned())),
    }
}

fn static_encoding(encoding: Option<&str>) -> Result<String, ConfigError> {
    let Some(encoding) = encoding else {
        return Ok(DEFAULT_ENCODING.to_owned());
    };

    // Must survive as a bare token inside a `content-type` header value.
    let is_token = !encoding.is_empty()
        && encoding
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':' | b'+'));
    if is_token {
        Ok(encoding.to_owned())
    } else {
        Err(ConfigError::InvalidEncoding(encoding.to_owned()))
    }
}

/// Validated, immutable static file configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticConfig {
    /// URL prefix, beginning and ending with a slash.
    pub url_prefix: String,
    /// Absolute path of the static root.
    pub root_directory: PathBuf,
    /// Charset for text files whose media type carries none.
    pub default_encoding: String,
    /// How request paths are mapped onto the static root.
    pub path_policy: PathPolicy,
}

/// Settings for the `staticmount` server binary.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Listener settings, the `[server]` table.
    pub server: ServerSettings,
    /// Static file options, the `[static]` table.
    #[serde(rename = "static")]
    pub static_files: StaticOptions,
}

/// Listener settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    /// Address to accept HTTP connections on.
    pub listen: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
        }
    }
}

impl Settings {
    /// Read settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(static_url(None).unwrap(), "/static/");
        assert_eq!(static_encoding(None).unwrap(), "utf-8");
    }

    #[test]
    fn root_prefix_is_allowed() {
        assert_eq!(static_url(Some("/")).unwrap(), "/");
    }

    #[test]
    fn rejects_prefix_without_slashes() {
        for url in ["", "static/", "/static", "static"] {
            let result = static_url(Some(url));
            assert!(
                matches!(result, Err(ConfigError::InvalidUrlPrefix(ref u)) if u == url),
                "accepted {url:?}"
            );
        }
    }

    #[test]
    fn rejects_encoding_that_breaks_header() {
        for encoding in ["", "utf-8; q=1", "utf 8", "lat\u{e9}n", "a,b"] {
            assert!(matches!(
                static_encoding(Some(encoding)),
                Err(ConfigError::InvalidEncoding(_))
            ));
        }
        assert_eq!(static_encoding(Some("ISO-8859-1")).unwrap(), "ISO-8859-1");
    }
}
