use thiserror::Error;

/// Errors detected while building the static file configuration.
///
/// These are all startup faults: a `Main` or `Static` that fails to build never serves a request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The URL prefix is empty, or does not begin and end with a slash.
    #[error("URL for static files must begin and end with a slash: '{0}'")]
    InvalidUrlPrefix(String),
    /// The default encoding cannot be used as a `charset` parameter.
    #[error("invalid default encoding for static files: '{0}'")]
    InvalidEncoding(String),
    /// The static directory could not be made absolute, or a settings file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A settings file is not valid TOML, or has unexpected keys.
    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}
