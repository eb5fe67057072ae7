use std::path::{Component, Path, PathBuf};

use crate::config::PathPolicy;

/// Percent-decode a request URI path, the way a gateway hands it to the application.
#[inline]
pub fn decode_path(uri_path: &str) -> String {
    percent_encoding::percent_decode_str(uri_path)
        .decode_utf8_lossy()
        .into_owned()
}

fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut result, p| match p {
            Component::Normal(x) => {
                // Parse again to prevent a malicious component containing
                // a Windows drive letter, e.g.: `/anypath/c:/windows/win.ini`
                if Path::new(&x)
                    .components()
                    .all(|c| matches!(c, Component::Normal(_)))
                {
                    result.push(x);
                }
                result
            }
            Component::ParentDir => {
                result.pop();
                result
            }
            _ => result,
        })
}

/// The part of a request path after the URL prefix, mapped onto the static root.
pub struct RequestedPath {
    /// Path to stat, relative to the static root unless `Raw` kept an absolute remainder.
    pub relative: PathBuf,
    /// Whether the remainder ends with a slash.
    pub is_dir_request: bool,
}

impl RequestedPath {
    /// Map the remainder according to the given policy.
    pub fn resolve(remainder: &str, policy: PathPolicy) -> Self {
        let is_dir_request = remainder.as_bytes().last() == Some(&b'/');
        let relative = match policy {
            PathPolicy::Raw => PathBuf::from(remainder),
            PathPolicy::Normalize => normalize_path(Path::new(remainder)),
        };
        RequestedPath {
            relative,
            is_dir_request,
        }
    }

    /// Full filesystem path under the given root.
    pub fn full_path(&self, root: &Path) -> PathBuf {
        root.join(&self.relative)
    }
}
