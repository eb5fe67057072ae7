use std::io::Error as IoError;

use http::response::Builder as HttpResponseBuilder;
use http::{header, Response, Result, StatusCode};
use tracing::warn;

use crate::resolve::ResolveResult;
use crate::util::{open_with_metadata, Body, FileResponseBuilder};

const HOME_PAGE: &[u8] = b"Home page";
const NOT_FOUND: &[u8] = b"Not Found";
const FALLBACK_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Utility to build the response for a resolved request.
///
/// This struct allows direct access to its fields, but these fields are typically initialized by
/// the accessors, using the builder pattern.
#[derive(Clone, Debug, Default)]
pub struct ResponseBuilder {
    /// Builder used for files that were found.
    pub file: FileResponseBuilder,
}

impl ResponseBuilder {
    /// Create a new response builder with a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given charset for text files whose media type carries none.
    pub fn default_encoding<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.file.default_encoding(value);
        self
    }

    /// Build a response for the given request path and `resolve` result.
    ///
    /// A found file is opened and streamed. If it cannot be opened anymore, the IO error is
    /// returned as-is rather than turned into a 404.
    pub async fn build(
        &self,
        request_path: &str,
        result: ResolveResult,
    ) -> std::result::Result<Response<Body>, IoError> {
        match result {
            ResolveResult::Found(resolved) => {
                let (file, metadata) = open_with_metadata(&resolved.path)
                    .await
                    .inspect_err(|err| {
                        warn!(
                            path = %resolved.path.display(),
                            error = %err,
                            "resolved static file could not be opened"
                        )
                    })?;
                self.file
                    .build(&resolved.mime, file, metadata.len())
                    .map_err(IoError::other)
            }
            ResolveResult::NotFound => fallback(request_path).map_err(IoError::other),
        }
    }
}

/// Build the fixed plaintext response for a request that did not hit a static file.
///
/// The root path gets `Home page` with status 200, every other path `Not Found` with status 404.
pub fn fallback(request_path: &str) -> Result<Response<Body>> {
    let (status, body) = if request_path == "/" {
        (StatusCode::OK, HOME_PAGE)
    } else {
        (StatusCode::NOT_FOUND, NOT_FOUND)
    };

    HttpResponseBuilder::new()
        .status(status)
        .header(header::CONTENT_LENGTH, body.len().to_string())
        .header(header::CONTENT_TYPE, FALLBACK_CONTENT_TYPE)
        .body(Body::from_static(body))
}
