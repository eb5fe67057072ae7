use http::response::Builder as ResponseBuilder;
use http::{header, Response, Result, StatusCode};
use mime_guess::Mime;

use crate::config::DEFAULT_ENCODING;
use crate::util::{content_type, Body, FileBytesStream};

/// Utility to build responses for serving a file found under the static root.
///
/// This struct allows direct access to its fields, but these fields are typically initialized by
/// the accessors, using the builder pattern.
#[derive(Clone, Debug)]
pub struct FileResponseBuilder {
    /// Charset for non-empty text files whose media type carries none.
    pub default_encoding: String,
}

impl Default for FileResponseBuilder {
    fn default() -> Self {
        Self {
            default_encoding: DEFAULT_ENCODING.to_owned(),
        }
    }
}

impl FileResponseBuilder {
    /// Create a new builder with a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given charset for text files whose media type carries none.
    pub fn default_encoding<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.default_encoding = value.into();
        self
    }

    /// Build a response streaming `file`, which has the given media type and is `len` bytes long.
    ///
    /// The only header sent is `content-type`.
    pub fn build<F>(&self, mime: &Mime, file: F, len: u64) -> Result<Response<Body<F>>> {
        ResponseBuilder::new()
            .status(StatusCode::OK)
            .header(
                header::CONTENT_TYPE,
                content_type(mime, len, &self.default_encoding),
            )
            .body(Body::File(FileBytesStream::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use mime_guess::mime;
    use std::io::Cursor;

    #[tokio::test]
    async fn streams_reader_with_content_type() {
        let contents = b"body { color: black; }\n";
        let res = FileResponseBuilder::new()
            .build(&mime::TEXT_CSS, Cursor::new(&contents[..]), contents.len() as u64)
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().len(), 1);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );

        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], &contents[..]);
    }
}
