use std::future::Future;
use std::io::Error;
use std::pin::Pin;
use std::sync::Arc;

use http::{Request, Response};
use tracing::debug;

use crate::config::StaticOptions;
use crate::error::ConfigError;
use crate::resolve::Static;
use crate::util::{decode_path, Body};
use crate::ResponseBuilder;

/// High-level request handler: static files under a URL prefix, with a fixed fallback.
///
/// A request path that starts with the URL prefix and names a regular file under the static root
/// is answered with that file, streamed, with a `content-type` guessed from its name. Everything
/// else gets a short plaintext body: `Home page` for `/`, `Not Found` with status 404 otherwise.
///
/// The request method is not inspected. Holding only read-only configuration, a `Main` can be
/// cloned cheaply and shared across connections.
///
/// This struct also implements the `hyper::Service` trait, which simply wraps `Main::serve`.
#[derive(Clone, Debug)]
pub struct Main {
    resolver: Arc<Static>,
    response_builder: ResponseBuilder,
}

impl Main {
    /// Validate the options and create a handler.
    ///
    /// Fails for a malformed URL prefix or encoding. A missing static directory only disables
    /// static file serving.
    pub fn new(options: &StaticOptions) -> Result<Self, ConfigError> {
        Ok(Self::from_static(Static::new(options)?))
    }

    /// Create a handler around an existing resolver.
    pub fn from_static(resolver: Static) -> Self {
        let mut response_builder = ResponseBuilder::new();
        if let Some(config) = resolver.config() {
            response_builder.default_encoding(config.default_encoding.as_str());
        }
        Main {
            resolver: Arc::new(resolver),
            response_builder,
        }
    }

    /// The resolver used by this handler.
    pub fn resolver(&self) -> &Static {
        &self.resolver
    }

    /// Handle a decoded request path.
    ///
    /// Returns an error only if a file was resolved but could not be opened afterwards.
    pub async fn handle(&self, request_path: &str) -> Result<Response<Body>, Error> {
        let result = self.resolver.resolve(request_path).await;
        let response = self.response_builder.build(request_path, result).await?;
        debug!(path = request_path, status = %response.status(), "handled request");
        Ok(response)
    }

    /// Serve a request, using the percent-decoded path of its URI.
    pub async fn serve<B>(&self, request: Request<B>) -> Result<Response<Body>, Error> {
        let request_path = decode_path(request.uri().path());
        self.handle(&request_path).await
    }
}

impl<B> hyper::service::Service<Request<B>> for Main {
    type Response = Response<Body>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, request: Request<B>) -> Self::Future {
        // Take only the path, so the returned future does not capture `B`.
        let request_path = decode_path(request.uri().path());
        let main = self.clone();
        Box::pin(async move { main.handle(&request_path).await })
    }
}
