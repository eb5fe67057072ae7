#![crate_name = "hyper_staticmount"]
#![deny(missing_docs)]

//! Static files under a URL prefix, with a fixed fallback, for
//! [Hyper 1.0](https://github.com/hyperium/hyper).
//!
//! This library exports a high-level handler `Main`, which serves files from a static root under
//! a URL prefix (`/static/` by default), and answers every other request with a short plaintext
//! body: `Home page` for `/`, and `Not Found` with status 404 for anything else.
//!
//! ## Basic usage
//!
//! `Main` is built from `StaticOptions`, and implements the `hyper::Service` trait. It can be
//! used as:
//!
//! ```rust
//! use hyper_staticmount::{Main, StaticOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Files in `my/site/static/` are served under `/assets/`.
//!     let mut options = StaticOptions::new("my/site/");
//!     options.url("/assets/");
//!     let main = Main::new(&options).unwrap();
//!
//!     // A dummy request, but normally obtained from Hyper.
//!     let request = http::Request::get("/").body(()).unwrap();
//!
//!     let response = main.serve(request).await.unwrap();
//!     assert_eq!(response.status(), http::StatusCode::OK);
//! }
//! ```
//!
//! If the static directory does not exist when `Main` is built, static file serving is disabled
//! and every request gets the fallback response. A malformed URL prefix, on the other hand, is an
//! error right away.
//!
//! ## Advanced usage
//!
//! `Main` is a simple wrapper around `Static::resolve` and `ResponseBuilder`. `Static` strips the
//! URL prefix and checks for a regular file under the root, returning a `ResolveResult`. The
//! `ResponseBuilder` then opens the file and hands it to `FileResponseBuilder`, which guesses the
//! `content-type` and streams the file using `FileBytesStream`, or builds the fallback response.
//!
//! By default the part of the path after the prefix is normalized so it cannot leave the root.
//! `PathPolicy::Raw` joins it as-is instead, `..` and all.

mod config;
mod error;
mod resolve;
mod response_builder;
mod service;
mod util;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::resolve::*;
pub use crate::response_builder::*;
pub use crate::service::*;
pub use crate::util::{content_type, guess_media_type, Body, FileBytesStream, FileResponseBuilder};
