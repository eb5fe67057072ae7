use std::{
    fmt,
    io::Error as IoError,
    pin::Pin,
    task::{ready, Context, Poll},
};

use futures_util::stream::Stream;
use hyper::body::{Bytes, Frame, SizeHint};
use tokio::{fs::File, io::AsyncRead};

use crate::util::FileBytesStream;

/// Hyper Body implementation for the two kinds of responses served.
pub enum Body<F = File> {
    /// A short in-memory body, sent as a single frame.
    Fixed(Option<Bytes>),
    /// Stream a file that was found under the static root.
    File(FileBytesStream<F>),
}

impl<F> Body<F> {
    /// Create a fixed body from static bytes.
    pub fn from_static(bytes: &'static [u8]) -> Self {
        Body::Fixed(Some(Bytes::from_static(bytes)))
    }
}

impl<F> fmt::Debug for Body<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Body::Fixed(ref data) => f.debug_tuple("Fixed").field(data).finish(),
            Body::File(_) => f.write_str("File(..)"),
        }
    }
}

impl<F> hyper::body::Body for Body<F>
where
    F: AsyncRead + Unpin,
{
    type Data = Bytes;
    type Error = IoError;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, IoError>>> {
        match *self {
            Body::Fixed(ref mut data) => Poll::Ready(data.take().map(|data| Ok(Frame::data(data)))),
            Body::File(ref mut stream) => {
                let opt = ready!(Pin::new(stream).poll_next(cx));
                Poll::Ready(opt.map(|res| res.map(Frame::data)))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        matches!(*self, Body::Fixed(None))
    }

    fn size_hint(&self) -> SizeHint {
        match *self {
            Body::Fixed(Some(ref data)) => SizeHint::with_exact(data.len() as u64),
            Body::Fixed(None) => SizeHint::with_exact(0),
            Body::File(_) => SizeHint::default(),
        }
    }
}
