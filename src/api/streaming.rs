//! Server-Sent Events relay for streamed chat completions.
//!
//! The upstream's event stream is forwarded byte for byte: chunks are neither
//! parsed, merged, nor reordered. Empty chunks are skipped. The relay owns the
//! upstream body, so dropping it (the caller went away) closes the upstream
//! connection on the spot.
//!
//! There is no cap on total stream length. An optional idle timeout ends the
//! relay with an error when the upstream sends nothing for too long.

use crate::core::logging::get_request_id;
use axum::{
    body::{Body, Bytes},
    http::header,
    response::{IntoResponse, Response},
};
use futures::stream::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Instant, Sleep};

/// Resettable deadline for the gap between two upstream chunks.
struct IdleTimeout {
    period: Duration,
    deadline: Pin<Box<Sleep>>,
}

impl IdleTimeout {
    fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: Box::pin(tokio::time::sleep(period)),
        }
    }

    fn reset(&mut self) {
        self.deadline.as_mut().reset(Instant::now() + self.period);
    }
}

/// Stream adapter that forwards non-empty upstream chunks and reports how the
/// relay ended.
pub struct UpstreamRelay<S> {
    inner: S,
    request_id: String,
    chunks: usize,
    bytes: usize,
    finished: bool,
    idle: Option<IdleTimeout>,
}

impl<S> UpstreamRelay<S> {
    /// Wrap an upstream byte stream. Captures the current request ID, since
    /// the body is polled after the handler's logging scope has exited.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            request_id: get_request_id(),
            chunks: 0,
            bytes: 0,
            finished: false,
            idle: None,
        }
    }

    /// Fail the relay when no chunk arrives within `period`. The clock
    /// restarts on every chunk, so long but live streams are never cut.
    pub fn with_idle_timeout(mut self, period: Duration) -> Self {
        self.idle = Some(IdleTimeout::new(period));
        self
    }

    /// Whether the upstream stream ran to its end (or failed) before drop.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<S, E> Stream for UpstreamRelay<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    type Item = Result<Bytes, std::io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        loop {
            let item = match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(item) => item,
                Poll::Pending => {
                    if let Some(idle) = this.idle.as_mut() {
                        if idle.deadline.as_mut().poll(cx).is_ready() {
                            this.finished = true;
                            tracing::warn!(
                                request_id = %this.request_id,
                                chunks = this.chunks,
                                idle_secs = idle.period.as_secs_f64(),
                                "upstream stream idle too long, closing"
                            );
                            return Poll::Ready(Some(Err(std::io::Error::new(
                                std::io::ErrorKind::TimedOut,
                                format!("upstream sent no data for {:?}", idle.period),
                            ))));
                        }
                    }
                    return Poll::Pending;
                }
            };

            if let Some(idle) = this.idle.as_mut() {
                idle.reset();
            }

            match item {
                Some(Ok(chunk)) if chunk.is_empty() => continue,
                Some(Ok(chunk)) => {
                    this.chunks += 1;
                    this.bytes += chunk.len();
                    return Poll::Ready(Some(Ok(chunk)));
                }
                Some(Err(e)) => {
                    this.finished = true;
                    tracing::warn!(
                        request_id = %this.request_id,
                        chunks = this.chunks,
                        error = %e,
                        "error reading upstream stream"
                    );
                    return Poll::Ready(Some(Err(std::io::Error::other(e))));
                }
                None => {
                    this.finished = true;
                    tracing::debug!(
                        request_id = %this.request_id,
                        chunks = this.chunks,
                        bytes = this.bytes,
                        "upstream stream completed"
                    );
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl<S> Drop for UpstreamRelay<S> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(
                request_id = %self.request_id,
                chunks = self.chunks,
                "client disconnected mid-stream, releasing upstream connection"
            );
        }
    }
}

/// Build the `text/event-stream` response around an upstream byte stream,
/// closing it if the upstream goes quiet for longer than `idle_timeout`.
pub fn relay_response<S, E>(upstream: S, idle_timeout: Duration) -> Response
where
    S: Stream<Item = Result<Bytes, E>> + Unpin + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let body = Body::from_stream(UpstreamRelay::new(upstream).with_idle_timeout(idle_timeout));

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}
