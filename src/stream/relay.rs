//! Audio stream relay
//!
//! Pipes a remote audio resource to the caller without buffering the file.
//! The relay is a two-stage pipeline: a spawned producer reads the upstream
//! body and feeds fixed-size chunks into a bounded channel, the caller drains
//! it through [`ByteStream`]. A full channel suspends the producer, so memory
//! stays bounded by the channel capacity times [`CHUNK_SIZE`].
//!
//! Headers are decided before the first body byte is known. Failures after
//! that point (no link in the conversion response, media origin unreachable,
//! upstream read error) end the stream early and are only logged.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::models::{RelayedLink, StreamRequest};
use crate::stream::filename::{content_disposition, filename_for, AUDIO_MIME};
use crate::stream::source::extract_video_id;

/// Size of the chunks forwarded to the caller
pub const CHUNK_SIZE: usize = 4096;

/// Chunks buffered between producer and consumer
pub const CHANNEL_CAPACITY: usize = 8;

/// Source of direct media links for a video id
#[async_trait]
pub trait LinkProvider: Send + Sync {
    /// `Ok(None)` when the provider answered without a usable link
    async fn media_link(&self, video_id: &str) -> Result<Option<RelayedLink>>;
}

/// Lazily produced, finite, single-use sequence of byte chunks
pub struct ByteStream {
    rx: mpsc::Receiver<Bytes>,
}

impl ByteStream {
    /// A stream that ends immediately
    fn empty() -> Self {
        let (_tx, rx) = mpsc::channel(1);
        Self { rx }
    }
}

impl Stream for ByteStream {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Bytes>> {
        self.rx.poll_recv(cx)
    }
}

/// Response metadata plus the body, committed before any byte flows
pub struct RelayResponse {
    pub video_id: String,
    pub content_type: &'static str,
    pub content_disposition: String,
    pub filename: String,
    pub body: ByteStream,
}

impl RelayResponse {
    /// Response headers as name/value pairs
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            ("Content-Type", self.content_type),
            ("Content-Disposition", self.content_disposition.as_str()),
        ]
    }
}

/// Relays audio for stream requests
pub struct Relay<L> {
    links: L,
    client: reqwest::Client,
}

impl<L: LinkProvider> Relay<L> {
    pub fn new(links: L) -> Self {
        Self::with_client(links, reqwest::Client::new())
    }

    /// Use a specific HTTP client for the media origin
    pub fn with_client(links: L, client: reqwest::Client) -> Self {
        Self { links, client }
    }

    pub fn links(&self) -> &L {
        &self.links
    }

    /// Start relaying `request`.
    ///
    /// Errors are only returned before the stream starts: an unparsable source
    /// (no network call is made) or a failed conversion request.
    pub async fn relay(&self, request: &StreamRequest) -> Result<RelayResponse> {
        let video_id = extract_video_id(&request.source)?;
        let filename = filename_for(request.display_name.as_deref());
        let content_disposition = content_disposition(request.mode, &filename);

        let body = match self.links.media_link(&video_id).await? {
            Some(link) => spawn_pipeline(self.client.clone(), link),
            None => {
                tracing::warn!(%video_id, "no media link, relaying an empty stream");
                ByteStream::empty()
            }
        };

        Ok(RelayResponse {
            video_id,
            content_type: AUDIO_MIME,
            content_disposition,
            filename,
            body,
        })
    }
}

fn spawn_pipeline(client: reqwest::Client, link: RelayedLink) -> ByteStream {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(pump(client, link, tx));
    ByteStream { rx }
}

/// Producer stage: fetch the media origin, then forward its body
async fn pump(client: reqwest::Client, link: RelayedLink, tx: mpsc::Sender<Bytes>) {
    let response = tokio::select! {
        response = client.get(&link.media_url).send() => response,
        _ = tx.closed() => {
            tracing::debug!("consumer disconnected before the media origin answered");
            return;
        }
    };

    match response.and_then(|r| r.error_for_status()) {
        Ok(response) => {
            forward(response.bytes_stream(), tx).await;
        }
        Err(e) => tracing::warn!(error = %e, "media fetch failed, ending stream"),
    }
}

/// Upstream body -> fixed-size chunks -> channel.
///
/// Returns the number of bytes handed to the consumer. Stops as soon as the
/// consumer hangs up, even while waiting on a stalled upstream.
async fn forward<S, E>(upstream: S, tx: mpsc::Sender<Bytes>) -> usize
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: std::fmt::Display,
{
    futures::pin_mut!(upstream);
    let mut chunker = Rechunker::new(CHUNK_SIZE);
    let mut forwarded = 0usize;

    loop {
        let item = tokio::select! {
            item = upstream.next() => item,
            _ = tx.closed() => {
                tracing::debug!(forwarded, "consumer disconnected, dropping upstream");
                return forwarded;
            }
        };

        let data = match item {
            Some(Ok(data)) => data,
            Some(Err(e)) => {
                tracing::warn!(error = %e, forwarded, "upstream read failed, truncating stream");
                return forwarded;
            }
            None => break,
        };

        chunker.push(&data);
        while let Some(chunk) = chunker.next_full() {
            let len = chunk.len();
            if tx.send(chunk).await.is_err() {
                tracing::debug!(forwarded, "consumer disconnected, dropping upstream");
                return forwarded;
            }
            forwarded += len;
        }
    }

    if let Some(rest) = chunker.finish() {
        let len = rest.len();
        if tx.send(rest).await.is_ok() {
            forwarded += len;
        }
    }

    tracing::debug!(forwarded, "relay finished");
    forwarded
}

/// Regroups arbitrarily sized upstream reads into fixed-size chunks
struct Rechunker {
    buf: BytesMut,
    size: usize,
}

impl Rechunker {
    fn new(size: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(size),
            size,
        }
    }

    fn push(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    fn next_full(&mut self) -> Option<Bytes> {
        (self.buf.len() >= self.size).then(|| self.buf.split_to(self.size).freeze())
    }

    /// Trailing partial chunk, if any
    fn finish(self) -> Option<Bytes> {
        (!self.buf.is_empty()).then(|| self.buf.freeze())
    }
}
