//! Async absorption of chunked input
//!
//! Feeds a `futures::Stream` of byte chunks into an engine one chunk at a
//! time, so large inputs never have to be held in memory at once.

use crate::engine::HashEngine;
use crate::variant::Variant;
use crate::Result;
use futures::{Stream, StreamExt};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Progress report for one absorbed chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsorbProgress {
    /// Bytes in this chunk
    pub bytes_absorbed: u64,
    /// Bytes absorbed since the absorber was created
    pub total_bytes: u64,
}

pin_project! {
    /// Stream adapter that absorbs every chunk of `input` into an engine
    pub struct StreamAbsorber<S, V: Variant> {
        #[pin]
        input: S,
        engine: HashEngine<V>,
        total_bytes: u64,
    }
}

impl<S, V> StreamAbsorber<S, V>
where
    S: Stream<Item = Vec<u8>>,
    V: Variant,
{
    /// Absorb `input` into `engine`
    pub fn new(engine: HashEngine<V>, input: S) -> Self {
        Self {
            input,
            engine,
            total_bytes: 0,
        }
    }

    /// Total bytes absorbed so far
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// The engine, holding everything absorbed so far
    pub fn engine(&self) -> &HashEngine<V> {
        &self.engine
    }

    /// Stop absorbing and take the engine back
    pub fn into_engine(self) -> HashEngine<V> {
        self.engine
    }
}

impl<S, V> Stream for StreamAbsorber<S, V>
where
    S: Stream<Item = Vec<u8>>,
    V: Variant,
{
    type Item = Result<AbsorbProgress>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        match this.input.poll_next(cx) {
            Poll::Ready(Some(chunk)) => {
                let chunk_size = chunk.len() as u64;
                if let Err(e) = this.engine.update(chunk) {
                    return Poll::Ready(Some(Err(e)));
                }
                *this.total_bytes += chunk_size;

                Poll::Ready(Some(Ok(AbsorbProgress {
                    bytes_absorbed: chunk_size,
                    total_bytes: *this.total_bytes,
                })))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Absorb every chunk of `input` and return the engine.
///
/// # Errors
///
/// Propagates the first error returned by [`HashEngine::update`].
pub async fn absorb_stream<S, V>(engine: HashEngine<V>, input: S) -> Result<HashEngine<V>>
where
    S: Stream<Item = Vec<u8>> + Unpin,
    V: Variant,
{
    let mut absorber = StreamAbsorber::new(engine, input);
    while let Some(progress) = absorber.next().await {
        progress?;
    }
    Ok(absorber.into_engine())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hash, OutputConfig, OutputFormat};
    use futures::stream;

    #[tokio::test]
    async fn chunked_stream_matches_single_update() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let chunks: Vec<Vec<u8>> = data.chunks(37).map(<[u8]>::to_vec).collect();

        let streamed = absorb_stream(Hash::sha256(), stream::iter(chunks))
            .await
            .expect("absorbs");
        let mut whole = Hash::sha256();
        whole.update(data).expect("update");

        let cfg = OutputConfig::default();
        assert_eq!(
            streamed.get_hash(OutputFormat::Hex, &cfg).expect("digest"),
            whole.get_hash(OutputFormat::Hex, &cfg).expect("digest")
        );
    }

    #[tokio::test]
    async fn progress_reports_running_totals() {
        let chunks = vec![vec![1u8; 10], Vec::new(), vec![2u8; 5]];
        let absorber = StreamAbsorber::new(Hash::shake128(), tokio_stream::iter(chunks));
        let progress: Vec<AbsorbProgress> = absorber
            .map(|p| p.expect("absorbs"))
            .collect()
            .await;

        let totals: Vec<u64> = progress.iter().map(|p| p.total_bytes).collect();
        assert_eq!(totals, vec![10, 10, 15]);
        assert_eq!(progress[1].bytes_absorbed, 0);
    }

    #[tokio::test]
    async fn empty_stream_leaves_engine_fresh() {
        let engine = absorb_stream(Hash::sha3_256(), stream::iter(Vec::<Vec<u8>>::new()))
            .await
            .expect("absorbs");
        assert_eq!(engine.phase(), crate::Phase::Fresh);
        assert_eq!(engine.processed_bits(), 0);
    }
}
