use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use ragdoc_core::traits::Embedder;
use sha2::{Digest, Sha256};

/// Embedding requests allowed in flight at once.
const EMBED_CONCURRENCY: usize = 4;

/// Stable identifier for a document: the first 12 hex chars of its SHA-256.
pub fn document_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(12);
    id
}

/// Embed `texts` in requests of at most `batch_size`, keeping input order.
pub async fn embed_in_batches(
    embedder: &dyn Embedder,
    texts: &[String],
    batch_size: usize,
) -> Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let batches: Vec<Vec<Vec<f32>>> = stream::iter(texts.chunks(batch_size.max(1)).enumerate())
        .map(|(i, batch)| async move {
            let vectors = embedder
                .embed_batch(batch)
                .await
                .with_context(|| format!("embedding batch {} failed", i))?;
            if vectors.len() != batch.len() {
                return Err(anyhow!(
                    "embedder returned {} vectors for {} texts",
                    vectors.len(),
                    batch.len()
                ));
            }
            tracing::debug!(batch = i, size = batch.len(), "embedded batch");
            Ok(vectors)
        })
        .buffered(EMBED_CONCURRENCY)
        .try_collect()
        .await?;

    Ok(batches.into_iter().flatten().collect())
}
