// WHY: Per-entry commenting is independent work, so it can fan out across workers
// and be reassembled by original index without any shared mutable state

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::commenter::{comment, comment_if_contains, contains};
use crate::config::ProcessingMode;
use crate::error::{HashoutError, Result};
use crate::reader::Document;

/// Per-run processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Source file path
    pub in_path: String,
    /// Destination file path
    pub out_path: String,
    /// Number of entries the document was split into
    pub entries_total: u64,
    /// Number of entries that matched and were commented out
    pub entries_commented: u64,
    /// Size of the input document
    pub bytes_read: u64,
    /// Size of the output document
    pub bytes_written: u64,
    /// "sequential" or "parallel"
    pub mode: String,
    /// Wall-clock time from read start to write completion
    pub processing_time_ms: u64,
}

/// Result of one worker task, tagged with the entry's original position
struct EntryResult {
    index: usize,
    commented: Option<Vec<u8>>,
}

/// Comment out matching entries one after another, in order
pub fn transform_sequential<'a>(
    document: &'a [u8],
    spans: &[Range<usize>],
    needle: &[u8],
) -> Vec<Cow<'a, [u8]>> {
    spans
        .iter()
        .map(|span| comment_if_contains(&document[span.clone()], needle))
        .collect()
}

/// Comment out matching entries with one blocking task per entry.
///
/// At most `concurrency` tasks are in flight. Results come back in completion
/// order and are slotted into a pre-sized output by their original index, so
/// the output is identical to [`transform_sequential`].
pub async fn transform_parallel<'a>(
    document: &'a Document,
    spans: &[Range<usize>],
    needle: &[u8],
    concurrency: usize,
) -> Vec<Cow<'a, [u8]>> {
    let needle: Arc<[u8]> = Arc::from(needle);
    let mut slots: Vec<Option<Vec<u8>>> = vec![None; spans.len()];

    let mut results = stream::iter(spans.iter().cloned().enumerate())
        .map(|(index, span)| {
            let document = document.clone();
            let needle = Arc::clone(&needle);
            tokio::task::spawn_blocking(move || {
                let entry = &document.as_bytes()[span];
                EntryResult {
                    index,
                    commented: contains(entry, &needle).then(|| comment(entry)),
                }
            })
        })
        .buffer_unordered(concurrency.max(1));

    while let Some(joined) = results.next().await {
        // Workers are never aborted, so a join error can only carry a panic
        let result = match joined {
            Ok(result) => result,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        };
        debug!(index = result.index, commented = result.commented.is_some(), "Entry finished");
        slots[result.index] = result.commented;
    }

    spans
        .iter()
        .zip(slots)
        .map(|(span, commented)| match commented {
            Some(bytes) => Cow::Owned(bytes),
            None => Cow::Borrowed(&document.as_bytes()[span.clone()]),
        })
        .collect()
}

/// Dispatch to the transform selected by `mode`
pub async fn transform_entries<'a>(
    document: &'a Document,
    spans: &[Range<usize>],
    needle: &[u8],
    mode: ProcessingMode,
) -> Vec<Cow<'a, [u8]>> {
    match mode {
        ProcessingMode::Sequential => transform_sequential(document.as_bytes(), spans, needle),
        ProcessingMode::Parallel { concurrency } => {
            info!("Fanning out {} entries over {} workers", spans.len(), concurrency);
            transform_parallel(document, spans, needle, concurrency).await
        }
    }
}

/// Number of entries that were rewritten
pub fn count_commented(entries: &[Cow<'_, [u8]>]) -> u64 {
    entries.iter().filter(|e| matches!(e, Cow::Owned(_))).count() as u64
}

/// Write run statistics as pretty-printed JSON
pub async fn write_stats(stats_path: &Path, stats: &RunStats) -> Result<()> {
    let json = serde_json::to_vec_pretty(stats)
        .map_err(|e| HashoutError::write(stats_path, e.into()))?;
    write_stats_bytes(stats_path, &json)
        .await
        .map_err(|e| HashoutError::write(stats_path, e))
}

async fn write_stats_bytes(stats_path: &Path, json: &[u8]) -> std::io::Result<()> {
    let file = tokio::fs::File::create(stats_path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
