use std::time::Instant;
use tracing::info;

use crate::config::RunConfig;
use crate::error::Result;
use crate::parallel_processing::{count_commented, transform_entries, write_stats, RunStats};
use crate::reader::{DocumentReader, ReaderConfig};
use crate::splitter::split_spans;
use crate::writer::write_entries;

/// Read, split, comment and write according to `config`.
///
/// A read failure aborts before any work starts. A write failure aborts after
/// all entries are processed and the result is discarded.
pub async fn run(config: &RunConfig) -> Result<RunStats> {
    let start = Instant::now();

    let reader = DocumentReader::new(ReaderConfig {
        use_mmap: config.use_mmap,
        ..Default::default()
    });
    let document = reader.read(&config.in_path).await?;

    let spans = split_spans(&document);
    info!("Document split into {} entries", spans.len());

    let entries = transform_entries(&document, &spans, config.contains.as_bytes(), config.mode).await;
    let entries_commented = count_commented(&entries);
    info!("Commented out {} of {} entries", entries_commented, entries.len());

    let bytes_written = write_entries(&config.out_path, &entries).await?;

    let stats = RunStats {
        in_path: config.in_path.display().to_string(),
        out_path: config.out_path.display().to_string(),
        entries_total: entries.len() as u64,
        entries_commented,
        bytes_read: document.len() as u64,
        bytes_written,
        mode: config.mode.as_str().to_string(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    };

    if let Some(stats_path) = &config.stats_out {
        write_stats(stats_path, &stats).await?;
        info!("Stats written to {}", stats_path.display());
    }

    Ok(stats)
}
