use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

use crate::error::{HashoutError, Result};

/// Permission bits for output files (rw-r--r--)
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Concatenate `entries` in order and write them to `out_path`.
///
/// No separators are inserted; each entry already carries its own newlines.
/// The bytes go to a temporary file next to the destination, which is renamed
/// over `out_path` only once everything is flushed. A failed write leaves any
/// existing destination untouched, and an input that is still memory-mapped
/// from the same path keeps its original inode. Returns the number of bytes
/// written.
pub async fn write_entries<P, E>(out_path: P, entries: &[E]) -> Result<u64>
where
    P: AsRef<Path>,
    E: AsRef<[u8]>,
{
    let path = out_path.as_ref();
    write_all_entries(path, entries).await.map_err(|e| {
        warn!("Failed to write {}: {}", path.display(), e);
        HashoutError::write(path, e)
    })
}

async fn write_all_entries<E: AsRef<[u8]>>(path: &Path, entries: &[E]) -> std::io::Result<u64> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping `temp_path` on any early return removes the temporary file
    let (file, temp_path) = NamedTempFile::new_in(parent)?.into_parts();
    let mut writer = BufWriter::new(tokio::fs::File::from_std(file));

    let mut written = 0u64;
    for entry in entries {
        let bytes = entry.as_ref();
        writer.write_all(bytes).await?;
        written += bytes.len() as u64;
    }

    writer.flush().await?;
    writer.get_ref().sync_all().await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(OUTPUT_FILE_MODE)).await?;
    }

    temp_path.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} entries ({} bytes) to {}", entries.len(), written, path.display());
    Ok(written)
}
