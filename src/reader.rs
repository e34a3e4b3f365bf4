use memmap2::Mmap;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::error::{HashoutError, Result};

/// Configuration for document loading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Map the file into memory instead of reading it through a buffer
    pub use_mmap: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            use_mmap: false,
            buffer_size: 8192,
        }
    }
}

enum DocumentBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for DocumentBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            DocumentBytes::Owned(bytes) => bytes.as_slice(),
            DocumentBytes::Mapped(map) => &map[..],
        }
    }
}

/// Raw input file content, immutable for the duration of a run.
///
/// Cloning is cheap and shares the underlying bytes, so worker tasks can each
/// hold a handle to the same document.
#[derive(Clone)]
pub struct Document {
    bytes: Arc<DocumentBytes>,
}

impl Document {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Arc::new(DocumentBytes::Owned(bytes.into())),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &**self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_mapped(&self) -> bool {
        matches!(*self.bytes, DocumentBytes::Mapped(_))
    }
}

impl Deref for Document {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}

/// Loads input documents
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read the whole file. Any failure to open or read is a `Read` error.
    pub async fn read<P: AsRef<Path>>(&self, file_path: P) -> Result<Document> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting read of file: {}", path.display());

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                warn!("Failed to open file {}: {}", path.display(), e);
                return Err(HashoutError::read(path, e));
            }
        };

        let document = if self.config.use_mmap {
            Self::map_file(file, path).await?
        } else {
            self.read_buffered(file, path).await?
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Successfully read {}: {} bytes in {}ms (mmap: {})",
            path.display(),
            document.len(),
            duration_ms,
            document.is_mapped()
        );

        Ok(document)
    }

    async fn read_buffered(&self, file: File, path: &Path) -> Result<Document> {
        let capacity = file
            .metadata()
            .await
            .map(|m| m.len() as usize)
            .unwrap_or(0);

        // WHY: BufReader with custom buffer size reduces syscalls on slow storage
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut bytes = Vec::with_capacity(capacity);
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| HashoutError::read(path, e))?;

        Ok(Document::from_bytes(bytes))
    }

    async fn map_file(file: File, path: &Path) -> Result<Document> {
        let file = file.into_std().await;
        let len = file
            .metadata()
            .map_err(|e| HashoutError::read(path, e))?
            .len();

        // Zero-length files cannot be mapped on every platform
        if len == 0 {
            return Ok(Document::from_bytes(Vec::new()));
        }

        // SAFETY: the map is read-only and the file is not modified by this process
        let map = unsafe { Mmap::map(&file) }.map_err(|e| HashoutError::read(path, e))?;
        Ok(Document {
            bytes: Arc::new(DocumentBytes::Mapped(map)),
        })
    }
}

/// Read a document with default configuration
pub async fn read_document<P: AsRef<Path>>(file_path: P) -> Result<Document> {
    DocumentReader::new(ReaderConfig::default()).read(file_path).await
}
