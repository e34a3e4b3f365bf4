pub mod commenter;
pub mod config;
pub mod error;
pub mod parallel_processing;
pub mod pipeline;
pub mod reader;
pub mod splitter;
pub mod writer;

// Re-export main types for convenient access
pub use commenter::{comment, comment_if_contains, contains, BRACKET, COMMENT_MARKER, NEWLINE};
pub use config::{ProcessingMode, RunConfig};
pub use error::{HashoutError, Result};
pub use pipeline::run;
pub use writer::write_entries;
pub use reader::{read_document, Document};
pub use splitter::{split_entries, split_spans};

// Re-export parallel processing types and functions for benchmarking
pub use parallel_processing::{transform_parallel, transform_sequential, RunStats};
