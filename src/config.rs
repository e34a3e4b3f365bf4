use clap::Parser;
use std::path::PathBuf;

/// Command-line flags, parsed once at startup
#[derive(Parser, Debug)]
#[command(name = "hashout")]
#[command(about = "Comment out [[...]] entries of a TOML-like file that contain a substring")]
#[command(version)]
pub struct Args {
    /// Input file
    #[arg(long, default_value = "", value_parser = clap::builder::TypedValueParser::map(clap::builder::OsStringValueParser::new(), PathBuf::from))]
    pub in_file: PathBuf,

    /// Output file
    #[arg(long, default_value = "", value_parser = clap::builder::TypedValueParser::map(clap::builder::OsStringValueParser::new(), PathBuf::from))]
    pub out_file: PathBuf,

    /// Comment out entries that contain the provided string
    #[arg(long, default_value = "")]
    pub contains: String,

    /// Comment entries on a pool of worker tasks
    #[arg(long)]
    pub parallel: bool,

    /// Maximum in-flight worker tasks with --parallel (defaults to CPU count)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Use memory-mapped I/O instead of async buffered reads
    #[arg(long)]
    pub use_mmap: bool,

    /// Print the elapsed wall-clock time on success
    #[arg(long)]
    pub print_elapsed: bool,

    /// Stats output file path
    #[arg(long)]
    pub stats_out: Option<PathBuf>,

    /// Emit debug-level logs on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// How per-entry work is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    Sequential,
    Parallel { concurrency: usize },
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Sequential => "sequential",
            ProcessingMode::Parallel { .. } => "parallel",
        }
    }
}

/// Immutable configuration for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub in_path: PathBuf,
    pub out_path: PathBuf,
    pub contains: String,
    pub mode: ProcessingMode,
    pub use_mmap: bool,
    pub print_elapsed: bool,
    pub stats_out: Option<PathBuf>,
}

impl RunConfig {
    /// Sequential, buffered configuration with no extra outputs
    pub fn new(in_path: impl Into<PathBuf>, out_path: impl Into<PathBuf>, contains: impl Into<String>) -> Self {
        Self {
            in_path: in_path.into(),
            out_path: out_path.into(),
            contains: contains.into(),
            mode: ProcessingMode::Sequential,
            use_mmap: false,
            print_elapsed: false,
            stats_out: None,
        }
    }

    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        let mode = if args.parallel {
            ProcessingMode::Parallel {
                concurrency: args.concurrency.unwrap_or_else(num_cpus::get).max(1),
            }
        } else {
            ProcessingMode::Sequential
        };

        Self {
            in_path: args.in_file,
            out_path: args.out_file,
            contains: args.contains,
            mode,
            use_mmap: args.use_mmap,
            print_elapsed: args.print_elapsed,
            stats_out: args.stats_out,
        }
    }
}
