// Integration test utilities shared by the CLI tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temporary directory holding input, output and stats files for one test
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Write an input file with the given content
    pub fn create_input<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    pub fn path<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.root_path.join(relative_path)
    }

    pub fn read_output<P: AsRef<Path>>(&self, relative_path: P) -> Vec<u8> {
        fs::read(self.root_path.join(relative_path)).expect("Failed to read output file")
    }
}

/// Run the built binary with the given arguments
pub fn run_hashout<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_hashout"))
        .args(args)
        .output()
        .expect("Failed to run hashout")
}
