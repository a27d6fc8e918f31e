use std::path::PathBuf;

/// Printed once before the first row.
pub const BANNER: &str = "reading student data.....";

/// Input read when nothing else is set, relative to the working directory.
pub const DEFAULT_INPUT: &str = "students.csv";

/// Where the roster comes from. The binary always runs with the default;
/// other values are only built by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Config {
            input: input.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_INPUT)
    }
}
