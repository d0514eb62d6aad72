use anyhow::{Context, Result};
use std::path::PathBuf;

/// Startup options taken from the command line.
///
/// `--db <path>` may appear anywhere; everything else is passed through to the
/// CLI dispatcher with the program name still at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) args: Vec<String>,
}

impl Config {
    pub(crate) fn from_args(args: &[String]) -> Result<Self> {
        let mut db_path = None;
        let mut rest = Vec::with_capacity(args.len());
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if arg == "--db" {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--db requires a file path"))?;
                db_path = Some(PathBuf::from(crate::export::shellexpand(value)));
            } else if let Some(value) = arg.strip_prefix("--db=") {
                db_path = Some(PathBuf::from(crate::export::shellexpand(value)));
            } else {
                rest.push(arg.clone());
            }
        }

        Ok(Self {
            db_path,
            args: rest,
        })
    }

    /// True when a subcommand was given; otherwise the TUI starts.
    pub(crate) fn is_cli(&self) -> bool {
        self.args.len() > 1
    }

    /// `yojitsu.log` in the platform data directory, created on demand.
    pub(crate) fn log_path() -> Result<PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("com", "yojitsu", "Yojitsu")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(data_dir.join("yojitsu.log"))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
