//! `pagesmith nav` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use pagesmith_nav::{NavNode, NavPage, build_navigation, build_navigation_strict};

use crate::error::CliError;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Path to a generated `pages.json`.
    pages_file: PathBuf,

    /// Fail on pages that break the ordering the tree depends on.
    #[arg(long)]
    strict: bool,
}

impl NavArgs {
    /// Execute the nav command, printing the tree as JSON to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or, in strict
    /// mode, if the page list is out of order.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let tree = load_tree(&self.pages_file, self.strict)?;
        let json = serde_json::to_string_pretty(&tree)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        Ok(())
    }
}

fn load_tree(path: &Path, strict: bool) -> Result<Vec<NavNode>, CliError> {
    let text = std::fs::read_to_string(path)?;
    let pages: Vec<NavPage> = serde_json::from_str(&text)?;
    if strict {
        Ok(build_navigation_strict(&pages)?)
    } else {
        Ok(build_navigation(&pages))
    }
}
