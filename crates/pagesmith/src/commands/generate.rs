//! `pagesmith generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use pagesmith_client::CmsClient;
use pagesmith_config::{CliSettings, Config};
use pagesmith_content::{GenerateReport, Generator};
use pagesmith_storage::FsStore;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover pagesmith.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CMS API base URL (overrides config).
    #[arg(long, env = "PAGESMITH_BASE_URL")]
    base_url: Option<String>,

    /// Directory for generated documents (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory for JSON data files (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or generation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_url: self.base_url,
            content_dir: self.content_dir,
            data_dir: self.data_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!("Fetching from {}...", config.api.base_url));
        let client = CmsClient::new(
            &config.api.base_url,
            config.api.token.as_deref(),
            config.api.timeout_secs,
        );
        let store = FsStore::new(config.root_dir.clone());

        let report = Generator::new(&client, &store, &config).run()?;
        print_report(&output, &report, &config);
        Ok(())
    }
}

fn print_report(output: &Output, report: &GenerateReport, config: &Config) {
    output.success(&format!(
        "Generated content into {}",
        config
            .root_dir
            .join(&config.output_resolved.content_dir)
            .display()
    ));
    output.stat("Languages", report.languages.join(", "));
    output.stat("Pages written", report.pages_written);
    output.stat("Pages skipped", report.pages_skipped);
    output.stat("Directory markers", report.markers_written);

    if report.unresolved_templates > 0 {
        output.warning(&format!(
            "{} page(s) kept as unresolved templates; add a [dynamic_pages.<entity>] resolver to expand them",
            report.unresolved_templates
        ));
    }
}
