//! Publish command implementation.

use std::path::PathBuf;

use clap::Parser;
use confpub_config::{Config, flatten_pages};
use confpub_confluence::{ConfluenceClient, PageSynchronizer, TracingReporter};

use crate::error::CliError;
use crate::output::Output;

/// Publish a page tree to Confluence from a YAML configuration.
#[derive(Parser)]
#[command(name = "confpub", version, about)]
pub(crate) struct PublishArgs {
    /// Path to the page-tree configuration file.
    pub(crate) config: PathBuf,

    /// Confluence base URL (overrides the config file).
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Root parent page id for the top-level pages.
    #[arg(long)]
    pub(crate) parent_id: Option<u64>,

    /// Check the tree structure without contacting the server.
    #[arg(long)]
    pub(crate) validate_only: bool,

    /// Confluence account username.
    #[arg(short, long, env = "CONFLUENCE_USERNAME")]
    pub(crate) username: Option<String>,

    /// Confluence account password or API token.
    #[arg(short, long, env = "CONFLUENCE_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the publish
    /// run fails.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let mut config = Config::from_yaml_file(&self.config)?;
        config.override_url(self.url.as_deref());

        let reporter = TracingReporter;

        if self.validate_only {
            PageSynchronizer::validate_only(&reporter)
                .synchronize(&mut config.pages, self.parent_id)?;

            let checked = flatten_pages(&config.pages).count();
            output.success(&format!(
                "Configuration is valid. {checked} page(s) checked."
            ));
            return Ok(());
        }

        let client = self.create_client(&config)?;
        output.info(&format!("Publishing {}...", self.config.display()));

        PageSynchronizer::new(&client, &reporter)
            .synchronize(&mut config.pages, self.parent_id)?;

        print_summary(output, &config);
        Ok(())
    }

    /// Build the Confluence client from the config URL and credentials.
    fn create_client(&self, config: &Config) -> Result<ConfluenceClient, CliError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| CliError::Validation("Confluence URL required (via config `url` or --url)".to_owned()))?;
        let username = self.username.as_deref().ok_or_else(|| {
            CliError::Validation("username required (via --username or CONFLUENCE_USERNAME)".to_owned())
        })?;
        let password = self.password.as_deref().ok_or_else(|| {
            CliError::Validation("password required (via --password or CONFLUENCE_PASSWORD)".to_owned())
        })?;

        Ok(ConfluenceClient::from_config(url, username, password))
    }
}

fn print_summary(output: &Output, config: &Config) {
    let (resolved, skipped) =
        flatten_pages(&config.pages).fold((0_usize, 0_usize), |(resolved, skipped), page| {
            if page.id.is_some() {
                (resolved + 1, skipped)
            } else {
                (resolved, skipped + 1)
            }
        });

    output.success(&format!("Done. {resolved} page(s) synchronized."));
    if skipped > 0 {
        output.warning(&format!(
            "{skipped} page(s) skipped, see warnings above."
        ));
    }
}
