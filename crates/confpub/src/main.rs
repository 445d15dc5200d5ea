//! confpub CLI - Confluence page-tree publisher.
//!
//! Reads a versioned YAML page-tree configuration and materializes it
//! against a Confluence instance, creating missing pages idempotently.
//! `--validate-only` checks the tree structure without contacting the
//! server.

mod error;
mod output;
mod publish;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::Output;
use publish::PublishArgs;

fn main() {
    let args = PublishArgs::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = args.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
