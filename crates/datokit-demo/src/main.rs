// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Datokit demo - registers a sample plugin and dumps what a host would see.

mod plugin;
mod sdk;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use datokit::{PluginKit, PluginOptions};
use datokit_config::KitConfig;
use datokit_core::{KitError, Node};

use crate::sdk::{JsonDumpSdk, sample_ctx};

/// Datokit demo - registers a sample plugin against a stand-in host.
#[derive(Parser, Debug)]
#[command(name = "datokit-demo", version, about, long_about = None)]
struct Cli {
    /// Path to a datokit.toml to load instead of the default locations.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => datokit_config::load_and_validate_path(path),
        None => datokit_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            datokit_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level);

    if let Err(e) = run(&config).await {
        tracing::error!(error = %e, "demo failed");
        eprintln!("datokit-demo: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &KitConfig) -> Result<(), KitError> {
    let kit = PluginKit::new(build_options(config))?;
    plugin::register(&kit)?;
    tracing::info!(
        mode = %kit.duplicate_id_handling(),
        hooks = kit.parameters().installed_hooks().len(),
        "demo plugin registered"
    );

    let sdk = JsonDumpSdk::new(sample_ctx(), "model-article");
    kit.connect(&sdk).await
}

fn build_options(config: &KitConfig) -> PluginOptions {
    PluginOptions::from_config(config).render(Arc::new(|node: Node| -> Result<(), KitError> {
        let markup = node.to_markup();
        tracing::debug!(bytes = markup.len(), "rendered component");
        println!("{markup}");
        Ok(())
    }))
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("datokit={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use datokit_core::DuplicateIdHandling;

    #[test]
    fn cli_accepts_config_and_log_level() {
        let cli = Cli::parse_from(["datokit-demo", "--config", "demo.toml", "--log-level", "debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("demo.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn options_follow_config() {
        let config = datokit_config::load_and_validate_str(
            "[plugin]\nduplicate_id_handling = \"throw\"\n",
        )
        .unwrap();
        let kit = PluginKit::new(build_options(&config)).unwrap();
        assert_eq!(kit.duplicate_id_handling(), DuplicateIdHandling::Throw);
    }

    #[tokio::test]
    async fn run_connects_with_defaults() {
        let config = datokit_config::load_and_validate_str("").unwrap();
        run(&config).await.unwrap();
    }
}
