//! CLI for albumgrab.

mod commands;

use albumgrab_core::config::{self, Overrides, Password};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_fetch, run_show_config};

/// Top-level CLI for albumgrab.
#[derive(Debug, Parser)]
#[command(name = "albumgrab")]
#[command(about = "Download full-size images from a password-protected photo album", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Log into the album and save every full-size image.
    Fetch {
        /// Album page URL (overrides `album_url` in the config).
        album_url: Option<String>,

        /// Album password (overrides `password` in the config).
        #[arg(long, env = "ALBUMGRAB_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Destination folder, created if absent.
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Filename prefix: files are named `<prefix>_<n>_de_<total>.<ext>`.
        #[arg(long, value_name = "NAME")]
        prefix: Option<String>,

        /// Run the browser without a window.
        #[arg(long)]
        headless: bool,
    },

    /// Show the config file path and effective values.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                album_url,
                password,
                dest,
                prefix,
                headless,
            } => {
                let overrides = Overrides {
                    album_url,
                    password: password.map(Password::new),
                    dest_folder: dest,
                    file_prefix: prefix,
                    headless: headless.then_some(true),
                };
                run_fetch(&cfg, overrides)?;
            }
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
