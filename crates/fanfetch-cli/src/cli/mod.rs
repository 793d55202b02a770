//! CLI for the fanfetch downloader.

mod report;

use anyhow::Result;
use clap::Parser;
use fanfetch_core::config::{self, FetchConfig};
use fanfetch_core::error::FetchError;
use fanfetch_core::fetcher;
use std::path::PathBuf;

use report::{print_completion, print_result, print_usage};

/// Top-level CLI: download every URL into a local file, in parallel.
#[derive(Debug, Parser)]
#[command(name = "fanfetch")]
#[command(about = "fanfetch: download URLs to local files concurrently", long_about = None)]
pub struct Cli {
    /// HTTP/HTTPS URLs to download. Each is saved under the last segment of its path.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Run at most N downloads at once (default: one per URL).
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Directory to save files in (default: current directory).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Abort a single download after SECS seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write straight to the destination; a failed download may leave a truncated file.
    #[arg(long)]
    pub keep_partial: bool,

    /// Do not rename URLs that map to the same filename (they overwrite each other).
    #[arg(long)]
    pub no_dedupe: bool,

    /// Download one URL at a time instead of in parallel.
    #[arg(long)]
    pub sequential: bool,

    /// Read settings from this file instead of ~/.config/fanfetch/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse arguments and run. Returns the process exit status.
    pub fn run_from_args() -> Result<u8> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<u8> {
        if self.urls.is_empty() {
            print_usage();
            return Ok(1);
        }
        let mut cfg = config::load(self.config.as_deref())?;
        self.apply_overrides(&mut cfg);
        tracing::debug!("effective config: {:?}", cfg);

        let outcome = if self.sequential {
            fetcher::retrieve_sequential(&self.urls, &cfg, print_result)
        } else {
            fetcher::retrieve_all(&self.urls, &cfg, print_result)
        };

        match outcome {
            Ok(results) => {
                let failed = results.iter().filter(|r| !r.succeeded()).count();
                tracing::info!(total = results.len(), failed, "all downloads complete");
                print_completion();
                // Individual failures do not change the exit status.
                Ok(0)
            }
            Err(FetchError::NoLocators) => {
                print_usage();
                Ok(1)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Command-line flags win over the config file.
    fn apply_overrides(&self, cfg: &mut FetchConfig) {
        if let Some(jobs) = self.jobs {
            cfg.max_concurrent = Some(jobs.max(1));
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = Some(dir.clone());
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = Some(secs);
        }
        if self.keep_partial {
            cfg.keep_partial = true;
        }
        if self.no_dedupe {
            cfg.dedupe_names = false;
        }
    }
}

#[cfg(test)]
mod tests;
