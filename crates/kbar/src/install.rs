// File: crates/kbar/src/install.rs
// Summary: Side-effecting font acquisition: package install + cache refresh, archive download.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::error::FontError;

/// Ways to get a CJK font onto the machine.
pub trait FontInstaller {
    /// Install the system package, then refresh the font cache.
    fn install_package(&mut self) -> Result<(), FontError>;

    /// Make sure the font archive is on disk; returns its path.
    fn download_archive(&mut self) -> Result<PathBuf, FontError>;
}

/// Runs the configured commands and fetches the configured URL.
#[derive(Clone, Debug)]
pub struct SystemInstaller {
    config: ResolverConfig,
}

impl SystemInstaller {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }
}

fn run(argv: &[String], purpose: &'static str) -> Result<(), FontError> {
    let (program, args) = argv.split_first().ok_or(FontError::EmptyCommand { purpose })?;
    debug!(command = %argv.join(" "), purpose, "running");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| FontError::Spawn { program: program.clone(), source })?;
    if !output.status.success() {
        return Err(FontError::CommandFailed {
            command: argv.join(" "),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

impl FontInstaller for SystemInstaller {
    fn install_package(&mut self) -> Result<(), FontError> {
        run(&self.config.install_command, "font package install")?;
        run(&self.config.cache_refresh_command, "font cache refresh")?;
        info!("font package installed and cache refreshed");
        Ok(())
    }

    fn download_archive(&mut self) -> Result<PathBuf, FontError> {
        let path = self.config.archive_path.clone();
        if path.exists() {
            debug!(path = %path.display(), "font archive already present");
            return Ok(path);
        }
        let bytes = fetch(&self.config.archive_url)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), url = %self.config.archive_url, "downloaded font archive");
        Ok(path)
    }
}

#[cfg(feature = "fetch")]
fn fetch(url: &str) -> Result<Vec<u8>, FontError> {
    let download = |reason: String| FontError::Download { url: url.to_string(), reason };
    let response = reqwest::blocking::Client::new()
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| download(e.to_string()))?;
    response.bytes().map(|b| b.to_vec()).map_err(|e| download(e.to_string()))
}

#[cfg(not(feature = "fetch"))]
fn fetch(_url: &str) -> Result<Vec<u8>, FontError> {
    Err(FontError::FetchDisabled)
}
