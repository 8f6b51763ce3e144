// File: crates/kbar/tests/common/mod.rs
// Purpose: Shared fixtures: the four-day OHLCV frame and a recording fake installer.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::NaiveDate;
use kbar::{
    date_range, FontError, FontInstaller, FontResolver, HostEnvironment, OhlcvFrame, ResolverConfig,
    StaticFontRegistry,
};

pub fn four_day_frame() -> OhlcvFrame {
    OhlcvFrame::new(
        date_range(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 4),
        vec![100.0, 102.0, 101.0, 105.0],
        vec![103.0, 106.0, 104.0, 108.0],
        vec![99.0, 100.0, 98.0, 102.0],
        vec![102.0, 104.0, 103.0, 107.0],
        Some(vec![1000.0, 1500.0, 1200.0, 1300.0]),
    )
    .expect("valid frame")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Install,
    Download,
}

/// Fake installer that records calls and replays canned outcomes.
#[derive(Clone)]
pub struct RecordingInstaller {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub install_fails: bool,
    pub archive: Option<PathBuf>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self { calls: Rc::new(RefCell::new(Vec::new())), install_fails: false, archive: None }
    }
}

impl FontInstaller for RecordingInstaller {
    fn install_package(&mut self) -> Result<(), FontError> {
        self.calls.borrow_mut().push(Call::Install);
        if self.install_fails {
            return Err(FontError::CommandFailed {
                command: "sudo apt-get install -y fonts-noto-cjk".into(),
                status: "exit status: 100".into(),
                stderr: "E: Unable to locate package".into(),
            });
        }
        Ok(())
    }

    fn download_archive(&mut self) -> Result<PathBuf, FontError> {
        self.calls.borrow_mut().push(Call::Download);
        self.archive.clone().ok_or(FontError::FetchDisabled)
    }
}

pub fn resolver(registry: StaticFontRegistry, installer: RecordingInstaller, host: HostEnvironment) -> FontResolver {
    FontResolver::new(Box::new(registry), Box::new(installer), host, ResolverConfig::default())
}

/// Resolver whose registry holds only Western fallbacks and never installs.
pub fn western_resolver() -> FontResolver {
    resolver(
        StaticFontRegistry::new(["DejaVu Sans", "Liberation Sans"]),
        RecordingInstaller::new(),
        HostEnvironment::Other,
    )
}
