// File: crates/kbar/src/resolver.rs
// Summary: CJK font detection/installation and the fallback-ordered font candidate list.

use std::fmt;

use kbar_core::FontCollection;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::error::FontError;
use crate::host::HostEnvironment;
use crate::install::{FontInstaller, SystemInstaller};
use crate::registry::{FontRegistry, SkiaFontRegistry};

/// How a missing font was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallMethod {
    /// System package manager followed by a font cache refresh.
    Package,
    /// Archive downloaded and registered at runtime.
    Download,
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMethod::Package => f.write_str("package"),
            InstallMethod::Download => f.write_str("download"),
        }
    }
}

/// Outcome of `FontResolver::detect`.
#[derive(Debug)]
pub enum FontResolution {
    /// Already registered; nothing was installed.
    Found(String),
    Installed { family: String, method: InstallMethod },
    /// No install path for this host, or the install finished without a matching family.
    NotFound,
    /// An install/download/registration step failed.
    Failed(FontError),
}

impl FontResolution {
    pub fn family(&self) -> Option<&str> {
        match self {
            FontResolution::Found(family) | FontResolution::Installed { family, .. } => Some(family),
            FontResolution::NotFound | FontResolution::Failed(_) => None,
        }
    }

    pub fn into_family(self) -> Option<String> {
        match self {
            FontResolution::Found(family) | FontResolution::Installed { family, .. } => Some(family),
            FontResolution::NotFound | FontResolution::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FontResolution::Failed(_))
    }
}

pub struct FontResolver {
    registry: Box<dyn FontRegistry>,
    installer: Box<dyn FontInstaller>,
    host: HostEnvironment,
    config: ResolverConfig,
}

impl FontResolver {
    pub fn new(
        registry: Box<dyn FontRegistry>,
        installer: Box<dyn FontInstaller>,
        host: HostEnvironment,
        config: ResolverConfig,
    ) -> Self {
        Self { registry, installer, host, config }
    }

    /// Skia registry, real installer and the detected host, all with the given config.
    pub fn system_with_config(config: ResolverConfig) -> Self {
        Self::new(
            Box::new(SkiaFontRegistry::new()),
            Box::new(SystemInstaller::new(config.clone())),
            HostEnvironment::detect(),
            config,
        )
    }

    pub fn system() -> Self {
        Self::system_with_config(ResolverConfig::default())
    }

    pub fn host(&self) -> HostEnvironment {
        self.host
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn FontRegistry {
        self.registry.as_ref()
    }

    pub fn font_collection(&self) -> FontCollection {
        self.registry.font_collection()
    }

    fn first_registered<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
        let names = self.registry.family_names();
        candidates.into_iter().find(|c| names.contains(*c)).map(str::to_string)
    }

    /// Find a CJK family, installing one when the host allows it.
    pub fn detect(&mut self) -> FontResolution {
        if let Some(family) = self.first_registered(self.config.platform_families()) {
            info!(%family, "found CJK font");
            return FontResolution::Found(family);
        }
        info!(host = ?self.host, "no CJK font registered");
        match self.host {
            HostEnvironment::NotebookHosted => self.install_from_archive(),
            HostEnvironment::DesktopLinux => self.install_from_package(),
            HostEnvironment::Other => {
                warn!("no CJK font found and no install method for this host");
                FontResolution::NotFound
            }
        }
    }

    fn install_from_archive(&mut self) -> FontResolution {
        info!("notebook host, fetching Noto CJK archive");
        let path = match self.installer.download_archive() {
            Ok(path) => path,
            Err(err) => {
                warn!(error = %err, "font archive download failed");
                return FontResolution::Failed(err);
            }
        };
        if let Err(err) = self.registry.add_font_file(&path) {
            warn!(error = %err, path = %path.display(), "font archive registration failed");
            return FontResolution::Failed(err);
        }
        self.registry.reload();

        let archive = self.config.archive_families.iter().map(String::as_str);
        match self.first_registered(archive) {
            Some(family) => {
                info!(%family, "registered CJK font from archive");
                FontResolution::Installed { family, method: InstallMethod::Download }
            }
            None => {
                let seen: Vec<String> = self
                    .registry
                    .family_names()
                    .into_iter()
                    .filter(|f| f.contains("Noto") || f.contains("CJK"))
                    .collect();
                warn!(?seen, "archive registered but no expected family matched");
                FontResolution::NotFound
            }
        }
    }

    fn install_from_package(&mut self) -> FontResolution {
        info!("linux host, installing fonts-noto-cjk");
        if let Err(err) = self.installer.install_package() {
            warn!(error = %err, "font package install failed");
            return FontResolution::Failed(err);
        }
        self.registry.reload();

        let linux = self.config.linux_families.iter().map(String::as_str);
        match self.first_registered(linux) {
            Some(family) => {
                info!(%family, "installed CJK font");
                FontResolution::Installed { family, method: InstallMethod::Package }
            }
            None => {
                warn!("package installed but no Noto CJK family is registered");
                FontResolution::NotFound
            }
        }
    }

    /// Fallback-ordered font candidates, preferred font first. Never empty.
    pub fn check_font(&self, font: Option<&str>) -> Vec<String> {
        let names = self.registry.family_names();
        let mut candidates: Vec<String> = Vec::new();

        match font.filter(|f| !f.is_empty()) {
            Some(f) if names.contains(f) => {
                info!(font = f, "using requested font");
                candidates.push(f.to_string());
            }
            Some(f) => warn!(font = f, "requested font is not registered, falling back"),
            None => {}
        }

        for fallback in &self.config.fallback_families {
            if names.contains(fallback) && !candidates.contains(fallback) {
                candidates.push(fallback.clone());
            }
        }

        if candidates.is_empty() {
            warn!(fallback = %self.config.generic_fallback, "no candidate font registered");
            return vec![self.config.generic_fallback.clone()];
        }
        debug!(total = candidates.len(), "font candidates");
        info!(candidates = ?&candidates[..candidates.len().min(3)], "font candidates");
        candidates
    }
}

impl fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResolver")
            .field("host", &self.host)
            .field("families", &self.registry.family_names().len())
            .finish_non_exhaustive()
    }
}

/// `FontResolver::detect` on the running host, collapsed to the family name.
pub fn detect_font() -> Option<String> {
    FontResolver::system().detect().into_family()
}

/// `FontResolver::check_font` against the system font registry.
pub fn check_font(font: Option<&str>) -> Vec<String> {
    FontResolver::system().check_font(font)
}
