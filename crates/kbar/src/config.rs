// File: crates/kbar/src/config.rs
// Summary: Font resolver configuration (priority tables, archive location, install commands).
//
// Every field has a built-in default, so a TOML snippet only needs the keys it
// overrides:
//
// ```toml
// generic_fallback = "WenQuanYi Micro Hei"
// install_command = ["apt-get", "install", "-y", "fonts-noto-cjk"]
// ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Traditional Chinese UI family shipped with Windows.
    pub windows_family: String,
    /// Traditional Chinese UI family shipped with macOS.
    pub macos_family: String,
    /// Noto CJK families looked for on Linux, in order.
    pub linux_families: Vec<String>,
    /// Family names a freshly registered Noto archive may expose, in order.
    pub archive_families: Vec<String>,
    /// Ordered fallback chain appended by `check_font`.
    pub fallback_families: Vec<String>,
    /// Returned alone when nothing in the fallback chain is registered.
    pub generic_fallback: String,
    pub archive_url: String,
    pub archive_path: PathBuf,
    /// argv for the package-manager install.
    pub install_command: Vec<String>,
    /// argv for the font cache refresh that follows a successful install.
    pub cache_refresh_command: Vec<String>,
    /// Default sans-serif list the chosen font is prepended to.
    pub base_sans_serif: Vec<String>,
    /// Families dropped from `base_sans_serif` before prepending.
    pub excluded_families: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let strings = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            windows_family: "Microsoft JhengHei".into(),
            macos_family: "PingFang TC".into(),
            linux_families: strings(&["Noto Sans CJK TC", "Noto Sans CJK JP", "Noto Sans CJK SC"]),
            archive_families: strings(&[
                "Noto Sans CJK TC",
                "Noto Sans CJK JP",
                "Noto Sans CJK SC",
                "Noto Sans CJK KR",
                "Noto Sans CJK",
            ]),
            fallback_families: strings(&[
                "Microsoft JhengHei",
                "PingFang TC",
                "Noto Sans CJK TC",
                "Noto Sans CJK JP",
                "Noto Sans CJK SC",
                "DejaVu Sans",
                "Liberation Sans",
                "Arial",
                "sans-serif",
            ]),
            generic_fallback: "DejaVu Sans".into(),
            archive_url: "https://github.com/googlefonts/noto-cjk/raw/main/Sans/OTC/NotoSansCJK-Regular.ttc".into(),
            archive_path: PathBuf::from("/content/NotoSansCJK-Regular.ttc"),
            install_command: strings(&["sudo", "apt-get", "install", "-y", "fonts-noto-cjk"]),
            cache_refresh_command: strings(&["fc-cache", "-fv"]),
            base_sans_serif: strings(&[
                "DejaVu Sans",
                "Bitstream Vera Sans",
                "Computer Modern Sans Serif",
                "Lucida Grande",
                "Verdana",
                "Geneva",
                "Lucid",
                "Arial",
                "Helvetica",
                "Avant Garde",
                "sans-serif",
            ]),
            excluded_families: strings(&["SimHei"]),
        }
    }
}

impl ResolverConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Platform CJK families in detection order: Windows, macOS, then Linux.
    pub fn platform_families(&self) -> impl Iterator<Item = &str> {
        [self.windows_family.as_str(), self.macos_family.as_str()]
            .into_iter()
            .chain(self.linux_families.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ResolverConfig::from_toml_str(
            r#"
            generic_fallback = "WenQuanYi Micro Hei"
            archive_path = "/tmp/noto.ttc"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.generic_fallback, "WenQuanYi Micro Hei");
        assert_eq!(cfg.archive_path, PathBuf::from("/tmp/noto.ttc"));
        assert_eq!(cfg.windows_family, "Microsoft JhengHei");
        assert_eq!(cfg.fallback_families.len(), 9);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(ResolverConfig::from_toml_str("install_command = 3").is_err());
    }

    #[test]
    fn platform_order_is_windows_mac_linux() {
        let cfg = ResolverConfig::default();
        let order: Vec<_> = cfg.platform_families().collect();
        assert_eq!(order[0], "Microsoft JhengHei");
        assert_eq!(order[1], "PingFang TC");
        assert_eq!(&order[2..], &["Noto Sans CJK TC", "Noto Sans CJK JP", "Noto Sans CJK SC"]);
    }
}
