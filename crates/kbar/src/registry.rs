// File: crates/kbar/src/registry.rs
// Summary: Font registry abstraction over Skia's font manager, plus a fixed in-memory registry.

use std::collections::BTreeSet;
use std::path::Path;

use kbar_core::FontCollection;
use skia_safe as skia;
use skia::textlayout::TypefaceFontProvider;
use tracing::debug;

use crate::error::FontError;

/// Read/extend the set of font families text rendering can use.
pub trait FontRegistry {
    fn family_names(&self) -> BTreeSet<String>;

    fn contains(&self, family: &str) -> bool {
        self.family_names().contains(family)
    }

    /// Register every face in a TTF/OTF/TTC file; returns the family names added.
    fn add_font_file(&mut self, path: &Path) -> Result<Vec<String>, FontError>;

    /// Rescan installed fonts (after a package install or cache refresh).
    fn reload(&mut self);

    /// Collection handed to the text shaper so that registered fonts draw.
    fn font_collection(&self) -> FontCollection;
}

/// System fonts through `FontMgr`, plus fonts registered at runtime.
pub struct SkiaFontRegistry {
    system: skia::FontMgr,
    provider: TypefaceFontProvider,
    added: BTreeSet<String>,
}

impl SkiaFontRegistry {
    pub fn new() -> Self {
        Self { system: skia::FontMgr::new(), provider: TypefaceFontProvider::new(), added: BTreeSet::new() }
    }
}

impl Default for SkiaFontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry for SkiaFontRegistry {
    fn family_names(&self) -> BTreeSet<String> {
        let mut names: BTreeSet<String> = self.system.family_names().collect();
        names.extend(self.added.iter().cloned());
        names
    }

    fn add_font_file(&mut self, path: &Path) -> Result<Vec<String>, FontError> {
        if !path.exists() {
            return Err(FontError::MissingFile { path: path.to_path_buf() });
        }
        let bytes = std::fs::read(path)?;
        let mut families = Vec::new();
        let mut faces = 0usize;
        // TTC collections hold several faces; walk them until the manager gives up.
        while let Some(typeface) = self.system.new_from_data(skia_safe::Data::new_copy(&bytes), faces as u32) {
            faces += 1;
            let family = typeface.family_name();
            self.provider.register_typeface(typeface, None::<&str>);
            if self.added.insert(family.clone()) {
                families.push(family);
            }
        }
        if faces == 0 {
            return Err(FontError::NoTypeface { path: path.to_path_buf() });
        }
        debug!(path = %path.display(), ?families, "registered font file");
        Ok(families)
    }

    fn reload(&mut self) {
        self.system = skia::FontMgr::new();
        debug!(families = self.system.count_families(), "reloaded system font manager");
    }

    fn font_collection(&self) -> FontCollection {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(self.system.clone(), None);
        if !self.added.is_empty() {
            fc.set_asset_font_manager(Some(skia::FontMgr::from(self.provider.clone())));
        }
        fc
    }
}

/// Fixed set of family names. Rendering falls back to the system manager.
#[derive(Clone, Debug, Default)]
pub struct StaticFontRegistry {
    families: BTreeSet<String>,
    /// Families that become visible on the next `reload` (simulates an install).
    pending: BTreeSet<String>,
}

impl StaticFontRegistry {
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { families: families.into_iter().map(Into::into).collect(), pending: BTreeSet::new() }
    }

    /// Families that appear once `reload` is called.
    pub fn with_pending<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending = families.into_iter().map(Into::into).collect();
        self
    }
}

impl FontRegistry for StaticFontRegistry {
    fn family_names(&self) -> BTreeSet<String> {
        self.families.clone()
    }

    /// Registers whatever was staged with `with_pending`; the file must exist.
    fn add_font_file(&mut self, path: &Path) -> Result<Vec<String>, FontError> {
        if !path.exists() {
            return Err(FontError::MissingFile { path: path.to_path_buf() });
        }
        let added: Vec<String> = self.pending.iter().filter(|f| !self.families.contains(*f)).cloned().collect();
        self.families.append(&mut self.pending);
        Ok(added)
    }

    fn reload(&mut self) {
        self.families.append(&mut self.pending);
    }

    fn font_collection(&self) -> FontCollection {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        fc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_registry_reload_reveals_pending() {
        let mut reg = StaticFontRegistry::new(["DejaVu Sans"]).with_pending(["Noto Sans CJK TC"]);
        assert!(!reg.contains("Noto Sans CJK TC"));
        reg.reload();
        assert!(reg.contains("Noto Sans CJK TC"));
        assert!(reg.contains("DejaVu Sans"));
    }

    #[test]
    fn static_registry_requires_existing_file() {
        let mut reg = StaticFontRegistry::default();
        let err = reg.add_font_file(Path::new("/definitely/not/here.ttc")).unwrap_err();
        assert!(matches!(err, FontError::MissingFile { .. }));
    }

    #[test]
    fn skia_registry_rejects_non_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.ttc");
        std::fs::write(&path, b"not a font").unwrap();
        let mut reg = SkiaFontRegistry::new();
        assert!(matches!(reg.add_font_file(&path), Err(FontError::NoTypeface { .. })));
    }
}
