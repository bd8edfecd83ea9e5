//! Pluggable per-title repacking policy.
//!
//! Which files to leave alone and which block footprint to target are
//! title-specific exceptions, not pipeline logic, so the traversal core
//! only sees them through [`RepackPolicy`].

use std::path::{Path, PathBuf};

use xnbrepack_xnb::SurfaceFormat;

/// Title-specific decisions injected into the pipeline.
pub trait RepackPolicy {
    /// Whether the files directly inside `dir` should be left untouched.
    ///
    /// Subdirectories are still traversed either way. `files` lists the
    /// plain files the directory contains.
    fn exclude_dir(&self, dir: &Path, files: &[PathBuf]) -> bool;

    /// Whether one specific file should be left untouched.
    fn exclude_file(&self, path: &Path) -> bool;

    /// Target surface format for a given file.
    fn target_format(&self, path: &Path) -> SurfaceFormat;

    /// Minimum width/height below which compressed-variant assets are
    /// skipped.
    fn min_dimension(&self) -> u32;
}

/// The known title exceptions, with configurable knobs.
#[derive(Debug, Clone)]
pub struct TitlePolicy {
    /// A directory containing any file whose name ends with this marker
    /// holds palette textures that must not be crunched.
    pub dir_marker: Option<String>,
    /// Relative path suffixes that are never converted.
    pub excluded_files: Vec<PathBuf>,
    /// Default target format.
    pub base_format: SurfaceFormat,
    /// Target format for large scenery textures on the compressed-variant
    /// path.
    pub oversize_format: SurfaceFormat,
    /// Path substrings that select `oversize_format` for `.zxnb` assets.
    pub oversize_hints: Vec<String>,
    /// Minimum dimension for compressed-variant assets.
    pub min_dimension: u32,
}

impl Default for TitlePolicy {
    fn default() -> Self {
        Self {
            dir_marker: Some("Palette.zxnb".to_string()),
            excluded_files: vec![PathBuf::from("gfx/parchment.xnb")],
            base_format: SurfaceFormat::Astc4x4Ext,
            oversize_format: SurfaceFormat::Astc5x5Ext,
            oversize_hints: ["Cutscenes", "Menu", "Level", "BG", "Tileset"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_dimension: 128,
        }
    }
}

impl RepackPolicy for TitlePolicy {
    fn exclude_dir(&self, _dir: &Path, files: &[PathBuf]) -> bool {
        let Some(marker) = &self.dir_marker else {
            return false;
        };
        files.iter().any(|f| {
            f.file_name()
                .map(|name| name.to_string_lossy().ends_with(marker))
                .unwrap_or(false)
        })
    }

    fn exclude_file(&self, path: &Path) -> bool {
        self.excluded_files.iter().any(|suffix| path.ends_with(suffix))
    }

    fn target_format(&self, path: &Path) -> SurfaceFormat {
        let is_zxnb = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("zxnb"))
            .unwrap_or(false);
        if is_zxnb {
            let text = path.to_string_lossy();
            if self.oversize_hints.iter().any(|hint| text.contains(hint)) {
                return self.oversize_format;
            }
        }
        self.base_format
    }

    fn min_dimension(&self) -> u32 {
        self.min_dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_marker() {
        let policy = TitlePolicy::default();
        let files = vec![
            PathBuf::from("/assets/chars/Hero.zxnb"),
            PathBuf::from("/assets/chars/HeroPalette.zxnb"),
        ];
        assert!(policy.exclude_dir(Path::new("/assets/chars"), &files));

        let files = vec![PathBuf::from("/assets/chars/Hero.zxnb")];
        assert!(!policy.exclude_dir(Path::new("/assets/chars"), &files));
    }

    #[test]
    fn test_excluded_file() {
        let policy = TitlePolicy::default();
        assert!(policy.exclude_file(Path::new("/content/gfx/parchment.xnb")));
        assert!(!policy.exclude_file(Path::new("/content/gfx/noise.xnb")));
    }

    #[test]
    fn test_target_format_hints() {
        let policy = TitlePolicy::default();
        assert_eq!(
            policy.target_format(Path::new("/content/Cutscenes/intro.zxnb")),
            SurfaceFormat::Astc5x5Ext
        );
        assert_eq!(
            policy.target_format(Path::new("/content/sprites/hero.zxnb")),
            SurfaceFormat::Astc4x4Ext
        );
        // Hints only apply to the compressed variant.
        assert_eq!(
            policy.target_format(Path::new("/content/Cutscenes/intro.xnb")),
            SurfaceFormat::Astc4x4Ext
        );
    }
}
