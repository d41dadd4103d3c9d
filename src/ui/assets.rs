//! Filesystem-based asset source for loading the piece sprites.

use gpui::{AssetSource, SharedString};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-based asset source that looks for assets in multiple locations:
/// the configured asset root, the executable's directory, then the cwd.
pub struct FileAssets {
    roots: Vec<PathBuf>,
}

impl FileAssets {
    pub fn new(asset_root: Option<PathBuf>) -> Self {
        let mut roots: Vec<PathBuf> = asset_root.into_iter().collect();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            roots.push(exe_dir);
        }
        if let Ok(cwd) = std::env::current_dir() {
            roots.push(cwd);
        }
        Self { roots }
    }

    /// First existing file or directory for `path` across the roots
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(path))
            .find(|candidate| candidate.exists())
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        match self.resolve(path) {
            Some(file) => Ok(Some(Cow::Owned(fs::read(file)?))),
            None => {
                log::warn!("Asset not found: {}", path);
                Ok(None)
            }
        }
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let mut results = Vec::new();

        if let Some(dir_path) = self.resolve(path) {
            for entry in fs::read_dir(&dir_path)?.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    results.push(SharedString::from(name.to_string()));
                }
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chess-assets-{}-{}", name, std::process::id()));
        fs::create_dir_all(dir.join("sprites")).unwrap();
        dir
    }

    #[test]
    fn test_configured_root_wins() {
        let dir = scratch_dir("load");
        fs::write(dir.join("sprites/wQ.png"), b"queen").unwrap();
        let assets = FileAssets {
            roots: vec![dir.clone()],
        };

        let data = assets.load("sprites/wQ.png").unwrap().unwrap();
        assert_eq!(&*data, b"queen");
        assert!(assets.load("sprites/bK.png").unwrap().is_none());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_list_sprites() {
        let dir = scratch_dir("list");
        fs::write(dir.join("sprites/bN.png"), b"knight").unwrap();
        let assets = FileAssets {
            roots: vec![PathBuf::from("/nonexistent-root"), dir.clone()],
        };

        let names = assets.list("sprites").unwrap();
        assert_eq!(names, vec![SharedString::from("bN.png")]);
        fs::remove_dir_all(dir).ok();
    }
}
