use crate::{PathResolver, TreeError};
use std::path::{Component, Path, PathBuf};

/// Resolves asset paths against the extension's install directory.
pub struct BaseDirResolver {
    root: PathBuf,
}

impl BaseDirResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PathResolver for BaseDirResolver {
    fn resolve(&self, relative_path: &str) -> Result<String, TreeError> {
        let relative = Path::new(relative_path);

        // Assets must stay inside the extension root.
        let escapes_root = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));

        if relative_path.is_empty() || escapes_root {
            return Err(TreeError::AssetResolution {
                path: relative_path.to_string(),
                reason: "asset path must be relative to the extension root".to_string(),
            });
        }

        let joined = self.root.join(relative);

        joined
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| TreeError::AssetResolution {
                path: relative_path.to_string(),
                reason: "resolved path is not valid UTF-8".to_string(),
            })
    }
}
