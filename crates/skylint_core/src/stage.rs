//! Disposable runtime filesystem staging.
//!
//! Every validator invocation gets its own isolated config root (with
//! `saves/` and `plugins/`) and a resources root, either the caller's real
//! tree or a synthesized minimal skeleton. A caller-supplied plugin
//! directory is symlinked into the config's `plugins/` folder under a fixed
//! temporary name so the game loads it without copying.
//!
//! [`StagedFilesystem`] is an RAII guard: everything it created is removed
//! when it drops, on every exit path. Removal order is the plugin symlink
//! first (so directory removal never traverses into caller-owned data),
//! then the config root, then any synthesized resources root.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::LintError;

/// Fixed name of the staged plugin symlink inside `config/plugins/`.
///
/// The `zzz` prefix keeps it last in the game's alphabetical plugin load
/// order.
pub const TEMP_PLUGIN_NAME: &str = "zzzTemp";

/// What to stage for one invocation.
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    /// Existing resources tree to use verbatim. When unset, a throwaway
    /// skeleton is synthesized.
    pub resources: Option<PathBuf>,
    /// Plugin directory to symlink into the staged config. Must exist.
    pub plugin_dir: Option<PathBuf>,
}

impl StageOptions {
    /// Options for validating an existing resources tree.
    pub fn for_resources(resources: impl Into<PathBuf>) -> Self {
        Self {
            resources: Some(resources.into()),
            plugin_dir: None,
        }
    }

    /// Options for validating a plugin against a synthesized resources
    /// skeleton.
    pub fn for_plugin(plugin_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources: None,
            plugin_dir: Some(plugin_dir.into()),
        }
    }
}

/// Removes the staged plugin symlink on drop.
#[derive(Debug)]
struct PluginLink {
    path: PathBuf,
}

impl Drop for PluginLink {
    fn drop(&mut self) {
        let result = if cfg!(windows) {
            // Directory symlinks are directory entries on Windows.
            fs::remove_dir(&self.path)
        } else {
            fs::remove_file(&self.path)
        };
        if let Err(e) = result {
            warn!("failed to remove staged plugin link {}: {}", self.path.display(), e);
        }
    }
}

/// The resources root for one invocation.
#[derive(Debug)]
enum ResourcesRoot {
    /// Caller-owned tree, used verbatim and never removed.
    Caller(PathBuf),
    /// Synthesized skeleton, removed on drop.
    Synthesized(TempDir),
}

impl ResourcesRoot {
    fn path(&self) -> &Path {
        match self {
            Self::Caller(path) => path,
            Self::Synthesized(dir) => dir.path(),
        }
    }
}

/// One disposable runtime sandbox.
///
/// Valid only while the value is alive; dropping it tears everything down.
/// Field order is load-bearing: the plugin symlink is removed before the
/// config root, which is removed before a synthesized resources root.
#[derive(Debug)]
pub struct StagedFilesystem {
    plugin_link: Option<PluginLink>,
    config: TempDir,
    resources: ResourcesRoot,
}

impl StagedFilesystem {
    /// Stages a fresh sandbox per `options`.
    ///
    /// Uses uniquely-named temp directories, so concurrent stagings never
    /// collide. Fails with [`LintError::InvalidInput`] when `plugin_dir`
    /// does not exist, before creating anything.
    pub fn stage(options: &StageOptions) -> Result<Self, LintError> {
        if let Some(plugin_dir) = &options.plugin_dir
            && !plugin_dir.exists()
        {
            return Err(LintError::invalid_input(format!(
                "bad plugin directory path: {}",
                plugin_dir.display()
            )));
        }

        let config = tempfile::Builder::new()
            .prefix("skylint-config-")
            .tempdir()
            .map_err(|e| LintError::staging(format!("failed to create config root: {e}")))?;
        for sub in ["saves", "plugins"] {
            fs::create_dir(config.path().join(sub))
                .map_err(|e| LintError::staging(format!("failed to create {sub}/: {e}")))?;
        }

        let plugin_link = match &options.plugin_dir {
            Some(plugin_dir) => Some(Self::link_plugin(config.path(), plugin_dir)?),
            None => None,
        };

        let resources = match &options.resources {
            Some(resources) => ResourcesRoot::Caller(resources.clone()),
            None => ResourcesRoot::Synthesized(Self::synthesize_resources()?),
        };

        let staged = Self {
            plugin_link,
            config,
            resources,
        };
        debug!(
            config = %staged.config_root().display(),
            resources = %staged.resources_root().display(),
            "staged filesystem ready"
        );
        Ok(staged)
    }

    fn link_plugin(config_root: &Path, plugin_dir: &Path) -> Result<PluginLink, LintError> {
        // Absolute but not canonicalized: resolving symlinks here would
        // break reverse mapping when the plugin dir is itself a symlink.
        let target = std::path::absolute(plugin_dir)
            .map_err(|e| LintError::staging(format!("failed to resolve plugin path: {e}")))?;
        let link = config_root.join("plugins").join(TEMP_PLUGIN_NAME);

        #[cfg(unix)]
        std::os::unix::fs::symlink(&target, &link)
            .map_err(|e| LintError::staging(format!("failed to link plugin: {e}")))?;
        #[cfg(windows)]
        std::os::windows::fs::symlink_dir(&target, &link)
            .map_err(|e| LintError::staging(format!("failed to link plugin: {e}")))?;

        Ok(PluginLink { path: link })
    }

    /// Creates a throwaway resources root with the minimal subtree the game
    /// requires to recognize a valid resource tree.
    fn synthesize_resources() -> Result<TempDir, LintError> {
        let dir = tempfile::Builder::new()
            .prefix("skylint-resources-")
            .tempdir()
            .map_err(|e| LintError::staging(format!("failed to create resources root: {e}")))?;
        for sub in ["data", "sounds", "images"] {
            fs::create_dir(dir.path().join(sub))
                .map_err(|e| LintError::staging(format!("failed to create {sub}/: {e}")))?;
        }
        fs::write(dir.path().join("credits.txt"), "skylint staged resources\n")
            .map_err(|e| LintError::staging(format!("failed to write credits.txt: {e}")))?;
        Ok(dir)
    }

    /// The staged config root, containing `saves/` and `plugins/`.
    pub fn config_root(&self) -> &Path {
        self.config.path()
    }

    /// The resources root handed to the validator.
    pub fn resources_root(&self) -> &Path {
        self.resources.path()
    }

    /// Path of the plugin symlink, when a plugin was staged. The validator
    /// reports data-file paths under this link, not the caller's real
    /// directory.
    pub fn staged_plugin(&self) -> Option<&Path> {
        self.plugin_link.as_ref().map(|link| link.path.as_path())
    }
}
