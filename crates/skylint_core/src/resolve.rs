//! Path classification: core game data vs third-party plugin.
//!
//! Both trees share the same internal shape (a `data/` directory of text
//! files), so classification walks the path's components for the last one
//! literally named `data` and inspects the directory above it for the
//! marker files that identify an installed or checked-out copy of the core
//! game data. A best-effort filesystem heuristic, not a guarantee: a
//! directory merely named `data` with the right marker files nearby is
//! indistinguishable from the real thing.

use std::path::{Component, Path, PathBuf};

/// Marker files identifying a core resources root.
///
/// Overridable because the heuristic is brittle; the defaults match what
/// ships in the game's install (`keys.txt`) and git checkout (`SConstruct`).
#[derive(Debug, Clone)]
pub struct ResourceMarkers {
    /// File that must always be present.
    pub required: String,
    /// At least one of these must also be present.
    pub any_of: Vec<String>,
}

impl Default for ResourceMarkers {
    fn default() -> Self {
        Self {
            required: "credits.txt".to_string(),
            any_of: vec!["keys.txt".to_string(), "SConstruct".to_string()],
        }
    }
}

impl ResourceMarkers {
    /// Whether `root` looks like a core resources tree.
    pub fn matches(&self, root: &Path) -> bool {
        root.join(&self.required).exists()
            && self.any_of.iter().any(|marker| root.join(marker).exists())
    }
}

/// Which tree a data file belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKind {
    /// Inside the game's own data tree.
    CoreResources {
        /// Directory containing `data/` and the marker files.
        resources_root: PathBuf,
    },
    /// Inside a third-party plugin.
    Plugin {
        /// Directory containing the plugin's `data/`.
        plugin_root: PathBuf,
    },
    /// Not under any `data/` directory; belongs to neither tree.
    Loose,
}

/// Classifies `path` against the marker heuristic.
pub fn classify(path: &Path, markers: &ResourceMarkers) -> PathKind {
    let Some(data_dir) = data_dir(path) else {
        return PathKind::Loose;
    };
    let Some(root) = data_dir.parent() else {
        return PathKind::Loose;
    };
    if markers.matches(root) {
        PathKind::CoreResources {
            resources_root: root.to_path_buf(),
        }
    } else {
        PathKind::Plugin {
            plugin_root: root.to_path_buf(),
        }
    }
}

/// The path up to and including its last component named `data`.
fn data_dir(path: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(path).ok()?;
    let components: Vec<Component<'_>> = absolute.components().collect();
    let last_data = components
        .iter()
        .rposition(|component| component.as_os_str() == "data")?;
    Some(components[..=last_data].iter().collect())
}
