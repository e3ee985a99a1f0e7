use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game flavors that can live side by side under one install root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationKind {
    Retail,
    Classic,
    ClassicEra,
    Ptr,
    Beta,
}

impl InstallationKind {
    pub const ALL: [InstallationKind; 5] = [
        Self::Retail,
        Self::Classic,
        Self::ClassicEra,
        Self::Ptr,
        Self::Beta,
    ];

    /// Folder name under the install root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Retail => "_retail_",
            Self::Classic => "_classic_",
            Self::ClassicEra => "_classic_era_",
            Self::Ptr => "_ptr_",
            Self::Beta => "_beta_",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.dir_name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Classic => "classic",
            Self::ClassicEra => "classic_era",
            Self::Ptr => "ptr",
            Self::Beta => "beta",
        }
    }
}

impl std::fmt::Display for InstallationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Installations found under the configured root, keyed by flavor.
pub type InstallationRegistry = BTreeMap<InstallationKind, PathBuf>;

const MARKER_ENTRIES: [&str; 5] = ["Logs", "Interface", "WTF", "Wow.exe", "World of Warcraft.app"];

fn looks_like_installation(dir: &Path) -> bool {
    dir.is_dir() && MARKER_ENTRIES.iter().any(|m| dir.join(m).exists())
}

/// Scan `root` for game installations.
///
/// `root` may be the install root or one flavor folder itself (when
/// the user picked `_retail_` directly).
pub fn discover_installations(root: &Path) -> InstallationRegistry {
    let mut found = InstallationRegistry::new();

    if let Some(kind) = root
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(InstallationKind::from_dir_name)
        && looks_like_installation(root)
    {
        found.insert(kind, root.to_path_buf());
        return found;
    }

    for kind in InstallationKind::ALL {
        let candidate = root.join(kind.dir_name());
        if looks_like_installation(&candidate) {
            found.insert(kind, candidate);
        }
    }
    found
}

/// Usual install roots for this OS, most likely first.
pub fn default_install_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if cfg!(target_os = "windows") {
        roots.push(PathBuf::from(r"C:\Program Files (x86)\World of Warcraft"));
        roots.push(PathBuf::from(r"C:\Program Files\World of Warcraft"));
    } else if cfg!(target_os = "macos") {
        roots.push(PathBuf::from("/Applications/World of Warcraft"));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Games").join("World of Warcraft"));
    }
    roots
}

/// First default root that holds at least one installation.
pub fn detect_install_root() -> Option<PathBuf> {
    default_install_roots()
        .into_iter()
        .find(|root| !discover_installations(root).is_empty())
}
