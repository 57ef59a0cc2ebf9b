//! Directory layout table and its TOML override file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::spec::{EnumTargetOs, PackageError};

/// Environment variable consulted for the repository root when `--base-path` is absent.
pub const C_ENV_BASE_PATH: &str = "RETROFE_BASE_PATH";

/// Static path-join table used to derive every source and destination.
///
/// Multi-segment entries use `/` as separator and are joined segment by
/// segment, so they resolve to native separators on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecPackageLayout {
    /// Environment root below the repository root.
    pub dir_environment: String,
    /// Environment tree shared by all operating systems.
    pub dir_common: String,
    pub dir_windows: String,
    pub dir_linux: String,
    pub dir_mac: String,

    /// Artifacts root below the repository root.
    pub dir_artifacts: String,
    /// Bundle directory inside `<artifacts>/<os>/`.
    pub name_bundle: String,

    /// Build output directory below the repository root.
    pub dir_build: String,
    /// MSVC release sub-directory of the build directory.
    pub dir_build_release: String,
    pub name_executable_windows: String,
    pub name_executable_unix: String,

    /// Executable directory inside the bundle on Windows.
    pub dir_windows_core: String,
    /// macOS application bundle inside the output directory.
    pub name_app_bundle: String,
    /// Executable directory inside the application bundle.
    pub dir_app_executable: String,

    pub dir_layouts: String,
    pub dir_collections: String,
    /// Directories created once per full bundle.
    pub dirs_meta_scaffold: Vec<String>,
    /// Directories created inside every collection of a full bundle.
    pub dirs_collection_scaffold: Vec<String>,
    /// Glob patterns naming collection directories that get no scaffold.
    pub patterns_collection_exclude: Vec<String>,
}

impl Default for SpecPackageLayout {
    fn default() -> Self {
        Self {
            dir_environment: "Package/Environment".to_string(),
            dir_common: "Common".to_string(),
            dir_windows: "Windows".to_string(),
            dir_linux: "Linux".to_string(),
            dir_mac: "MacOS".to_string(),
            dir_artifacts: "Artifacts".to_string(),
            name_bundle: "RetroFE".to_string(),
            dir_build: "RetroFE/Build".to_string(),
            dir_build_release: "Release".to_string(),
            name_executable_windows: "retrofe.exe".to_string(),
            name_executable_unix: "retrofe".to_string(),
            dir_windows_core: "core".to_string(),
            name_app_bundle: "RetroFE.app".to_string(),
            dir_app_executable: "Contents/MacOS".to_string(),
            dir_layouts: "layouts".to_string(),
            dir_collections: "collections".to_string(),
            dirs_meta_scaffold: vec!["meta/mamelist".to_string()],
            dirs_collection_scaffold: [
                "roms",
                "medium_artwork",
                "medium_artwork/artwork_front",
                "medium_artwork/artwork_back",
                "medium_artwork/medium_back",
                "medium_artwork/medium_front",
                "medium_artwork/bezel",
                "medium_artwork/logo",
                "medium_artwork/screenshot",
                "medium_artwork/screentitle",
                "medium_artwork/video",
                "system_artwork",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            patterns_collection_exclude: vec!["_*".to_string()],
        }
    }
}

impl SpecPackageLayout {
    /// Parse a layout from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(txt: &str, path: &Path) -> Result<Self, PackageError> {
        toml::from_str(txt).map_err(|e| PackageError::LayoutParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a layout override file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PackageError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|e| PackageError::LayoutRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&txt, path)
    }

    /// Environment sub-directory name for `target_os`.
    pub fn dir_os(&self, target_os: EnumTargetOs) -> &str {
        match target_os {
            EnumTargetOs::Windows => &self.dir_windows,
            EnumTargetOs::Linux => &self.dir_linux,
            EnumTargetOs::Mac => &self.dir_mac,
        }
    }
}

/// Join `/`-separated `segments` onto `base` one component at a time.
pub fn join_segments(base: &Path, segments: &str) -> PathBuf {
    segments
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(base.to_path_buf(), |path_acc, segment| path_acc.join(segment))
}
