//! Packaging options, closed enumerations and top-level error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

use clap::ValueEnum;
use retrofe_package_fs::MergeTreeError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Operating system the bundle is assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumTargetOs {
    Windows,
    Linux,
    Mac,
}

impl EnumTargetOs {
    /// Name used for the per-OS artifacts directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Mac => "mac",
        }
    }
}

impl fmt::Display for EnumTargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which subset of the bundle is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumBuildMode {
    /// Environment trees, scaffolding and executable.
    Full,
    /// Executable only.
    Core,
    /// Executable only.
    Engine,
    /// Layout trees only.
    Layout,
    /// Nothing beyond an optional clean.
    None,
}

impl EnumBuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Core => "core",
            Self::Engine => "engine",
            Self::Layout => "layout",
            Self::None => "none",
        }
    }

    /// Whether the output directory is created for this mode.
    pub fn if_creates_output(self) -> bool {
        self != Self::None
    }

    /// Whether the prebuilt executable is copied for this mode.
    pub fn if_places_executable(self) -> bool {
        matches!(self, Self::Full | Self::Core | Self::Engine)
    }
}

impl fmt::Display for EnumBuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toolchain that produced the executable. Only `Mingw` changes the lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumCompiler {
    Vs,
    Mingw,
    Gcc,
}

impl EnumCompiler {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vs => "vs",
            Self::Mingw => "mingw",
            Self::Gcc => "gcc",
        }
    }
}

impl fmt::Display for EnumCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `run_package`, built once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPackageOptions {
    /// Target operating system.
    pub target_os: EnumTargetOs,
    /// Bundle content selection.
    pub build_mode: EnumBuildMode,
    /// Remove an existing output directory before packaging.
    pub if_clean: bool,
    /// Compiler hint for executable lookup.
    pub compiler: Option<EnumCompiler>,
    /// Repository root holding `Package/` and `RetroFE/`.
    pub path_base: PathBuf,
}

impl SpecPackageOptions {
    pub fn new(target_os: EnumTargetOs, path_base: impl Into<PathBuf>) -> Self {
        Self {
            target_os,
            build_mode: EnumBuildMode::Full,
            if_clean: false,
            compiler: None,
            path_base: path_base.into(),
        }
    }
}

/// Packaging failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum PackageError {
    /// Any merge engine failure, surfaced as-is.
    #[error(transparent)]
    Merge(#[from] MergeTreeError),

    #[error("Failed to read layout file {}: {source}", path.display())]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse layout file {}: {source}", path.display())]
    LayoutParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
