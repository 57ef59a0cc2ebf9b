//! `retrofe_package` v1:
//! Assembles per-OS RetroFE distribution bundles.
//!
//! Modules:
//! - `cli`     : command-line flags
//! - `conf`    : directory layout table and TOML overrides
//! - `logging` : subscriber setup
//! - `package` : bundle assembly stages
//! - `paths`   : per-run path table
//! - `spec`    : enums/options/errors

pub mod cli;
pub mod conf;
pub mod logging;
pub mod package;
pub mod paths;
pub mod spec;

pub use cli::ArgsPackage;
pub use conf::{C_ENV_BASE_PATH, SpecPackageLayout, join_segments};
pub use logging::{C_ENV_LOG, init_logging};
pub use package::{ReportPackage, run_package};
pub use paths::SpecPackagePaths;
pub use spec::{EnumBuildMode, EnumCompiler, EnumTargetOs, PackageError, SpecPackageOptions};
