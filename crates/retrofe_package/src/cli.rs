//! Command-line surface. Parsing only; all work happens in `run_package`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::conf::{C_ENV_BASE_PATH, SpecPackageLayout};
use crate::spec::{EnumBuildMode, EnumCompiler, EnumTargetOs, PackageError, SpecPackageOptions};

/// Bundle up RetroFE common files for one operating system.
#[derive(Debug, Parser)]
#[command(name = "retrofe-package", version)]
pub struct ArgsPackage {
    /// Operating system to package for
    #[arg(long = "os", value_enum)]
    pub target_os: EnumTargetOs,

    /// Contents to package
    #[arg(long = "build", value_enum, default_value_t = EnumBuildMode::Full)]
    pub build_mode: EnumBuildMode,

    /// Remove the output directory before packaging
    #[arg(long)]
    pub clean: bool,

    /// Compiler that produced the executable (only `mingw` changes its lookup path)
    #[arg(long, value_enum)]
    pub compiler: Option<EnumCompiler>,

    /// Repository root containing `Package/` and `RetroFE/`
    #[arg(long, env = C_ENV_BASE_PATH, default_value = ".")]
    pub base_path: PathBuf,

    /// TOML file overriding the built-in directory layout
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ArgsPackage {
    /// Snapshot the parsed flags into the options passed through the run.
    pub fn to_options(&self) -> SpecPackageOptions {
        SpecPackageOptions {
            target_os: self.target_os,
            build_mode: self.build_mode,
            if_clean: self.clean,
            compiler: self.compiler,
            path_base: self.base_path.clone(),
        }
    }

    /// Built-in layout, or the `--layout` file when given.
    pub fn load_layout(&self) -> Result<SpecPackageLayout, PackageError> {
        match &self.layout {
            None => Ok(SpecPackageLayout::default()),
            Some(path_layout) => SpecPackageLayout::load_from_file(path_layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::ArgsPackage;
    use crate::spec::{EnumBuildMode, EnumCompiler, EnumTargetOs};

    #[test]
    fn defaults_to_full_without_clean() {
        let args = ArgsPackage::try_parse_from(["retrofe-package", "--os", "linux", "--base-path", "/repo"])
            .expect("parse");
        let spec_pkg_options = args.to_options();

        assert_eq!(spec_pkg_options.target_os, EnumTargetOs::Linux);
        assert_eq!(spec_pkg_options.build_mode, EnumBuildMode::Full);
        assert!(!spec_pkg_options.if_clean);
        assert_eq!(spec_pkg_options.compiler, None);
        assert_eq!(spec_pkg_options.path_base, std::path::Path::new("/repo"));
    }

    #[test]
    fn parses_every_flag() {
        let args = ArgsPackage::try_parse_from([
            "retrofe-package",
            "--os",
            "windows",
            "--build",
            "engine",
            "--clean",
            "--compiler",
            "mingw",
            "-vv",
        ])
        .expect("parse");

        let spec_pkg_options = args.to_options();
        assert_eq!(spec_pkg_options.target_os, EnumTargetOs::Windows);
        assert_eq!(spec_pkg_options.build_mode, EnumBuildMode::Engine);
        assert!(spec_pkg_options.if_clean);
        assert_eq!(spec_pkg_options.compiler, Some(EnumCompiler::Mingw));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn os_is_required_and_closed() {
        assert!(ArgsPackage::try_parse_from(["retrofe-package"]).is_err());
        assert!(ArgsPackage::try_parse_from(["retrofe-package", "--os", "beos"]).is_err());
        assert!(
            ArgsPackage::try_parse_from(["retrofe-package", "--os", "mac", "--build", "partial"])
                .is_err()
        );
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(ArgsPackage::try_parse_from(["retrofe-package", "--os", "mac", "-q", "-v"]).is_err());
    }

    #[test]
    fn missing_layout_flag_uses_defaults() {
        let args = ArgsPackage::try_parse_from(["retrofe-package", "--os", "mac"]).expect("parse");
        let spec_pkg_layout = args.load_layout().expect("layout");
        assert_eq!(spec_pkg_layout.name_bundle, "RetroFE");
    }
}
