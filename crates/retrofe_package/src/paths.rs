//! Path table derived from options + layout.

use std::path::PathBuf;

use crate::conf::{SpecPackageLayout, join_segments};
use crate::spec::{EnumCompiler, EnumTargetOs, SpecPackageOptions};

/// Every source/destination the packager touches for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPackagePaths {
    /// Shared environment tree.
    pub path_common: PathBuf,
    /// Per-OS environment tree.
    pub path_os: PathBuf,
    /// Bundle output directory.
    pub path_output: PathBuf,
    /// Prebuilt executable to place in the bundle.
    pub path_executable: PathBuf,
}

impl SpecPackagePaths {
    pub fn resolve(spec_pkg_options: &SpecPackageOptions, spec_pkg_layout: &SpecPackageLayout) -> Self {
        let path_base = spec_pkg_options.path_base.as_path();
        let enum_target_os = spec_pkg_options.target_os;

        let path_environment = join_segments(path_base, &spec_pkg_layout.dir_environment);
        let path_common = join_segments(&path_environment, &spec_pkg_layout.dir_common);
        let path_os = join_segments(&path_environment, spec_pkg_layout.dir_os(enum_target_os));

        let path_output = join_segments(path_base, &spec_pkg_layout.dir_artifacts)
            .join(enum_target_os.as_str())
            .join(&spec_pkg_layout.name_bundle);

        let path_dir_build = join_segments(path_base, &spec_pkg_layout.dir_build);
        let path_executable = match enum_target_os {
            EnumTargetOs::Windows if spec_pkg_options.compiler == Some(EnumCompiler::Mingw) => {
                path_dir_build.join(&spec_pkg_layout.name_executable_windows)
            }
            EnumTargetOs::Windows => {
                join_segments(&path_dir_build, &spec_pkg_layout.dir_build_release)
                    .join(&spec_pkg_layout.name_executable_windows)
            }
            EnumTargetOs::Linux | EnumTargetOs::Mac => {
                path_dir_build.join(&spec_pkg_layout.name_executable_unix)
            }
        };

        Self {
            path_common,
            path_os,
            path_output,
            path_executable,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::SpecPackagePaths;
    use crate::conf::SpecPackageLayout;
    use crate::spec::{EnumCompiler, EnumTargetOs, SpecPackageOptions};

    fn resolve(target_os: EnumTargetOs, compiler: Option<EnumCompiler>) -> SpecPackagePaths {
        let mut spec_pkg_options = SpecPackageOptions::new(target_os, "/repo");
        spec_pkg_options.compiler = compiler;
        SpecPackagePaths::resolve(&spec_pkg_options, &SpecPackageLayout::default())
    }

    #[test]
    fn linux_paths() {
        let paths = resolve(EnumTargetOs::Linux, None);
        let base = Path::new("/repo");
        assert_eq!(paths.path_common, base.join("Package").join("Environment").join("Common"));
        assert_eq!(paths.path_os, base.join("Package").join("Environment").join("Linux"));
        assert_eq!(paths.path_output, base.join("Artifacts").join("linux").join("RetroFE"));
        assert_eq!(paths.path_executable, base.join("RetroFE").join("Build").join("retrofe"));
    }

    #[test]
    fn mac_uses_macos_environment() {
        let paths = resolve(EnumTargetOs::Mac, None);
        assert!(paths.path_os.ends_with("Package/Environment/MacOS"));
        assert!(paths.path_output.ends_with("Artifacts/mac/RetroFE"));
    }

    #[test]
    fn windows_executable_depends_on_compiler() {
        let base_build = Path::new("/repo").join("RetroFE").join("Build");

        let paths_default = resolve(EnumTargetOs::Windows, None);
        assert_eq!(
            paths_default.path_executable,
            base_build.join("Release").join("retrofe.exe")
        );

        let paths_vs = resolve(EnumTargetOs::Windows, Some(EnumCompiler::Vs));
        assert_eq!(paths_vs.path_executable, paths_default.path_executable);

        let paths_mingw = resolve(EnumTargetOs::Windows, Some(EnumCompiler::Mingw));
        assert_eq!(paths_mingw.path_executable, base_build.join("retrofe.exe"));
    }
}
