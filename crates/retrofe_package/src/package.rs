//! Bundle assembly: clean, environment merge, scaffolding and executable placement.

use std::fmt;
use std::path::{Path, PathBuf};

use retrofe_package_fs::{
    ReportMerge, ReportMergeBuilder, SpecNamePatterns, copy_file_into_dir, ensure_directory,
    list_subdirectory_names, merge_tree, remove_tree_if_exists,
};
use tracing::{info, warn};

use crate::conf::{SpecPackageLayout, join_segments};
use crate::paths::SpecPackagePaths;
use crate::spec::{EnumBuildMode, EnumTargetOs, PackageError, SpecPackageOptions};

/// Outcome of one `run_package` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPackage {
    /// Bundle output directory.
    pub path_output: PathBuf,
    /// Whether a previous output directory was removed.
    pub if_cleaned: bool,
    /// Number of executable copies written.
    pub cnt_executables_placed: u64,
    /// Summed counters of every merge, scaffold and copy step.
    pub report_merge: ReportMerge,
}

impl fmt::Display for ReportPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[PACKAGE] output={} cleaned={} executables={} {}",
            self.path_output.display(),
            self.if_cleaned,
            self.cnt_executables_placed,
            self.report_merge.format("|")
        )
    }
}

struct SpecPackageContext<'a> {
    spec_pkg_options: &'a SpecPackageOptions,
    spec_pkg_layout: &'a SpecPackageLayout,
    spec_pkg_paths: SpecPackagePaths,
    builder_merge_report: ReportMergeBuilder,
}

/// Assemble the bundle described by `spec_pkg_options`.
///
/// Stages run in order and the first failure aborts the run, leaving any
/// partially written output in place:
/// 1. optional clean of the output directory,
/// 2. output directory creation (every mode except `none`),
/// 3. mode-specific assets (`full`: environment trees + scaffolding,
///    `layout`: layout trees),
/// 4. executable placement (`full`, `core`, `engine`).
pub fn run_package(
    spec_pkg_options: &SpecPackageOptions,
    spec_pkg_layout: &SpecPackageLayout,
) -> Result<ReportPackage, PackageError> {
    let spec_pkg_paths = SpecPackagePaths::resolve(spec_pkg_options, spec_pkg_layout);
    info!(
        os = %spec_pkg_options.target_os,
        build = %spec_pkg_options.build_mode,
        output = %spec_pkg_paths.path_output.display(),
        "packaging started"
    );

    let mut spec_pkg_ctx = SpecPackageContext {
        spec_pkg_options,
        spec_pkg_layout,
        spec_pkg_paths,
        builder_merge_report: ReportMergeBuilder::default(),
    };

    let if_cleaned = spec_pkg_options.if_clean
        && remove_tree_if_exists(&spec_pkg_ctx.spec_pkg_paths.path_output)?;

    let enum_build_mode = spec_pkg_options.build_mode;
    if enum_build_mode.if_creates_output() {
        let enum_outcome = ensure_directory(&spec_pkg_ctx.spec_pkg_paths.path_output)?;
        spec_pkg_ctx.builder_merge_report.add_directory(enum_outcome);
    }

    match enum_build_mode {
        EnumBuildMode::Full => stage_full(&mut spec_pkg_ctx)?,
        EnumBuildMode::Layout => stage_layout(&mut spec_pkg_ctx)?,
        EnumBuildMode::Core | EnumBuildMode::Engine | EnumBuildMode::None => {}
    }

    let cnt_executables_placed = if enum_build_mode.if_places_executable() {
        stage_executable(&mut spec_pkg_ctx)?
    } else {
        0
    };

    let report_package = ReportPackage {
        path_output: spec_pkg_ctx.spec_pkg_paths.path_output,
        if_cleaned,
        cnt_executables_placed,
        report_merge: spec_pkg_ctx.builder_merge_report.build(),
    };
    info!("{report_package}");
    Ok(report_package)
}

fn ensure_into_report(
    path_dir: &Path,
    spec_pkg_ctx: &mut SpecPackageContext<'_>,
) -> Result<(), PackageError> {
    let enum_outcome = ensure_directory(path_dir)?;
    spec_pkg_ctx.builder_merge_report.add_directory(enum_outcome);
    Ok(())
}

fn merge_into_report(
    path_src: &Path,
    path_dst: &Path,
    spec_pkg_ctx: &mut SpecPackageContext<'_>,
) -> Result<(), PackageError> {
    let report_merge = merge_tree(path_src, path_dst)?;
    spec_pkg_ctx.builder_merge_report.absorb(&report_merge);
    Ok(())
}

fn stage_full(spec_pkg_ctx: &mut SpecPackageContext<'_>) -> Result<(), PackageError> {
    let path_common = spec_pkg_ctx.spec_pkg_paths.path_common.clone();
    let path_os = spec_pkg_ctx.spec_pkg_paths.path_os.clone();
    let path_output = spec_pkg_ctx.spec_pkg_paths.path_output.clone();
    let spec_pkg_layout = spec_pkg_ctx.spec_pkg_layout;

    merge_into_report(&path_common, &path_output, spec_pkg_ctx)?;
    merge_into_report(&path_os, &path_output, spec_pkg_ctx)?;

    for dir_meta in &spec_pkg_layout.dirs_meta_scaffold {
        ensure_into_report(&join_segments(&path_output, dir_meta), spec_pkg_ctx)?;
    }

    let path_collections = join_segments(&path_output, &spec_pkg_layout.dir_collections);
    let spec_name_pats = SpecNamePatterns::from_globs(&spec_pkg_layout.patterns_collection_exclude)?;
    let l_collections = list_subdirectory_names(&path_collections, &spec_name_pats)?;
    for name_collection in &l_collections {
        let path_collection = path_collections.join(name_collection);
        for dir_scaffold in &spec_pkg_layout.dirs_collection_scaffold {
            ensure_into_report(&join_segments(&path_collection, dir_scaffold), spec_pkg_ctx)?;
        }
    }
    info!(collections = l_collections.len(), "collection scaffolding done");
    Ok(())
}

fn stage_layout(spec_pkg_ctx: &mut SpecPackageContext<'_>) -> Result<(), PackageError> {
    let spec_pkg_layout = spec_pkg_ctx.spec_pkg_layout;
    let path_layouts_dst = join_segments(
        &spec_pkg_ctx.spec_pkg_paths.path_output,
        &spec_pkg_layout.dir_layouts,
    );
    ensure_into_report(&path_layouts_dst, spec_pkg_ctx)?;

    let l_layouts_src = [
        join_segments(&spec_pkg_ctx.spec_pkg_paths.path_common, &spec_pkg_layout.dir_layouts),
        join_segments(&spec_pkg_ctx.spec_pkg_paths.path_os, &spec_pkg_layout.dir_layouts),
    ];
    for path_layouts_src in &l_layouts_src {
        if !path_layouts_src.exists() {
            warn!("Layout source not found, skipped: {}", path_layouts_src.display());
            continue;
        }
        merge_into_report(path_layouts_src, &path_layouts_dst, spec_pkg_ctx)?;
    }
    Ok(())
}

fn stage_executable(spec_pkg_ctx: &mut SpecPackageContext<'_>) -> Result<u64, PackageError> {
    let spec_pkg_layout = spec_pkg_ctx.spec_pkg_layout;
    let path_executable = spec_pkg_ctx.spec_pkg_paths.path_executable.clone();
    let path_output = spec_pkg_ctx.spec_pkg_paths.path_output.clone();

    match spec_pkg_ctx.spec_pkg_options.target_os {
        EnumTargetOs::Windows => {
            let path_core = join_segments(&path_output, &spec_pkg_layout.dir_windows_core);
            ensure_into_report(&path_core, spec_pkg_ctx)?;
            copy_file_into_dir(&path_executable, &path_core, &mut spec_pkg_ctx.builder_merge_report)?;
            Ok(1)
        }
        EnumTargetOs::Linux => {
            copy_file_into_dir(&path_executable, &path_output, &mut spec_pkg_ctx.builder_merge_report)?;
            Ok(1)
        }
        EnumTargetOs::Mac => {
            copy_file_into_dir(&path_executable, &path_output, &mut spec_pkg_ctx.builder_merge_report)?;

            let path_app = path_output.join(&spec_pkg_layout.name_app_bundle);
            if !path_app.exists() {
                let path_os = spec_pkg_ctx.spec_pkg_paths.path_os.clone();
                merge_into_report(&path_os, &path_output, spec_pkg_ctx)?;
            }
            let path_app_executable = join_segments(&path_app, &spec_pkg_layout.dir_app_executable);
            ensure_into_report(&path_app_executable, spec_pkg_ctx)?;
            copy_file_into_dir(
                &path_executable,
                &path_app_executable,
                &mut spec_pkg_ctx.builder_merge_report,
            )?;
            Ok(2)
        }
    }
}
