//! `retrofe_package_fs` v1:
//! Filesystem merge engine used by the RetroFE packager.
//!
//! Modules:
//! - `merge`  : recursive directory-merge copy
//! - `spec`   : outcomes/errors/limits
//! - `report` : run-time report model
//! - `util`   : directory, file and name-pattern primitives

pub mod merge;
pub mod report;
pub mod spec;
mod util;

pub use merge::merge_tree;
pub use report::{ReportMerge, ReportMergeBuilder};
pub use spec::{EnumDirectoryOutcome, MergeTreeError, N_MERGE_DEPTH_MAX};
pub use util::{
    SpecNamePatterns, copy_file_into_dir, ensure_directory, list_subdirectory_names,
    remove_tree_if_exists,
};
