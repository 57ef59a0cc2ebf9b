//! Merge outcome models and top-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Maximum number of directory levels `merge_tree` descends below its source root.
pub const N_MERGE_DEPTH_MAX: usize = 256;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Result of one idempotent directory creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumDirectoryOutcome {
    /// The directory (and possibly some ancestors) was created by this call.
    Created,
    /// A directory was already present at the path.
    AlreadyExists,
}

impl EnumDirectoryOutcome {
    pub fn is_created(self) -> bool {
        self == Self::Created
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Fatal errors raised by the merge engine.
///
/// "Directory already exists" is never an error here: it is reported as
/// [`EnumDirectoryOutcome::AlreadyExists`]. Every variant below aborts the
/// walk that raised it.
#[derive(Debug, Error)]
pub enum MergeTreeError {
    /// Source path did not exist when the merge reached it.
    #[error("Source does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    /// Directory creation failed for a reason other than "already exists".
    #[error("Failed to create directory {}: {source}", path.display())]
    CreationFailure {
        /// Directory that could not be created.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the source file or writing the destination file failed.
    #[error(
        "Failed to copy {} -> {}: {source}",
        source_path.display(),
        destination.display()
    )]
    CopyFailure {
        /// File being read.
        source_path: PathBuf,
        /// File being written.
        destination: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination is the source itself, lies inside it, or names the same file.
    #[error(
        "Destination {} overlaps source {}",
        destination.display(),
        source_path.display()
    )]
    OverlappingPaths {
        /// Entry being read.
        source_path: PathBuf,
        /// Entry that would be written.
        destination: PathBuf,
    },

    /// Listing a source directory failed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDirFailure {
        /// Directory being listed.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Walk went deeper than [`N_MERGE_DEPTH_MAX`] (usually a symlink cycle).
    #[error("Merge depth limit {limit} exceeded at {}", path.display())]
    DepthLimitExceeded {
        /// Source entry at which the limit was hit.
        path: PathBuf,
        /// Limit in effect.
        limit: usize,
    },

    /// Recursive removal of an existing tree failed.
    #[error("Failed to remove {}: {source}", path.display())]
    RemoveFailure {
        /// Tree root being removed.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid name-exclusion pattern.
    #[error("Invalid name pattern: {0}")]
    InvalidPattern(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
