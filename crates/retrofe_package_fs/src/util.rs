use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};

use crate::report::ReportMergeBuilder;
use crate::spec::{EnumDirectoryOutcome, MergeTreeError};

////////////////////////////////////////////////////////////////////////////////
// #region NamePatterns

/// Compiled glob patterns matched against a bare entry name.
#[derive(Debug, Clone, Default)]
pub struct SpecNamePatterns {
    glob_set: Option<GlobSet>,
}

impl SpecNamePatterns {
    /// Compile shell-like patterns (`*`, `?`, character classes).
    ///
    /// An empty list matches nothing.
    pub fn from_globs(patterns: &[String]) -> Result<Self, MergeTreeError> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder_glob_set = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                MergeTreeError::InvalidPattern(format!("`{pattern}`: {e}"))
            })?;
            builder_glob_set.add(glob);
        }
        let glob_set = builder_glob_set
            .build()
            .map_err(|e| MergeTreeError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            glob_set: Some(glob_set),
        })
    }

    /// Match a bare entry name. Non-UTF-8 names are matched byte-wise, never lossily.
    pub fn is_match<P: AsRef<Path>>(&self, name: P) -> bool {
        match &self.glob_set {
            None => false,
            Some(glob_set) => glob_set.is_match(name),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DirectoryPrimitives

/// Create `path` and every missing ancestor.
///
/// An existing directory is reported as [`EnumDirectoryOutcome::AlreadyExists`],
/// including when another process creates it between the existence query and
/// the creation call. A non-directory occupying `path`, or any other creation
/// failure, is returned as [`MergeTreeError::CreationFailure`], and so is an
/// empty path.
pub fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<EnumDirectoryOutcome, MergeTreeError> {
    let path_dir = path.as_ref();
    if path_dir.as_os_str().is_empty() {
        return Err(MergeTreeError::CreationFailure {
            path: PathBuf::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty directory path"),
        });
    }

    match fs::metadata(path_dir) {
        Ok(meta_dir) if meta_dir.is_dir() => {
            debug!("EXISTS: {}", path_dir.display());
            return Ok(EnumDirectoryOutcome::AlreadyExists);
        }
        Ok(_) => {
            return Err(MergeTreeError::CreationFailure {
                path: path_dir.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::NotADirectory,
                    "path exists and is not a directory",
                ),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(MergeTreeError::CreationFailure {
                path: path_dir.to_path_buf(),
                source: e,
            });
        }
    }

    match fs::create_dir_all(path_dir) {
        Ok(()) => {
            info!("CREATE: {}", path_dir.display());
            Ok(EnumDirectoryOutcome::Created)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path_dir.is_dir() => {
            debug!("EXISTS: {}", path_dir.display());
            Ok(EnumDirectoryOutcome::AlreadyExists)
        }
        Err(e) => Err(MergeTreeError::CreationFailure {
            path: path_dir.to_path_buf(),
            source: e,
        }),
    }
}

/// Remove `path` recursively if anything is there.
///
/// Returns `false` when the path did not exist. Symbolic links are removed
/// themselves, never followed.
pub fn remove_tree_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, MergeTreeError> {
    let path_root = path.as_ref();
    let meta_root = match fs::symlink_metadata(path_root) {
        Ok(v) => v,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(MergeTreeError::RemoveFailure {
                path: path_root.to_path_buf(),
                source: e,
            });
        }
    };

    let res_remove = if meta_root.is_dir() {
        fs::remove_dir_all(path_root)
    } else {
        fs::remove_file(path_root)
    };
    res_remove.map_err(|e| MergeTreeError::RemoveFailure {
        path: path_root.to_path_buf(),
        source: e,
    })?;

    info!("REMOVE: {}", path_root.display());
    Ok(true)
}

/// Immediate child directory names of `path_dir`, sorted, minus `patterns_exclude` hits.
///
/// Symbolic links to directories count as directories.
pub fn list_subdirectory_names<P: AsRef<Path>>(
    path_dir: P,
    patterns_exclude: &SpecNamePatterns,
) -> Result<Vec<OsString>, MergeTreeError> {
    let path_dir = path_dir.as_ref();
    let map_read_err = |e: io::Error| MergeTreeError::ReadDirFailure {
        path: path_dir.to_path_buf(),
        source: e,
    };

    let mut l_names = Vec::new();
    for entry in fs::read_dir(path_dir).map_err(map_read_err)? {
        let entry = entry.map_err(map_read_err)?;
        if !entry.path().is_dir() {
            continue;
        }
        let c_name = entry.file_name();
        if patterns_exclude.is_match(&c_name) {
            debug!("SKIP: {}", entry.path().display());
            continue;
        }
        l_names.push(c_name);
    }
    l_names.sort();
    Ok(l_names)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FilePrimitives

/// Whether both paths resolve to the same existing file.
fn is_same_file(path_a: &Path, path_b: &Path) -> bool {
    let (Ok(meta_a), Ok(meta_b)) = (fs::metadata(path_a), fs::metadata(path_b)) else {
        return false;
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino()
    }

    #[cfg(not(unix))]
    {
        let _ = (meta_a, meta_b);
        matches!(
            (fs::canonicalize(path_a), fs::canonicalize(path_b)),
            (Ok(a), Ok(b)) if a == b
        )
    }
}

/// Copy file bytes, replacing any existing destination file.
///
/// A destination that is the source file itself (same path, hard link or
/// symbolic link) is refused with [`MergeTreeError::OverlappingPaths`].
///
/// Returns the number of bytes written.
pub(crate) fn copy_file_bytes(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<u64, MergeTreeError> {
    if is_same_file(path_file_src, path_file_dst) {
        return Err(MergeTreeError::OverlappingPaths {
            source_path: path_file_src.to_path_buf(),
            destination: path_file_dst.to_path_buf(),
        });
    }
    let n_bytes =
        fs::copy(path_file_src, path_file_dst).map_err(|e| MergeTreeError::CopyFailure {
            source_path: path_file_src.to_path_buf(),
            destination: path_file_dst.to_path_buf(),
            source: e,
        })?;
    info!("COPY: {}", path_file_dst.display());
    Ok(n_bytes)
}

/// Copy `path_file` into the existing directory `path_dir`, keeping its file name.
///
/// Returns the destination file path.
pub fn copy_file_into_dir<P, Q>(
    path_file: P,
    path_dir: Q,
    builder_merge_report: &mut ReportMergeBuilder,
) -> Result<PathBuf, MergeTreeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_src = path_file.as_ref();
    let path_dir_dst = path_dir.as_ref();

    if !path_file_src.exists() {
        return Err(MergeTreeError::MissingSource(path_file_src.to_path_buf()));
    }
    let Some(name_file) = path_file_src.file_name() else {
        return Err(MergeTreeError::CopyFailure {
            source_path: path_file_src.to_path_buf(),
            destination: path_dir_dst.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        });
    };

    let path_file_dst = path_dir_dst.join(name_file);
    let n_bytes = copy_file_bytes(path_file_src, &path_file_dst)?;
    builder_merge_report.add_copied(n_bytes);
    Ok(path_file_dst)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
