//! Recursive directory-merge copy.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::report::{ReportMerge, ReportMergeBuilder};
use crate::spec::{MergeTreeError, N_MERGE_DEPTH_MAX};
use crate::util::{copy_file_bytes, ensure_directory};

/// Merge `source` onto `destination`.
///
/// - A directory source makes sure `destination` is a directory (creating it
///   and missing ancestors if needed), then merges every child entry onto
///   `destination/<name>`. Sibling order follows the filesystem listing and is
///   not guaranteed.
/// - A file source has its bytes copied to `destination`, replacing any file
///   already there. No directory is created for it.
///
/// Destination entries without a source counterpart are left alone. Symbolic
/// links in the source are followed.
///
/// A destination that resolves to the source or to a path inside it is
/// refused before anything is written.
///
/// The first failure aborts the whole merge and is returned as-is; whatever
/// was already written stays in place.
pub fn merge_tree<P, Q>(source: P, destination: Q) -> Result<ReportMerge, MergeTreeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_src = source.as_ref();
    let path_dst = destination.as_ref();

    if !path_src.exists() {
        return Err(MergeTreeError::MissingSource(path_src.to_path_buf()));
    }
    let if_overlapping = match (fs::canonicalize(path_src), resolve_through_existing(path_dst)) {
        (Ok(path_src_resolved), Ok(path_dst_resolved)) => {
            path_dst_resolved.starts_with(&path_src_resolved)
        }
        _ => false,
    };
    if if_overlapping {
        return Err(MergeTreeError::OverlappingPaths {
            source_path: path_src.to_path_buf(),
            destination: path_dst.to_path_buf(),
        });
    }

    let mut builder_merge_report = ReportMergeBuilder::default();
    merge_entry(path_src, path_dst, 0, &mut builder_merge_report)?;
    Ok(builder_merge_report.build())
}

/// Canonicalize the longest existing prefix of `path` and append the rest.
fn resolve_through_existing(path: &Path) -> io::Result<PathBuf> {
    let path_abs = std::path::absolute(path)?;
    let mut l_tail = Vec::new();
    let mut path_head = path_abs.as_path();
    loop {
        match fs::canonicalize(path_head) {
            Ok(mut path_resolved) => {
                path_resolved.extend(l_tail.iter().rev());
                return Ok(path_resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        match (path_head.parent(), path_head.file_name()) {
            (Some(path_parent), Some(name)) => {
                l_tail.push(name);
                path_head = path_parent;
            }
            _ => return Ok(path_abs.clone()),
        }
    }
}

fn merge_entry(
    path_src: &Path,
    path_dst: &Path,
    n_depth_relative: usize,
    builder_merge_report: &mut ReportMergeBuilder,
) -> Result<(), MergeTreeError> {
    if n_depth_relative > N_MERGE_DEPTH_MAX {
        return Err(MergeTreeError::DepthLimitExceeded {
            path: path_src.to_path_buf(),
            limit: N_MERGE_DEPTH_MAX,
        });
    }

    let meta_src = match fs::metadata(path_src) {
        Ok(v) => v,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MergeTreeError::MissingSource(path_src.to_path_buf()));
        }
        Err(e) => {
            return Err(MergeTreeError::CopyFailure {
                source_path: path_src.to_path_buf(),
                destination: path_dst.to_path_buf(),
                source: e,
            });
        }
    };

    if meta_src.is_dir() {
        builder_merge_report.add_directory(ensure_directory(path_dst)?);
        return walk_directory(path_src, path_dst, n_depth_relative, builder_merge_report);
    }

    let n_bytes = copy_file_bytes(path_src, path_dst)?;
    builder_merge_report.add_copied(n_bytes);
    Ok(())
}

fn walk_directory(
    path_dir_src: &Path,
    path_dir_dst: &Path,
    n_depth_relative: usize,
    builder_merge_report: &mut ReportMergeBuilder,
) -> Result<(), MergeTreeError> {
    let map_read_err = |e: io::Error| MergeTreeError::ReadDirFailure {
        path: path_dir_src.to_path_buf(),
        source: e,
    };

    for entry_res in fs::read_dir(path_dir_src).map_err(map_read_err)? {
        let entry = entry_res.map_err(map_read_err)?;
        let path_dst_next = path_dir_dst.join(entry.file_name());
        merge_entry(
            &entry.path(),
            &path_dst_next,
            n_depth_relative + 1,
            builder_merge_report,
        )?;
    }
    Ok(())
}
