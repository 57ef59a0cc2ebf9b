//! Merge report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::EnumDirectoryOutcome;

/// Aggregate counters for one or more `merge_tree` runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportMerge {
    /// Destination directories created.
    pub cnt_dirs_created: u64,
    /// Destination directories that were already present.
    pub cnt_dirs_existing: u64,
    /// Files copied (including overwrites).
    pub cnt_files_copied: u64,
    /// Total bytes written by file copies.
    pub n_bytes_copied: u64,
}

impl ReportMerge {
    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_dirs_created".to_string(), self.cnt_dirs_created);
        dict_counts.insert("cnt_dirs_existing".to_string(), self.cnt_dirs_existing);
        dict_counts.insert("cnt_files_copied".to_string(), self.cnt_files_copied);
        dict_counts.insert("n_bytes_copied".to_string(), self.n_bytes_copied);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} dirs_created={} dirs_existing={} files_copied={} bytes_copied={}",
            self.cnt_dirs_created, self.cnt_dirs_existing, self.cnt_files_copied, self.n_bytes_copied
        )
    }
}

impl fmt::Display for ReportMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[MERGE]"))
    }
}

/// Mutable accumulator for merge statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportMergeBuilder {
    /// See [`ReportMerge::cnt_dirs_created`].
    pub cnt_dirs_created: u64,
    /// See [`ReportMerge::cnt_dirs_existing`].
    pub cnt_dirs_existing: u64,
    /// See [`ReportMerge::cnt_files_copied`].
    pub cnt_files_copied: u64,
    /// See [`ReportMerge::n_bytes_copied`].
    pub n_bytes_copied: u64,
}

impl ReportMergeBuilder {
    /// Count one `ensure_directory` outcome.
    pub fn add_directory(&mut self, enum_outcome: EnumDirectoryOutcome) {
        match enum_outcome {
            EnumDirectoryOutcome::Created => self.cnt_dirs_created += 1,
            EnumDirectoryOutcome::AlreadyExists => self.cnt_dirs_existing += 1,
        }
    }

    /// Count one copied file of `n_bytes` bytes.
    pub fn add_copied(&mut self, n_bytes: u64) {
        self.cnt_files_copied += 1;
        self.n_bytes_copied += n_bytes;
    }

    /// Add the counters of an already finished report.
    pub fn absorb(&mut self, report: &ReportMerge) {
        self.cnt_dirs_created += report.cnt_dirs_created;
        self.cnt_dirs_existing += report.cnt_dirs_existing;
        self.cnt_files_copied += report.cnt_files_copied;
        self.n_bytes_copied += report.n_bytes_copied;
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportMerge {
        ReportMerge {
            cnt_dirs_created: self.cnt_dirs_created,
            cnt_dirs_existing: self.cnt_dirs_existing,
            cnt_files_copied: self.cnt_files_copied,
            n_bytes_copied: self.n_bytes_copied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportMerge, ReportMergeBuilder};
    use crate::spec::EnumDirectoryOutcome;

    #[test]
    fn report_merge_to_dict_and_format() {
        let report = ReportMerge {
            cnt_dirs_created: 2,
            cnt_dirs_existing: 1,
            cnt_files_copied: 4,
            n_bytes_copied: 128,
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_dirs_created"], 2);
        assert_eq!(dict_counts["cnt_dirs_existing"], 1);
        assert_eq!(dict_counts["cnt_files_copied"], 4);
        assert_eq!(dict_counts["n_bytes_copied"], 128);

        let txt = report.format("[MERGE]");
        assert_eq!(
            txt,
            "[MERGE] dirs_created=2 dirs_existing=1 files_copied=4 bytes_copied=128"
        );
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn builder_absorbs_finished_reports() {
        let mut builder = ReportMergeBuilder::default();
        builder.add_directory(EnumDirectoryOutcome::Created);
        builder.add_directory(EnumDirectoryOutcome::AlreadyExists);
        builder.add_copied(10);

        let other = ReportMerge {
            cnt_dirs_created: 1,
            cnt_dirs_existing: 0,
            cnt_files_copied: 2,
            n_bytes_copied: 5,
        };
        builder.absorb(&other);

        let report = builder.build();
        assert_eq!(report.cnt_dirs_created, 2);
        assert_eq!(report.cnt_dirs_existing, 1);
        assert_eq!(report.cnt_files_copied, 3);
        assert_eq!(report.n_bytes_copied, 15);
    }
}
