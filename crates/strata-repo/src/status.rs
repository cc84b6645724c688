/// Created/changed/deleted file paths from comparing a staged or committed
/// state against a baseline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Files present only on the newer side.
    pub created: Vec<String>,
    /// Files present on both sides with different content.
    pub changed: Vec<String>,
    /// Files present only on the baseline side.
    pub deleted: Vec<String>,
}

impl StatusReport {
    /// A report with every path in `created` (used when there is no
    /// baseline commit at all).
    pub fn all_created(created: Vec<String>) -> Self {
        Self {
            created,
            ..Self::default()
        }
    }

    /// Returns `true` if nothing differs.
    pub fn is_clean(&self) -> bool {
        self.created.is_empty() && self.changed.is_empty() && self.deleted.is_empty()
    }

    /// Total number of paths across all categories.
    pub fn total_entries(&self) -> usize {
        self.created.len() + self.changed.len() + self.deleted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean() {
        let report = StatusReport::default();
        assert!(report.is_clean());
        assert_eq!(report.total_entries(), 0);
    }

    #[test]
    fn all_created_report() {
        let report = StatusReport::all_created(vec!["a.txt".into(), "b.txt".into()]);
        assert!(!report.is_clean());
        assert_eq!(report.total_entries(), 2);
        assert!(report.changed.is_empty());
        assert!(report.deleted.is_empty());
    }
}
