use andamios_core::BackendKind;

/// Databases dropped by [`TestDatabaseManager::sweep_orphans`].
///
/// [`TestDatabaseManager::sweep_orphans`]: crate::TestDatabaseManager::sweep_orphans
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    dropped: Vec<(BackendKind, String)>,
}

impl SweepReport {
    pub(crate) fn push(&mut self, backend: BackendKind, database: String) {
        self.dropped.push((backend, database));
    }

    /// Every `(backend, database)` pair that was dropped.
    pub fn dropped(&self) -> &[(BackendKind, String)] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.dropped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dropped.is_empty()
    }
}
