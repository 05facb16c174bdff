use andamios_core::Namespace;
use std::sync::atomic::{AtomicU32, Ordering};

/// Generates unique namespace prefixes for test isolation.
///
/// Each test gets a prefix in the format `andamios_t{process_id}_{test_counter}`,
/// so tests running in parallel (within or across processes) never see each
/// other's worker databases, and a sweep of one test's namespace never
/// touches another's.
#[derive(Clone, Debug)]
pub struct TestIsolation {
    process_id: u32,
    test_counter: u32,
}

// Global counter shared across all tests in this process
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

impl TestIsolation {
    /// Create a new test isolation instance with a unique counter.
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            test_counter: TEST_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn prefix(&self) -> String {
        format!("andamios_t{}_{}", self.process_id, self.test_counter)
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.prefix()).expect("isolation prefix is a valid namespace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_unique_prefixes() {
        let isolation1 = TestIsolation::new();
        let isolation2 = TestIsolation::new();

        assert_ne!(isolation1.prefix(), isolation2.prefix());
        assert!(isolation1.prefix().starts_with("andamios_t"));
    }

    #[test]
    fn namespaces_do_not_overlap() {
        let isolation1 = TestIsolation::new();
        let isolation2 = TestIsolation::new();

        let worker = "0".parse().unwrap();
        let name = isolation1.namespace().database_name(&worker).unwrap();

        assert!(isolation1.namespace().owns(name.as_str()));
        assert!(!isolation2.namespace().owns(name.as_str()));
    }

    #[test]
    fn prefix_format() {
        let prefix = TestIsolation::new().prefix();

        // andamios_t{process_id}_{counter}
        let parts: Vec<&str> = prefix.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "andamios");
        assert!(parts[1].strip_prefix('t').unwrap().parse::<u32>().is_ok());
        assert!(parts[2].parse::<u32>().is_ok());
    }
}
