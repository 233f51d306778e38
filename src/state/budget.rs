use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of successfully fetched pages, capped at a maximum
///
/// Worker tasks call [`PageBudget::try_record`] the moment a fetch succeeds.
/// The increment is a compare-and-swap that refuses to move past the cap, so
/// the counter never exceeds `max` no matter how many tasks race on it.
#[derive(Debug, Clone)]
pub struct PageBudget {
    crawled: Arc<AtomicUsize>,
    max: usize,
}

impl PageBudget {
    /// Creates a budget allowing up to `max` pages
    pub fn new(max: usize) -> Self {
        Self {
            crawled: Arc::new(AtomicUsize::new(0)),
            max,
        }
    }

    /// Counts one successfully fetched page
    ///
    /// Returns `false` without changing the counter when the budget is
    /// already exhausted.
    pub fn try_record(&self) -> bool {
        self.crawled
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max).then_some(n + 1)
            })
            .is_ok()
    }

    /// Pages counted so far
    pub fn crawled(&self) -> usize {
        self.crawled.load(Ordering::Acquire)
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_exhausted(&self) -> bool {
        self.crawled() >= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_records_up_to_max() {
        let budget = PageBudget::new(3);
        assert!(budget.try_record());
        assert!(budget.try_record());
        assert_eq!(budget.crawled(), 2);
        assert!(budget.try_record());
        assert!(budget.is_exhausted());

        assert!(!budget.try_record());
        assert_eq!(budget.crawled(), 3);
    }

    #[test]
    fn test_zero_budget_is_exhausted() {
        let budget = PageBudget::new(0);
        assert!(budget.is_exhausted());
        assert!(!budget.try_record());
        assert_eq!(budget.crawled(), 0);
    }

    #[test]
    fn test_concurrent_records_never_exceed_max() {
        let budget = PageBudget::new(50);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let budget = budget.clone();
                thread::spawn(move || {
                    let mut counted = 0;
                    for _ in 0..20 {
                        if budget.try_record() {
                            counted += 1;
                        }
                        assert!(budget.crawled() <= budget.max());
                    }
                    counted
                })
            })
            .collect();

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(total, 50);
        assert_eq!(budget.crawled(), 50);
    }
}
