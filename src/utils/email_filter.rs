use autoscale_cuckoo_filter::CuckooFilter;
use std::sync::{PoisonError, RwLock};

use crate::model::employee::normalize_email;

/// Expected capacity and false-positive rate.
/// The filter grows past the capacity on its own.
const FILTER_CAPACITY: usize = 10_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

/// Probabilistic index of registered emails.
///
/// `might_exist == false` means the email is definitely free, so the store can skip its scan.
/// Entries are never removed: deleting from a cuckoo filter can evict a colliding fingerprint
/// and turn a taken email into a false negative. A stale entry only costs a scan.
pub struct EmailFilter {
    inner: RwLock<CuckooFilter<String>>,
}

impl Default for EmailFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailFilter {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)),
        }
    }

    /// Check if an email might be registered (false positives possible)
    pub fn might_exist(&self, email: &str) -> bool {
        let email = normalize_email(email);
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&email)
    }

    /// Record a single email
    pub fn insert(&self, email: &str) {
        let email = normalize_email(email);
        let mut filter = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !filter.contains(&email) {
            filter.add(&email);
        }
    }

    /// Record a batch of emails under one write lock
    pub fn insert_batch<'a>(&self, emails: impl IntoIterator<Item = &'a str>) {
        let mut filter = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        for email in emails {
            let email = normalize_email(email);
            if !filter.contains(&email) {
                filter.add(&email);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_emails_are_reported_regardless_of_case() {
        let filter = EmailFilter::new();
        assert!(!filter.might_exist("rajesh.kumar@sgenterprises.com"));

        filter.insert("Rajesh.Kumar@sgenterprises.com");
        assert!(filter.might_exist(" rajesh.kumar@SGENTERPRISES.com"));
    }

    #[test]
    fn batch_insert_registers_every_email() {
        let filter = EmailFilter::new();
        filter.insert_batch(["a@sg.com", "b@sg.com"]);
        assert!(filter.might_exist("a@sg.com"));
        assert!(filter.might_exist("b@sg.com"));
    }
}
