use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tenderlens_core::{Blacklist, LookupError};

/// Memoizing wrapper around the administrator blacklist.
///
/// One instance lives as long as the worker that owns it; answers are never invalidated.
pub struct CachedBlacklist {
    inner: Arc<dyn Blacklist>,
    cache: Mutex<HashMap<String, bool>>,
}

impl CachedBlacklist {
    pub fn new(inner: Arc<dyn Blacklist>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_blacklisted(&self, email: &str) -> Result<bool, LookupError> {
        if let Some(hit) = self.lock().get(email) {
            return Ok(*hit);
        }

        // Failed lookups are not cached.
        let listed = self.inner.is_blacklisted(email)?;
        self.lock().insert(email.to_string(), listed);
        Ok(listed)
    }

    pub fn cached_entries(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, bool>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CachedBlacklist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedBlacklist")
            .field("cached_entries", &self.cached_entries())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBlacklist {
        calls: AtomicUsize,
    }

    impl Blacklist for CountingBlacklist {
        fn is_blacklisted(&self, email: &str) -> Result<bool, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(email == "info@example.org")
        }
    }

    #[test]
    fn answers_are_memoized_per_email() {
        let inner = Arc::new(CountingBlacklist {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedBlacklist::new(inner.clone());

        assert!(cached.is_blacklisted("info@example.org").expect("lookup"));
        assert!(cached.is_blacklisted("info@example.org").expect("lookup"));
        assert!(!cached.is_blacklisted("buyer@city.example").expect("lookup"));

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cached_entries(), 2);
    }
}
