//! Dashboard cache invalidation seam.
//!
//! Mutating services report the page path whose cached render is now
//! stale. The web shell maps paths onto its own cache; core only names
//! them.

/// Cached page paths invalidated by mutations.
pub const NOTES_PATH: &str = "/dashboard/notes";
pub const TASKS_PATH: &str = "/dashboard/tasks";
pub const PROJECTS_PATH: &str = "/dashboard/project";
pub const USERS_PATH: &str = "/users";

/// Receiver for cache invalidation signals.
pub trait CacheInvalidator {
    fn invalidate(&self, path: &str);
}

/// Invalidator for contexts without a render cache (tests, CLI).
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate(&self, _path: &str) {}
}

impl<T: CacheInvalidator + ?Sized> CacheInvalidator for &T {
    fn invalidate(&self, path: &str) {
        (**self).invalidate(path);
    }
}
