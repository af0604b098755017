use crate::location::LocationResolver;
use crate::region::LabelMode;
use std::sync::{Mutex, MutexGuard};

pub struct AppState {
    pub resolver: Mutex<LocationResolver>,
    /// Used by `/api/classify` when the request names no mode.
    pub default_mode: LabelMode,
}

impl AppState {
    pub fn new(resolver: LocationResolver) -> Self {
        let default_mode = resolver.mode();
        Self {
            resolver: Mutex::new(resolver),
            default_mode,
        }
    }

    /// A panic mid-request leaves the resolver usable; its cache is best-effort anyway.
    pub fn resolver(&self) -> MutexGuard<'_, LocationResolver> {
        self.resolver.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
