use std::{
    sync::{Mutex, PoisonError},
    thread::{self, ThreadId},
};

/// Holds a value that may only be touched from the thread that installed it.
/// View calls are only legal on the activity's UI thread, so the shim is installed there by
/// `onCreate` and later callbacks reach it only when they arrive on that same thread.
pub struct UiThreadCell<T> {
    slot: Mutex<Option<(ThreadId, T)>>,
}

impl<T> UiThreadCell<T> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Binds `value` to the calling thread, replacing whatever was installed before.
    /// An activity recreated after a configuration change installs a fresh value.
    pub fn install(&self, value: T) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some((thread::current().id(), value));
    }

    /// Runs `f` on the installed value. `None` when nothing is installed or when called
    /// from another thread, in which case `f` does not run.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let (owner, value) = slot.as_mut()?;
        if *owner != thread::current().id() {
            log::warn!("UI state accessed from {:?}, ignored", thread::current().name());
            return None;
        }
        Some(f(value))
    }
}

impl<T> Default for UiThreadCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn should_be_empty_before_install() {
        let cell = UiThreadCell::<u32>::new();
        assert_eq!(cell.with(|value| *value), None);
    }

    #[test]
    fn should_run_on_installing_thread() {
        let cell = UiThreadCell::new();
        cell.install(1);
        assert_eq!(cell.with(|value| { *value += 1; *value }), Some(2));
        cell.install(10);
        assert_eq!(cell.with(|value| *value), Some(10));
    }

    #[test]
    fn should_refuse_other_threads() {
        let cell = Arc::new(UiThreadCell::new());
        cell.install(vec![1]);

        let remote = Arc::clone(&cell);
        let result = thread::spawn(move || remote.with(|value| value.push(2)))
            .join()
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(cell.with(|value| value.clone()), Some(vec![1]));
    }
}
