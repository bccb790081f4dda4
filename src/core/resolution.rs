use super::display::DisplaySize;
use std::sync::RwLock;

/// Written once the activity is created, read by the native module when it sets up its video modes.
static NATIVE_RESOLUTION: RwLock<Option<DisplaySize>> = RwLock::new(None);

pub fn publish_native_resolution(size: DisplaySize) {
    match NATIVE_RESOLUTION.write() {
        Ok(mut slot) => *slot = Some(size),
        Err(poisoned) => *poisoned.into_inner() = Some(size),
    }
}

pub fn native_resolution() -> Option<DisplaySize> {
    match NATIVE_RESOLUTION.read() {
        Ok(slot) => *slot,
        Err(poisoned) => *poisoned.into_inner(),
    }
}
