/// The pending-exception half of a JNI environment.
/// A failed JNI call leaves the Java exception pending on the thread, and every JNI call
/// after that is undefined until it is cleared.
#[cfg_attr(test, mockall::automock)]
pub trait PendingException {
    fn exception_check(&mut self) -> bool;

    /// Prints the exception and its backtrace to logcat
    fn exception_describe(&mut self);

    fn exception_clear(&mut self);
}

/// Clears the exception left behind by `call`, if any. Returns whether one was pending.
pub fn clear_pending_exception<E: PendingException + ?Sized>(env: &mut E, call: &str) -> bool {
    if !env.exception_check() {
        return false;
    }
    log::warn!("Java exception thrown by `{}`, clearing it", call);
    env.exception_describe();
    env.exception_clear();
    true
}
