use crate::core::{
    error::ShimError,
    exception::{clear_pending_exception, PendingException},
};
use jni::objects::{GlobalRef, JObject};
use jni::{JNIEnv, JavaVM};

/// Local references the frame of a single call may create
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// A higher-order function to run a provided JNI function within the JVM context.
///
/// The function gets the activity object and runs inside its own local frame. When it fails
/// the Java exception it raised is described and cleared here, so the next JNI call on this
/// thread (and the Java frame we return to) starts clean.
pub fn run_in_jvm<F, R>(
    vm: &JavaVM,
    activity: &GlobalRef,
    call: &'static str,
    jni_function: F,
) -> Result<R, ShimError>
where
    F: for<'local> FnOnce(&mut JNIEnv<'local>, &JObject) -> jni::errors::Result<R>,
{
    // Already attached when called from a Java callback, the guard then leaves it attached
    let mut env = vm
        .attach_current_thread()
        .map_err(|err| ShimError::platform(call, err))?;

    let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
        jni_function(env, activity.as_obj())
    });

    result.map_err(|err| {
        clear_pending_exception(&mut *env, call);
        ShimError::platform(call, err)
    })
}

impl PendingException for JNIEnv<'_> {
    fn exception_check(&mut self) -> bool {
        JNIEnv::exception_check(self).unwrap_or(false)
    }

    fn exception_describe(&mut self) {
        if let Err(err) = JNIEnv::exception_describe(self) {
            log::warn!("Failed to describe Java exception: {}", err);
        }
    }

    fn exception_clear(&mut self) {
        if let Err(err) = JNIEnv::exception_clear(self) {
            log::error!("Failed to clear Java exception: {}", err);
        }
    }
}
