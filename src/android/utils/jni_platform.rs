use super::ndk::run_in_jvm;
use crate::core::{
    display::DisplaySize,
    error::ShimError,
    platform::ActivityPlatform,
    ui_flags::{ApiLevel, SystemUiFlags},
};
use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};

/// `WindowManager.LayoutParams.FLAG_KEEP_SCREEN_ON`
const FLAG_KEEP_SCREEN_ON: i32 = 0x0000_0080;

const VISIBILITY_LISTENER: &str = "android/view/View$OnSystemUiVisibilityChangeListener";

/// [`ActivityPlatform`] backed by JNI calls on the running activity.
///
/// `android_app.set_window_flags(WindowManagerFlags::FULLSCREEN, ...)` is not enough to hide the
/// navigation bar, the decor view has to be asked directly.
/// More info: https://github.com/rust-mobile/android-activity/issues/95
///
/// View calls are only legal on the UI thread. This type is created by and lives in the
/// activity's Java callbacks, see `android::bridge`.
pub struct JniPlatform {
    vm: JavaVM,
    activity: GlobalRef,
}

impl JniPlatform {
    pub fn new(env: &mut JNIEnv, activity: &JObject) -> Result<Self, ShimError> {
        let vm = env
            .get_java_vm()
            .map_err(|err| ShimError::platform("GetJavaVM", err))?;
        let activity = env
            .new_global_ref(activity)
            .map_err(|err| ShimError::platform("NewGlobalRef", err))?;
        Ok(Self { vm, activity })
    }

    pub fn run<F, R>(&self, call: &'static str, jni_function: F) -> Result<R, ShimError>
    where
        F: for<'local> FnOnce(&mut JNIEnv<'local>, &JObject) -> jni::errors::Result<R>,
    {
        run_in_jvm(&self.vm, &self.activity, call, jni_function)
    }
}

fn window<'local>(env: &mut JNIEnv<'local>, activity: &JObject) -> jni::errors::Result<JObject<'local>> {
    env.call_method(activity, "getWindow", "()Landroid/view/Window;", &[])?
        .l()
}

fn decor_view<'local>(env: &mut JNIEnv<'local>, activity: &JObject) -> jni::errors::Result<JObject<'local>> {
    let window = window(env, activity)?;
    env.call_method(&window, "getDecorView", "()Landroid/view/View;", &[])?
        .l()
}

/// Calls `Display.getRealSize(Point)` or `Display.getSize(Point)` on the default display
fn query_display(env: &mut JNIEnv, activity: &JObject, method: &str) -> jni::errors::Result<DisplaySize> {
    let window_manager = env
        .call_method(activity, "getWindowManager", "()Landroid/view/WindowManager;", &[])?
        .l()?;
    let display = env
        .call_method(&window_manager, "getDefaultDisplay", "()Landroid/view/Display;", &[])?
        .l()?;

    let point = env.new_object("android/graphics/Point", "()V", &[])?;
    env.call_method(
        &display,
        method,
        "(Landroid/graphics/Point;)V",
        &[JValue::Object(&point)],
    )?
    .v()?;

    let x = env.get_field(&point, "x", "I")?.i()?;
    let y = env.get_field(&point, "y", "I")?.i()?;
    Ok(DisplaySize::from_point(x, y))
}

impl ActivityPlatform for JniPlatform {
    fn api_level(&mut self) -> Result<ApiLevel, ShimError> {
        self.run("Build.VERSION.SDK_INT", |env, _| {
            let sdk_int = env
                .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
                .i()?;
            Ok(ApiLevel(sdk_int.max(0) as u32))
        })
    }

    fn real_display_size(&mut self) -> Result<DisplaySize, ShimError> {
        self.run("Display.getRealSize", |env, activity| {
            query_display(env, activity, "getRealSize")
        })
    }

    fn display_size(&mut self) -> Result<DisplaySize, ShimError> {
        self.run("Display.getSize", |env, activity| {
            query_display(env, activity, "getSize")
        })
    }

    fn system_ui_visibility(&mut self) -> Result<SystemUiFlags, ShimError> {
        self.run("View.getSystemUiVisibility", |env, activity| {
            let decor_view = decor_view(env, activity)?;
            let bits = env
                .call_method(&decor_view, "getSystemUiVisibility", "()I", &[])?
                .i()?;
            Ok(SystemUiFlags::from_bits_retain(bits))
        })
    }

    fn set_system_ui_visibility(&mut self, flags: SystemUiFlags) -> Result<(), ShimError> {
        self.run("View.setSystemUiVisibility", |env, activity| {
            let decor_view = decor_view(env, activity)?;
            env.call_method(
                &decor_view,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(flags.bits())],
            )?
            .v()
        })
    }

    fn set_keep_screen_on(&mut self, keep_on: bool) -> Result<(), ShimError> {
        let (call, method) = if keep_on {
            ("Window.addFlags", "addFlags")
        } else {
            ("Window.clearFlags", "clearFlags")
        };
        self.run(call, |env, activity| {
            let window = window(env, activity)?;
            env.call_method(&window, method, "(I)V", &[JValue::Int(FLAG_KEEP_SCREEN_ON)])?
                .v()
        })
    }

    fn listen_system_ui_visibility(&mut self) -> Result<(), ShimError> {
        const CALL: &str = "View.setOnSystemUiVisibilityChangeListener";
        let registered = self.run(CALL, |env, activity| {
            if !env.is_instance_of(activity, VISIBILITY_LISTENER)? {
                return Ok(false);
            }
            let decor_view = decor_view(env, activity)?;
            env.call_method(
                &decor_view,
                "setOnSystemUiVisibilityChangeListener",
                "(Landroid/view/View$OnSystemUiVisibilityChangeListener;)V",
                &[JValue::Object(activity)],
            )?
            .v()?;
            Ok(true)
        })?;

        if registered {
            Ok(())
        } else {
            Err(ShimError::platform(CALL, "activity does not implement the listener"))
        }
    }
}
