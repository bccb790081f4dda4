use crate::core::{logging::ActivityExpectation, resolution::native_resolution};
use winit::{
    application::ApplicationHandler,
    event_loop::EventLoop,
    platform::android::{activity::AndroidApp, EventLoopBuilderExtAndroid},
};

/// Entry point for the game's native module. Its crate owns the exported symbol:
///
/// ```ignore
/// #[no_mangle]
/// fn android_main(android_app: AndroidApp) {
///     tuxracer_activity::android::main::run_activity(android_app, Game::default());
/// }
/// ```
///
/// By the time this runs the Java activity has already read the resolution and requested
/// immersive mode from its `onCreate` (see [`crate::android::bridge`]). Later resumes and
/// visibility changes are handled on the UI thread, `module` gets the event loop to itself.
pub fn run_activity<M: ApplicationHandler>(android_app: AndroidApp, mut module: M) {
    match native_resolution() {
        Some(size) => log::info!("Handing {}x{} to the native module", size.width, size.height),
        None => log::warn!("No native resolution published, is the activity TuxRacerActivity?"),
    }

    let event_loop = EventLoop::builder()
        .with_android_app(android_app)
        .build()
        .etr_expect("Failed to create event loop");

    event_loop
        .run_app(&mut module)
        .etr_expect("Failed to run native module");
}
