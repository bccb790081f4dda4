//! Lifecycle callbacks of `org.tuxracer.activity.TuxRacerActivity` (see `java/`).
//!
//! The Java activity forwards `onCreate`, `onResume`, `onWindowFocusChanged` and the root
//! view's visibility listener here. Those run on the UI thread, which is the only thread
//! allowed to touch the decor view, so the shim lives in a [`UiThreadCell`] bound to it.
//! The native module's own thread (`android_main`) never calls into the shim.

use crate::{
    android::utils::{application_context::ApplicationContext, jni_platform::JniPlatform},
    core::{
        config::{self, ActivityConfig},
        resolution::publish_native_resolution,
        shim::ImmersionShim,
        ui_flags::SystemUiFlags,
        ui_thread::UiThreadCell,
    },
};
use jni::{
    objects::{JClass, JObject},
    sys::{jboolean, jint, JNI_TRUE},
    JNIEnv,
};
use sentry::integrations::log::{LogFilter, SentryLogger};
use std::sync::OnceLock;

const LOG_TAG: &str = "tuxracer";

static SHIM: UiThreadCell<ImmersionShim<JniPlatform>> = UiThreadCell::new();

/// Read once per process: `try_*` overrides are consumed by the first read, and an
/// activity recreated on rotation must keep the same settings.
static CONFIG: OnceLock<ActivityConfig> = OnceLock::new();

/// Flushes pending crash reports when dropped, kept for the whole process
static LOGGING: OnceLock<Option<sentry::ClientInitGuard>> = OnceLock::new();

/// Called before `super.onCreate`, so before `android_main` starts and reads the resolution
#[no_mangle]
pub extern "system" fn Java_org_tuxracer_activity_TuxRacerActivity_nativeOnCreate(
    mut env: JNIEnv,
    _class: JClass,
    activity: JObject,
) {
    std::env::set_var("RUST_BACKTRACE", "full");

    let platform = match JniPlatform::new(&mut env, &activity) {
        Ok(platform) => platform,
        Err(err) => {
            LOGGING.get_or_init(|| init_logging(&ActivityConfig::default()));
            log::error!("{}, immersive mode disabled", err);
            return;
        }
    };

    let mut context_error = None;
    let activity_config = CONFIG.get_or_init(|| match ApplicationContext::build(&platform) {
        Ok(context) => config::parse_config(&context.config_path()),
        Err(err) => {
            context_error = Some(err);
            ActivityConfig::default()
        }
    });

    LOGGING.get_or_init(|| {
        let guard = init_logging(activity_config);
        log::info!("tuxracer-activity {}", config::VERSION);
        guard
    });
    if let Some(err) = context_error {
        log::warn!("{}, running with the default config", err);
    }

    let mut shim = ImmersionShim::new(platform, activity_config.display.clone());
    if let Some(size) = shim.on_create() {
        publish_native_resolution(size);
    }
    SHIM.install(shim);
}

#[no_mangle]
pub extern "system" fn Java_org_tuxracer_activity_TuxRacerActivity_nativeOnResume(
    _env: JNIEnv,
    _class: JClass,
) {
    if SHIM.with(|shim| shim.on_resume()).is_none() {
        log::warn!("Resumed without a created activity");
    }
}

/// Dialogs, the recents screen and the keyboard can clear the bits without a visibility
/// callback, coming back into focus is where that shows.
#[no_mangle]
pub extern "system" fn Java_org_tuxracer_activity_TuxRacerActivity_nativeOnWindowFocusChanged(
    _env: JNIEnv,
    _class: JClass,
    has_focus: jboolean,
) {
    if has_focus == JNI_TRUE {
        SHIM.with(|shim| shim.sync_system_ui_visibility());
    }
}

#[no_mangle]
pub extern "system" fn Java_org_tuxracer_activity_TuxRacerActivity_nativeOnSystemUiVisibilityChange(
    _env: JNIEnv,
    _class: JClass,
    visibility: jint,
) {
    SHIM.with(|shim| shim.on_system_ui_visibility_change(SystemUiFlags::from_bits_retain(visibility)));
}

/// Wraps the Android logger with Sentry's logger. Without a valid DSN only the Android
/// logger is installed.
fn init_logging(config: &ActivityConfig) -> Option<sentry::ClientInitGuard> {
    #[cfg(debug_assertions)] // Enable verbose logging in debug builds
    let log_level = log::LevelFilter::Trace;
    #[cfg(not(debug_assertions))]
    let log_level = config.log.level_filter();

    let android_config = android_logger::Config::default()
        .with_tag(LOG_TAG)
        .with_max_level(log_level);

    // A DSN that does not parse would make `sentry::init` panic
    let dsn = config
        .crash_report
        .dsn()
        .filter(|dsn| dsn.parse::<sentry::types::Dsn>().is_ok());

    let Some(dsn) = dsn else {
        android_logger::init_once(android_config);
        if config.crash_report.dsn().is_some() {
            log::warn!("Invalid crash report DSN, crash reporting disabled");
        }
        return None;
    };

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            enable_logs: true,
            ..Default::default()
        },
    ));

    let logger = SentryLogger::with_dest(android_logger::AndroidLogger::new(android_config))
        .filter(|md| match md.level() {
            // Capture error records as Sentry events
            log::Level::Error => LogFilter::Event,
            // Ignore trace level records, as they're too verbose
            log::Level::Trace => LogFilter::Ignore,
            // Capture everything else as a log
            _ => LogFilter::Log,
        });
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(log_level);
    }

    Some(guard)
}
