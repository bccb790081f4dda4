//! Display and immersion glue for the Extreme Tux Racer native activity.
//!
//! `core` holds the platform independent part, `android` binds it to the running activity.

pub mod core {
    pub mod config;
    pub mod display;
    pub mod error;
    pub mod exception;
    pub mod logging;
    pub mod platform;
    pub mod resolution;
    pub mod shim;
    pub mod ui_flags;
    pub mod ui_thread;
}

#[cfg(target_os = "android")]
pub mod android {
    pub mod bridge;
    pub mod main;
    pub mod utils {
        pub mod application_context;
        pub mod jni_platform;
        pub mod ndk;
    }
}
