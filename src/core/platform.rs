use super::{
    display::DisplaySize,
    error::ShimError,
    ui_flags::{ApiLevel, SystemUiFlags},
};

/// Everything the shim asks of the OS.
/// On a device this is backed by JNI calls on the activity, see `android::utils::jni_platform`.
#[cfg_attr(test, mockall::automock)]
pub trait ActivityPlatform {
    fn api_level(&mut self) -> Result<ApiLevel, ShimError>;

    fn real_display_size(&mut self) -> Result<DisplaySize, ShimError>;

    fn display_size(&mut self) -> Result<DisplaySize, ShimError>;

    /// Visibility bitmask currently held by the window's root view
    fn system_ui_visibility(&mut self) -> Result<SystemUiFlags, ShimError>;

    /// Overwrites the whole bitmask of the root view
    fn set_system_ui_visibility(&mut self, flags: SystemUiFlags) -> Result<(), ShimError>;

    fn set_keep_screen_on(&mut self, keep_on: bool) -> Result<(), ShimError>;

    /// Registers the activity as the root view's system UI visibility listener.
    /// Changes then arrive through `ImmersionShim::on_system_ui_visibility_change`.
    fn listen_system_ui_visibility(&mut self) -> Result<(), ShimError>;
}
