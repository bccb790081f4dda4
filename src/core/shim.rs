//! Display/immersion shim of the native activity.
//!
//! The activity is created, resumed and told about system UI visibility changes by the OS.
//! Every one of those events ends in the same place: [`ImmersionShim::apply_immersive_flags`],
//! which writes the whole flag set computed by [`immersive_flags`]. Nothing is read back and
//! merged, so any number of triggers in any order leave the same bitmask behind.

use super::{
    config::DisplayConfig,
    display::{DisplayQuery, DisplaySize},
    platform::ActivityPlatform,
    ui_flags::{immersive_flags, ApiLevel, SystemUiFlags},
};

pub struct ImmersionShim<P: ActivityPlatform> {
    platform: P,
    settings: DisplayConfig,
    api_level: ApiLevel,
    native_resolution: Option<DisplaySize>,
    /// Last bitmask written to the root view
    applied: Option<SystemUiFlags>,
    created: bool,
    listening: bool,
}

impl<P: ActivityPlatform> ImmersionShim<P> {
    pub fn new(platform: P, settings: DisplayConfig) -> Self {
        Self {
            platform,
            settings,
            api_level: ApiLevel::BASE,
            native_resolution: None,
            applied: None,
            created: false,
            listening: false,
        }
    }

    /// Runs once, before the native module gets control.
    pub fn on_create(&mut self) -> Option<DisplaySize> {
        self.api_level = match self.platform.api_level() {
            Ok(level) => level,
            Err(err) => {
                log::warn!("{}, assuming {:?}", err, ApiLevel::BASE);
                ApiLevel::BASE
            }
        };

        let query = DisplayQuery::for_api_level(self.api_level);
        self.native_resolution = match query.query(&mut self.platform) {
            Ok(size) => {
                log::info!(
                    "Native resolution {}x{} ({:?} query, API {})",
                    size.width,
                    size.height,
                    query,
                    self.api_level.0
                );
                Some(size)
            }
            Err(err) => {
                log::warn!("Failed to read display size: {}", err);
                None
            }
        };

        self.apply_immersive_flags();
        self.created = true;

        if self.settings.immersive {
            match self.platform.listen_system_ui_visibility() {
                Ok(()) => self.listening = true,
                Err(err) => log::warn!("{}", err),
            }
        }

        if self.settings.keep_screen_on {
            if let Err(err) = self.platform.set_keep_screen_on(true) {
                log::warn!("{}", err);
            }
        }

        self.native_resolution
    }

    pub fn on_resume(&mut self) {
        log::debug!("Activity resumed");
        self.apply_immersive_flags();
    }

    /// The payload only tells that something changed, the flag set is rewritten as a whole.
    pub fn on_system_ui_visibility_change(&mut self, visibility: SystemUiFlags) {
        if !self.listening {
            log::trace!("Visibility change {:#x} without listener, ignored", visibility.bits());
            return;
        }
        log::debug!("System UI visibility changed to {:#x}", visibility.bits());
        self.apply_immersive_flags();
    }

    /// Called when the window regains focus: dialogs and the recents screen can clear our
    /// bits without a visibility callback. Only the bits we wrote are compared, the framework
    /// keeps its own bits (light status bar and the like) in the same register.
    pub fn sync_system_ui_visibility(&mut self) {
        if !self.created {
            return;
        }
        let Some(applied) = self.applied else {
            self.apply_immersive_flags();
            return;
        };
        match self.platform.system_ui_visibility() {
            Ok(visibility) if visibility.contains(applied) => {}
            Ok(visibility) => {
                log::debug!("System UI visibility drifted to {:#x}", visibility.bits());
                self.apply_immersive_flags();
            }
            Err(err) => {
                log::warn!("{}", err);
                self.apply_immersive_flags();
            }
        }
    }

    /// The bitmask the root view should carry, `None` when immersive mode is turned off
    pub fn desired_flags(&self) -> Option<SystemUiFlags> {
        self.settings
            .immersive
            .then(|| immersive_flags(self.api_level, self.settings.sticky))
    }

    fn apply_immersive_flags(&mut self) {
        let Some(flags) = self.desired_flags() else {
            return;
        };
        match self.platform.set_system_ui_visibility(flags) {
            Ok(()) => self.applied = Some(flags),
            Err(err) => log::warn!("{}", err),
        }
    }

    pub fn native_resolution(&self) -> Option<DisplaySize> {
        self.native_resolution
    }

    pub fn api_level(&self) -> ApiLevel {
        self.api_level
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
