use bitflags::bitflags;

bitflags! {
    /// Values of the `View.SYSTEM_UI_FLAG_*` constants, see
    /// https://developer.android.com/reference/android/view/View#SYSTEM_UI_FLAG_FULLSCREEN
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SystemUiFlags: i32 {
        const LOW_PROFILE = 0x0000_0001;
        const HIDE_NAVIGATION = 0x0000_0002;
        const FULLSCREEN = 0x0000_0004;
        const LAYOUT_STABLE = 0x0000_0100;
        const LAYOUT_HIDE_NAVIGATION = 0x0000_0200;
        const LAYOUT_FULLSCREEN = 0x0000_0400;
        const IMMERSIVE = 0x0000_0800;
        const IMMERSIVE_STICKY = 0x0000_1000;

        // The framework owns the remaining bits, keep whatever it reports
        const _ = !0;
    }
}

/// `Build.VERSION.SDK_INT` of the running device
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// Oldest level the activity can run on, assumed when the real level cannot be read
    pub const BASE: ApiLevel = ApiLevel(1);
    /// `Display.getRealSize` appeared here
    pub const JELLY_BEAN_MR1: ApiLevel = ApiLevel(17);
    /// `SYSTEM_UI_FLAG_IMMERSIVE_STICKY` appeared here
    pub const KITKAT: ApiLevel = ApiLevel(19);

    pub fn supports_real_size(self) -> bool {
        self >= Self::JELLY_BEAN_MR1
    }

    pub fn supports_immersive_sticky(self) -> bool {
        self >= Self::KITKAT
    }
}

/// The flag set requested at creation, on resume and after every visibility change.
/// Pure, so re-applying it can never drift.
pub fn immersive_flags(api_level: ApiLevel, sticky_allowed: bool) -> SystemUiFlags {
    let mut flags = SystemUiFlags::FULLSCREEN
        | SystemUiFlags::HIDE_NAVIGATION
        | SystemUiFlags::LAYOUT_FULLSCREEN
        | SystemUiFlags::LAYOUT_HIDE_NAVIGATION
        | SystemUiFlags::LAYOUT_STABLE;
    if sticky_allowed && api_level.supports_immersive_sticky() {
        flags |= SystemUiFlags::IMMERSIVE_STICKY;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_SET: SystemUiFlags = SystemUiFlags::FULLSCREEN
        .union(SystemUiFlags::HIDE_NAVIGATION)
        .union(SystemUiFlags::LAYOUT_FULLSCREEN)
        .union(SystemUiFlags::LAYOUT_HIDE_NAVIGATION)
        .union(SystemUiFlags::LAYOUT_STABLE);

    #[test]
    fn should_match_framework_constants() {
        assert_eq!(immersive_flags(ApiLevel(16), true).bits(), 0x0706);
        assert_eq!(immersive_flags(ApiLevel(34), true).bits(), 0x1706);
    }

    #[test]
    fn should_add_sticky_from_kitkat() {
        assert_eq!(immersive_flags(ApiLevel::KITKAT, true), BASE_SET | SystemUiFlags::IMMERSIVE_STICKY);
        assert_eq!(immersive_flags(ApiLevel(33), true), BASE_SET | SystemUiFlags::IMMERSIVE_STICKY);
    }

    #[test]
    fn should_omit_sticky_before_kitkat() {
        for level in [1, 14, 17, 18] {
            let flags = immersive_flags(ApiLevel(level), true);
            assert_eq!(flags, BASE_SET);
            assert!(!flags.contains(SystemUiFlags::IMMERSIVE_STICKY));
        }
    }

    #[test]
    fn should_omit_sticky_when_disallowed() {
        assert_eq!(immersive_flags(ApiLevel(30), false), BASE_SET);
    }

    #[test]
    fn should_gate_capabilities_by_threshold() {
        assert!(!ApiLevel(16).supports_real_size());
        assert!(ApiLevel(17).supports_real_size());
        assert!(!ApiLevel(18).supports_immersive_sticky());
        assert!(ApiLevel(19).supports_immersive_sticky());
    }

    #[test]
    fn should_keep_unknown_framework_bits() {
        let reported = SystemUiFlags::from_bits_retain(0x0001_0000) | SystemUiFlags::FULLSCREEN;
        assert_eq!(reported.bits(), 0x0001_0004);
    }
}
