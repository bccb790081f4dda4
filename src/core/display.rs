use super::{error::ShimError, platform::ActivityPlatform, ui_flags::ApiLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Builds a size from the `Point.x`/`Point.y` integers the framework hands back
    pub fn from_point(x: i32, y: i32) -> Self {
        Self {
            width: x.max(0) as u32,
            height: y.max(0) as u32,
        }
    }
}

/// How the display geometry is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayQuery {
    /// `Display.getSize`, excludes the area taken by system decorations
    Legacy,
    /// `Display.getRealSize`, the full panel
    Precise,
}

impl DisplayQuery {
    pub fn for_api_level(api_level: ApiLevel) -> Self {
        if api_level.supports_real_size() {
            DisplayQuery::Precise
        } else {
            DisplayQuery::Legacy
        }
    }

    pub fn query<P>(self, platform: &mut P) -> Result<DisplaySize, ShimError>
    where
        P: ActivityPlatform + ?Sized,
    {
        match self {
            DisplayQuery::Legacy => platform.display_size(),
            DisplayQuery::Precise => platform.real_display_size(),
        }
    }
}
