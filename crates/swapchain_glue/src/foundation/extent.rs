//! Two-dimensional pixel extents

use serde::{Deserialize, Serialize};

/// A width/height pair in physical pixels
///
/// Used for window framebuffer sizes, monitor sizes and the allocated
/// back-buffer size alike; all of them are treated uniformly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    /// Width in physical pixels
    pub width: u32,
    /// Height in physical pixels
    pub height: u32,
}

impl Extent {
    /// An extent with no area
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new extent
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build an extent from the signed sizes GLFW reports
    ///
    /// Negative values are clamped to zero.
    #[must_use]
    pub fn from_signed(width: i32, height: i32) -> Self {
        Self {
            width: u32::try_from(width).unwrap_or(0),
            height: u32::try_from(height).unwrap_or(0),
        }
    }

    /// True when either dimension is zero
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Per-axis maximum of two extents
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

impl From<(u32, u32)> for Extent {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl From<Extent> for (u32, u32) {
    fn from(extent: Extent) -> Self {
        (extent.width, extent.height)
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:4} x {:4} px", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signed_clamps_negative() {
        assert_eq!(Extent::from_signed(-5, 10), Extent::new(0, 10));
        assert_eq!(Extent::from_signed(640, 480), Extent::new(640, 480));
    }

    #[test]
    fn test_is_empty() {
        assert!(Extent::ZERO.is_empty());
        assert!(Extent::new(0, 720).is_empty());
        assert!(Extent::new(1280, 0).is_empty());
        assert!(!Extent::new(1, 1).is_empty());
    }

    #[test]
    fn test_max_is_per_axis() {
        let a = Extent::new(1920, 600);
        let b = Extent::new(800, 1080);
        assert_eq!(a.max(b), Extent::new(1920, 1080));
    }

    #[test]
    fn test_display_matches_resize_notice() {
        assert_eq!(Extent::new(800, 600).to_string(), " 800 x  600 px");
    }
}
