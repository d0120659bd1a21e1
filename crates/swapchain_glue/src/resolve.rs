//! Back-buffer size resolution
//!
//! Decides, one axis at a time, how large the swapchain's back-buffer should be
//! for the coming frame. Two usage patterns fall out of the same rule:
//!
//! - exact fit: no minimum, shrinking allowed, the back-buffer tracks the window;
//! - monitor sized: a large minimum with `never_downsize`, the back-buffer only
//!   grows and live window resizing never reallocates.

use crate::foundation::Extent;

/// Resolve a single back-buffer dimension
///
/// The request is first clamped up to `min`. A clamped request smaller than
/// `current` is refused when `never_downsize` is set.
#[must_use]
pub const fn resolve_size(current: u32, requested: u32, min: u32, never_downsize: bool) -> u32 {
    let requested = if requested < min { min } else { requested };

    if requested < current && never_downsize {
        return current;
    }

    requested
}

/// Resolve both back-buffer dimensions independently
#[must_use]
pub const fn resolve_extent(
    current: Extent,
    requested: Extent,
    min: Extent,
    never_downsize: bool,
) -> Extent {
    Extent::new(
        resolve_size(current.width, requested.width, min.width, never_downsize),
        resolve_size(current.height, requested.height, min.height, never_downsize),
    )
}
