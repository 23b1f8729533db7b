//! Pure calculation functions for target dimensions.
//!
//! All functions here are pure and testable without any I/O or pixels. The
//! codec itself is resize-agnostic: callers apply [`shrink_to_fit`] *before*
//! constructing the buffer handed to encode, and [`scale_for_display`] /
//! [`fit_within`] only ever shape a preview — their rounding must never feed
//! back into a stored container.

/// Longest edge new containers are shrunk to before encoding, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1020;

/// Fixed preview scale applied after decode.
pub const DEFAULT_DISPLAY_SCALE: f64 = 0.85;

/// Viewport bounds used by the gallery-style listing preview.
pub const DEFAULT_VIEWPORT: (u32, u32) = (1380, 920);

/// Shrink dimensions so the longer edge fits `max_dimension`.
///
/// Never upscales: the factor is `min(max_dimension / max(w, h), 1.0)` and
/// both edges round down.
///
/// # Examples
/// ```
/// # use ulif::resize::shrink_to_fit;
/// assert_eq!(shrink_to_fit(4000, 2000, 1000), (1000, 500));
/// // Already inside the bound: unchanged.
/// assert_eq!(shrink_to_fit(500, 200, 1000), (500, 200));
/// ```
pub fn shrink_to_fit(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longer_edge = width.max(height);
    if longer_edge == 0 {
        return (0, 0);
    }
    let factor = (max_dimension as f64 / longer_edge as f64).min(1.0);
    (
        (width as f64 * factor) as u32,
        (height as f64 * factor) as u32,
    )
}

/// Scale dimensions by a fixed display factor, rounding down.
///
/// Preview-only: the result is rendered, never re-encoded.
pub fn scale_for_display(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (
        (width as f64 * scale) as u32,
        (height as f64 * scale) as u32,
    )
}

/// Fit dimensions inside a viewport, preserving aspect ratio.
///
/// Images already inside the viewport are returned unchanged (no upscale);
/// larger images shrink by the tighter of the two edge ratios.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    if width == 0 || height == 0 {
        return (width.min(max_width), height.min(max_height));
    }
    let factor = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    (
        (width as f64 * factor) as u32,
        (height as f64 * factor) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // shrink_to_fit tests
    // =========================================================================

    #[test]
    fn shrink_landscape_to_longer_edge() {
        assert_eq!(shrink_to_fit(4000, 2000, 1000), (1000, 500));
    }

    #[test]
    fn shrink_portrait_to_longer_edge() {
        assert_eq!(shrink_to_fit(2000, 4000, 1000), (500, 1000));
    }

    #[test]
    fn shrink_never_upscales() {
        assert_eq!(shrink_to_fit(500, 200, 1000), (500, 200));
        assert_eq!(shrink_to_fit(1000, 1000, 1000), (1000, 1000));
    }

    #[test]
    fn shrink_rounds_down() {
        // 999/1000 factor applied to 333 → 332.667 → 332
        assert_eq!(shrink_to_fit(1000, 333, 999), (999, 332));
    }

    #[test]
    fn shrink_zero_dimensions_do_not_divide_by_zero() {
        assert_eq!(shrink_to_fit(0, 0, 1000), (0, 0));
    }

    #[test]
    fn shrink_default_bound_matches_encoder() {
        assert_eq!(shrink_to_fit(2040, 1020, DEFAULT_MAX_DIMENSION), (1020, 510));
    }

    // =========================================================================
    // scale_for_display tests
    // =========================================================================

    #[test]
    fn display_scale_rounds_down() {
        // 100 * 0.85 = 85, 33 * 0.85 = 28.05 → 28
        assert_eq!(scale_for_display(100, 33, DEFAULT_DISPLAY_SCALE), (85, 28));
    }

    #[test]
    fn display_scale_of_zero_image_is_zero() {
        assert_eq!(scale_for_display(0, 0, DEFAULT_DISPLAY_SCALE), (0, 0));
    }

    // =========================================================================
    // fit_within tests
    // =========================================================================

    #[test]
    fn fit_within_leaves_small_images_alone() {
        assert_eq!(fit_within(800, 600, 1380, 920), (800, 600));
    }

    #[test]
    fn fit_within_shrinks_by_tighter_edge() {
        // 2760x920 viewport-limited by width: factor 0.5
        assert_eq!(fit_within(2760, 1000, 1380, 920), (1380, 500));
        // Height is the tighter constraint here.
        assert_eq!(fit_within(1400, 1840, 1380, 920), (700, 920));
    }

    #[test]
    fn fit_within_degenerate_edges() {
        assert_eq!(fit_within(0, 5000, 1380, 920), (0, 920));
        assert_eq!(fit_within(0, 0, 1380, 920), (0, 0));
    }
}
