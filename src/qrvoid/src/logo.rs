//! Logo overlay for rendered QR codes.
//!
//! The logo is resized to a square, flattened onto an opaque white backplate
//! so transparent regions do not expose the modules underneath, optionally
//! faded, and composited onto a copy of the QR image at one of nine anchors.

use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use log::debug;
use serde::Deserialize;

/// Extra pixels kept between the quiet zone and an edge-anchored logo.
pub const SAFE_MARGIN_PX: u32 = 10;

/// Fraction of the base width used as the minimum edge padding, in percent.
const EDGE_PADDING_PERCENT: u32 = 5;

const BACKPLATE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Where the logo is placed on the QR image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    /// Parses an anchor name like `"top-left"`. Unknown names fall back to
    /// [`Anchor::Center`].
    pub fn parse(name: &str) -> Self {
        Anchor::from_str(name.trim(), true).unwrap_or_default()
    }
}

/// Size, opacity and position of a logo overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    /// Logo edge as a percentage of the shorter base side (0-100).
    pub size_percent: u32,
    /// Backplate opacity in percent (0-100); 100 is fully opaque.
    pub opacity_percent: u32,
    pub anchor: Anchor,
    /// Width of the QR quiet zone in pixels.
    pub border_width: u32,
}

impl Default for LogoPlacement {
    fn default() -> Self {
        Self {
            size_percent: 15,
            opacity_percent: 100,
            anchor: Anchor::Center,
            border_width: 0,
        }
    }
}

/// Composites `logo` onto a copy of `base`.
///
/// `base` is never modified. Without a logo, or when the computed logo size is
/// zero, the result is pixel-identical to `base`.
pub fn composite_logo(
    base: &DynamicImage,
    logo: Option<&DynamicImage>,
    placement: &LogoPlacement,
) -> RgbaImage {
    let mut composed = base.to_rgba8();
    let Some(logo) = logo else {
        return composed;
    };

    let (width, height) = base.dimensions();
    let logo_size = logo_size(width, height, placement.size_percent);
    if logo_size == 0 {
        debug!("Logo size rounds to zero for a {width}x{height} image, skipping overlay");
        return composed;
    }

    let resized = imageops::resize(&logo.to_rgba8(), logo_size, logo_size, FilterType::Lanczos3);
    let mut backplate = RgbaImage::from_pixel(logo_size, logo_size, BACKPLATE_COLOR);
    imageops::overlay(&mut backplate, &resized, 0, 0);

    if placement.opacity_percent < 100 {
        scale_alpha(&mut backplate, placement.opacity_percent);
    }

    let (x, y) = placement_position(width, height, logo_size, placement.anchor, placement.border_width);
    debug!(
        "Placing {logo_size}px logo at ({x}, {y}) anchored {:?}",
        placement.anchor
    );
    imageops::overlay(&mut composed, &backplate, x, y);
    composed
}

/// Logo edge length: `floor(min(width, height) * percent / 100)`.
pub fn logo_size(width: u32, height: u32, size_percent: u32) -> u32 {
    let side = u64::from(width.min(height));
    let size = side * u64::from(size_percent.min(100)) / 100;
    // Bounded by `side`, which came from a u32.
    u32::try_from(size).unwrap_or(u32::MAX)
}

/// Top-left corner of a `size` x `size` overlay for the given anchor.
///
/// Edge and corner anchors keep `max(5% of width, border_width + 10)` pixels
/// away from the edges they hug. Coordinates may go negative when the overlay
/// is larger than the space left by the padding; the overlay is then clipped.
pub fn placement_position(
    width: u32,
    height: u32,
    size: u32,
    anchor: Anchor,
    border_width: u32,
) -> (i64, i64) {
    let (width, height, size) = (i64::from(width), i64::from(height), i64::from(size));
    let safe_margin = i64::from(border_width) + i64::from(SAFE_MARGIN_PX);
    let padding = (width * i64::from(EDGE_PADDING_PERCENT) / 100).max(safe_margin);

    let left = padding;
    let center_x = (width - size).div_euclid(2);
    let right = width - size - padding;
    let top = padding;
    let center_y = (height - size).div_euclid(2);
    let bottom = height - size - padding;

    match anchor {
        Anchor::Center => (center_x, center_y),
        Anchor::TopLeft => (left, top),
        Anchor::Top => (center_x, top),
        Anchor::TopRight => (right, top),
        Anchor::Left => (left, center_y),
        Anchor::Right => (right, center_y),
        Anchor::BottomLeft => (left, bottom),
        Anchor::Bottom => (center_x, bottom),
        Anchor::BottomRight => (right, bottom),
    }
}

fn scale_alpha(image: &mut RgbaImage, opacity_percent: u32) {
    let opacity = u16::try_from(opacity_percent.min(100)).unwrap_or(100);
    for pixel in image.pixels_mut() {
        let scaled = (u16::from(pixel[3]) * opacity + 50) / 100;
        pixel[3] = u8::try_from(scaled).unwrap_or(u8::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn base(size: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(size, size, BLACK))
    }

    fn red_logo() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 32, RED))
    }

    fn is_red(pixel: &Rgba<u8>) -> bool {
        pixel[0] > 250 && pixel[1] < 5 && pixel[2] < 5 && pixel[3] == 255
    }

    fn placement(anchor: Anchor) -> LogoPlacement {
        LogoPlacement {
            size_percent: 20,
            opacity_percent: 100,
            anchor,
            border_width: 0,
        }
    }

    #[test]
    fn test_no_logo_returns_base() {
        let base = base(100);
        let out = composite_logo(&base, None, &placement(Anchor::Center));
        assert_eq!(out, base.to_rgba8());
    }

    #[test]
    fn test_zero_size_is_noop() {
        let base = base(100);
        let mut p = placement(Anchor::Center);
        p.size_percent = 0;
        assert_eq!(composite_logo(&base, Some(&red_logo()), &p), base.to_rgba8());

        // 4% of 20 px floors to zero
        let small = self::base(20);
        p.size_percent = 4;
        assert_eq!(composite_logo(&small, Some(&red_logo()), &p), small.to_rgba8());
    }

    #[test]
    fn test_base_is_not_mutated() {
        let base = base(100);
        let before = base.to_rgba8();
        for anchor in Anchor::value_variants() {
            let out = composite_logo(&base, Some(&red_logo()), &placement(*anchor));
            assert_ne!(out, before);
            assert_eq!(base.to_rgba8(), before);
        }
    }

    #[test]
    fn test_center_placement_pixels() {
        let out = composite_logo(&base(100), Some(&red_logo()), &placement(Anchor::Center));
        // 20 px logo centered at (40, 40)
        assert!(is_red(out.get_pixel(50, 50)));
        assert!(is_red(out.get_pixel(40, 40)));
        assert!(is_red(out.get_pixel(59, 59)));
        assert_eq!(*out.get_pixel(39, 50), BLACK);
        assert_eq!(*out.get_pixel(60, 50), BLACK);
    }

    #[test]
    fn test_transparent_logo_shows_white_backplate() {
        let clear = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0])));
        let out = composite_logo(&base(100), Some(&clear), &placement(Anchor::Center));
        assert_eq!(*out.get_pixel(50, 50), BACKPLATE_COLOR);
    }

    #[test]
    fn test_opacity_blends_with_base() {
        let mut p = placement(Anchor::Center);
        p.opacity_percent = 0;
        let out = composite_logo(&base(100), Some(&red_logo()), &p);
        assert_eq!(*out.get_pixel(50, 50), BLACK);

        p.opacity_percent = 50;
        let out = composite_logo(&base(100), Some(&red_logo()), &p);
        let pixel = out.get_pixel(50, 50);
        assert!(pixel[0] > 100 && pixel[0] < 155, "got {pixel:?}");
        assert_eq!(pixel[1], 0);
    }

    #[test]
    fn test_scale_alpha_rounds_to_nearest() {
        let mut image = RgbaImage::from_pixel(1, 3, RED);
        image.put_pixel(0, 1, Rgba([255, 0, 0, 1]));
        image.put_pixel(0, 2, Rgba([255, 0, 0, 0]));
        scale_alpha(&mut image, 50);
        assert_eq!(image.get_pixel(0, 0)[3], 128);
        assert_eq!(image.get_pixel(0, 1)[3], 1);
        assert_eq!(image.get_pixel(0, 2)[3], 0);

        let mut opaque = RgbaImage::from_pixel(1, 1, RED);
        scale_alpha(&mut opaque, 100);
        assert_eq!(opaque.get_pixel(0, 0)[3], 255);
        scale_alpha(&mut opaque, 1);
        assert_eq!(opaque.get_pixel(0, 0)[3], 3);
    }

    #[test]
    fn test_logo_size() {
        assert_eq!(logo_size(290, 400, 15), 43);
        assert_eq!(logo_size(100, 100, 29), 29);
        assert_eq!(logo_size(100, 50, 100), 50);
        assert_eq!(logo_size(100, 100, 150), 100);
        assert_eq!(logo_size(10, 10, 5), 0);
    }

    #[test]
    fn test_padding_uses_safe_margin() {
        // 5% of 400 = 20, but border 40 + 10 wins
        assert_eq!(placement_position(400, 400, 60, Anchor::TopLeft, 40), (50, 50));
        // 5% of 1000 = 50 beats 0 + 10
        assert_eq!(placement_position(1000, 1000, 100, Anchor::TopLeft, 0), (50, 50));
    }

    #[test]
    fn test_all_anchor_positions() {
        let pos = |anchor| placement_position(200, 200, 40, anchor, 0);
        // padding = max(10, 10) = 10
        assert_eq!(pos(Anchor::Center), (80, 80));
        assert_eq!(pos(Anchor::TopLeft), (10, 10));
        assert_eq!(pos(Anchor::Top), (80, 10));
        assert_eq!(pos(Anchor::TopRight), (150, 10));
        assert_eq!(pos(Anchor::Left), (10, 80));
        assert_eq!(pos(Anchor::Right), (150, 80));
        assert_eq!(pos(Anchor::BottomLeft), (10, 150));
        assert_eq!(pos(Anchor::Bottom), (80, 150));
        assert_eq!(pos(Anchor::BottomRight), (150, 150));
    }

    #[test]
    fn test_anchor_symmetry_on_square_base() {
        let (side, size, border) = (370, 55, 40);
        let pos = |anchor| placement_position(side, side, size, anchor, border);
        let side = i64::from(side);
        let size = i64::from(size);

        let (tl_x, tl_y) = pos(Anchor::TopLeft);
        let (tr_x, tr_y) = pos(Anchor::TopRight);
        assert_eq!(tl_y, tr_y);
        assert_eq!(tl_x, side - (tr_x + size));

        let (t_x, t_y) = pos(Anchor::Top);
        let (b_x, b_y) = pos(Anchor::Bottom);
        assert_eq!(t_x, b_x);
        assert_eq!(t_y, side - (b_y + size));
    }

    #[test]
    fn test_oversized_logo_goes_negative_and_clips() {
        let (x, _) = placement_position(100, 100, 100, Anchor::Right, 0);
        assert_eq!(x, -10);
        let mut p = placement(Anchor::BottomRight);
        p.size_percent = 100;
        let out = composite_logo(&base(100), Some(&red_logo()), &p);
        assert_eq!(out.dimensions(), (100, 100));
    }

    #[test]
    fn test_anchor_parse() {
        assert_eq!(Anchor::parse("top-left"), Anchor::TopLeft);
        assert_eq!(Anchor::parse("Bottom-Right"), Anchor::BottomRight);
        assert_eq!(Anchor::parse("bottom"), Anchor::Bottom);
        assert_eq!(Anchor::parse("middle"), Anchor::Center);
        assert_eq!(Anchor::parse(""), Anchor::Center);
    }
}
