//! QR symbol rendering on top of the `qrcode` crate.

use crate::error::{Error, Result};
use clap::ValueEnum;
use image::{Rgba, RgbaImage};
use qrcode::render::svg;
use qrcode::{Color, EcLevel, QrCode};
use serde::Deserialize;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Largest image edge, in pixels, the renderers will produce.
pub const MAX_IMAGE_SIDE: u32 = 32_768;

/// Error-correction level; higher levels survive a larger logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[value(rename_all = "UPPER")]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    #[default]
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// How a QR code is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub ec_level: ErrorCorrection,
    /// Pixels per module edge.
    pub box_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
    /// Round the outer corners of modules.
    pub rounded: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ec_level: ErrorCorrection::H,
            box_size: 10,
            border: 4,
            foreground: BLACK,
            background: WHITE,
            rounded: true,
        }
    }
}

impl RenderOptions {
    /// Quiet zone width in pixels, used to keep logos off the border.
    pub fn border_width_px(&self) -> u32 {
        self.border.saturating_mul(self.box_size)
    }
}

/// Parses `#RRGGBB`, `#RRGGBBAA`, `black` or `white`.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for anything else.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "black" => return Ok(BLACK),
        "white" => return Ok(WHITE),
        _ => {}
    }

    let invalid = || Error::InvalidColor(value.to_string());
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

/// Formats a color as `#rrggbb` for SVG output.
fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Renders `text` as a raster QR code.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the text does not fit in any QR version, or
/// [`Error::ImageTooLarge`] if the image edge would exceed [`MAX_IMAGE_SIDE`].
pub fn render_image(text: &str, options: &RenderOptions) -> Result<RgbaImage> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), options.ec_level.into())?;
    let modules = code.to_colors();
    let count = code.width();
    let box_size = options.box_size.max(1);
    let border = options.border;
    let side = image_side(count, border, box_size)?;

    let mut img = RgbaImage::from_pixel(side, side, options.background);
    let is_dark = |x: usize, y: usize| modules[y * count + x] == Color::Dark;

    for y in 0..count {
        for x in 0..count {
            if !is_dark(x, y) {
                continue;
            }

            // Corners: top-left, top-right, bottom-right, bottom-left
            let rounded = if options.rounded {
                let top = y > 0 && is_dark(x, y - 1);
                let right = x + 1 < count && is_dark(x + 1, y);
                let bottom = y + 1 < count && is_dark(x, y + 1);
                let left = x > 0 && is_dark(x - 1, y);
                [!top && !left, !top && !right, !bottom && !right, !bottom && !left]
            } else {
                [false; 4]
            };

            let px = (to_u32(x) + border) * box_size;
            let py = (to_u32(y) + border) * box_size;
            for dy in 0..box_size {
                for dx in 0..box_size {
                    if module_covers(dx, dy, box_size, rounded) {
                        img.put_pixel(px + dx, py + dy, options.foreground);
                    }
                }
            }
        }
    }

    Ok(img)
}

/// Renders `text` as an SVG document.
///
/// The `qrcode` SVG renderer uses a fixed four-module quiet zone, emitted
/// whenever `border` is non-zero. Modules are always square.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the text does not fit in any QR version, or
/// [`Error::ImageTooLarge`] if the image edge would exceed [`MAX_IMAGE_SIDE`].
pub fn render_svg(text: &str, options: &RenderOptions) -> Result<String> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), options.ec_level.into())?;
    let dark = to_hex(options.foreground);
    let light = to_hex(options.background);
    let box_size = options.box_size.max(1);
    let quiet_zone = if options.border > 0 { 4 } else { 0 };
    image_side(code.width(), quiet_zone, box_size)?;

    Ok(code
        .render::<svg::Color<'_>>()
        .quiet_zone(options.border > 0)
        .module_dimensions(box_size, box_size)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build())
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Edge length in pixels of `count` modules plus `border` modules each side.
fn image_side(count: usize, border: u32, box_size: u32) -> Result<u32> {
    let modules = u64::try_from(count)
        .unwrap_or(u64::MAX)
        .saturating_add(u64::from(border) * 2);
    let side = modules.saturating_mul(u64::from(box_size));
    match u32::try_from(side) {
        Ok(side) if side <= MAX_IMAGE_SIDE => Ok(side),
        _ => Err(Error::ImageTooLarge {
            side,
            max: MAX_IMAGE_SIDE,
        }),
    }
}

/// Whether pixel `(dx, dy)` of a module is painted.
///
/// A rounded corner clips pixels whose centers fall outside a quarter circle
/// of radius `box_size / 2`.
fn module_covers(dx: u32, dy: u32, box_size: u32, rounded: [bool; 4]) -> bool {
    let r = f64::from(box_size) / 2.0;
    let fx = f64::from(dx) + 0.5;
    let fy = f64::from(dy) + 0.5;
    let far = f64::from(box_size) - r;

    let (corner, cx, cy) = match (fx < r, fy < r) {
        (true, true) => (0, r, r),
        (false, true) => (1, far, r),
        (false, false) => (2, far, far),
        (true, false) => (3, r, far),
    };

    if !rounded[corner] {
        return true;
    }
    let (ddx, ddy) = (fx - cx, fy - cy);
    ddx * ddx + ddy * ddy <= r * r
}
