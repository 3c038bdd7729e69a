use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;
use plotters::style::RGBColor;

use crate::data::model::SpectralClass;

/// Opacity of scatter markers.
pub const MARKER_ALPHA: f64 = 0.7;

/// Plot-area background.
pub const PLOT_BACKGROUND: &str = "#f9f9f9";

const FALLBACK: Srgb<u8> = Srgb::new(128, 128, 128);

// ---------------------------------------------------------------------------
// Spectral class → colour
// ---------------------------------------------------------------------------

/// Conventional stellar colour for each class, hot blue to cool red.
pub fn class_hex(class: SpectralClass) -> &'static str {
    match class {
        SpectralClass::O => "#9bb0ff",
        SpectralClass::B => "#aabfff",
        SpectralClass::A => "#cad7ff",
        SpectralClass::F => "#f8f7ff",
        SpectralClass::G => "#fff4cc",
        SpectralClass::K => "#ffd2a1",
        SpectralClass::M => "#ff9b7a",
    }
}

/// Parse a `#rrggbb` string, falling back to grey on malformed input.
pub fn parse_hex(hex: &str) -> Srgb<u8> {
    Srgb::<u8>::from_str(hex).unwrap_or(FALLBACK)
}

pub fn class_color(class: SpectralClass) -> Srgb<u8> {
    parse_hex(class_hex(class))
}

// -- Backend conversions --

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Same colour with `alpha` in 0..=1 applied, for egui.
pub fn to_color32_alpha(c: Srgb<u8>, alpha: f64) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.red, c.green, c.blue, a)
}

pub fn to_rgb_color(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}
