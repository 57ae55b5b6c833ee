//! Hex colour parsing
//!
//! Themes are authored as `#rrggbb` strings and resolved to linear RGBA
//! floats once, when a palette is built.

use thiserror::Error;

/// RGBA colour, components in 0..=1
pub type Rgba = [f32; 4];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("colour `{0}` must have 6 or 8 hex digits")]
    Length(String),
    #[error("colour `{0}` contains a non-hex digit")]
    Digit(String),
}

/// Parse `#rrggbb`, `rrggbb`, `#rrggbbaa` or `rrggbbaa`
pub fn parse_hex(hex: &str) -> Result<Rgba, ColorError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorError::Length(hex.to_string()));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::Digit(hex.to_string()));
    }

    let channel = |i: usize| -> Result<f32, ColorError> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ColorError::Digit(hex.to_string()))
    };

    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Ok([channel(0)?, channel(2)?, channel(4)?, alpha])
}

/// Same colour with a different alpha
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Linear blend from `a` to `b`
pub fn mix(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Convert to a wgpu clear colour
pub fn to_wgpu(color: Rgba) -> wgpu::Color {
    wgpu::Color {
        r: color[0] as f64,
        g: color[1] as f64,
        b: color[2] as f64,
        a: color[3] as f64,
    }
}
