//! Color value type shared by the parsers, the variable store and the merger
//!
//! Resolved colors travel through the crate as 6-digit lowercase hex strings
//! without a leading `#` (e.g. `"ff8800"`). `Color` is the typed form used
//! while parsing and converting.

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color from RGB values
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from "rgb", "rgba", "rrggbb" or "rrggbbaa" hex digits, with or without a leading `#`.
    ///
    /// Alpha digits are accepted but discarded.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Invalid color format: {}", s));
        }
        match s.len() {
            3 | 4 => {
                let digit = |i: usize| -> Result<u8, String> {
                    let v = u8::from_str_radix(&s[i..i + 1], 16).map_err(|e| e.to_string())?;
                    Ok(v * 17)
                };
                Ok(Color::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 | 8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Convert floating point channels in `[0, 1]` as reported by a language server.
    ///
    /// Each channel is premultiplied by alpha and truncated; the alpha value
    /// itself does not survive the conversion.
    pub fn from_protocol_channels(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let channel = |c: f32| (c.clamp(0.0, 1.0) * alpha * 255.0) as u8;
        Color::rgb(channel(red), channel(green), channel(blue))
    }

    /// Lowercase `rrggbb` form without a leading `#`
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Strip any leading `#` from a stored color value
pub fn bare_hex(value: &str) -> &str {
    value.trim_start_matches('#')
}
