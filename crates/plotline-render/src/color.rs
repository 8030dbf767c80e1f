//! Linear RGBA colors and CSS-style color string resolution.

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`, so it can be
/// used directly in GPU vertex buffers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    /// Neutral gray used when a color string cannot be resolved.
    pub const FALLBACK: Color = Color::rgb(0.5, 0.5, 0.5);

    /// Create a color from RGB components with full opacity (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Return this color with its alpha multiplied by `factor`.
    ///
    /// Used by visibility fades, which scale a series' opacity without
    /// touching its hue.
    pub fn with_alpha_factor(self, factor: f32) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Resolve a CSS-style color string.
    ///
    /// Pure white/black hex are special-cased, then `#rgb`, `#rgba`,
    /// `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` functional notation, and a
    /// small named table are tried in order. Unresolvable strings yield
    /// [`Color::FALLBACK`].
    pub fn parse_css(input: &str) -> Self {
        let s = input.trim().to_ascii_lowercase();
        match s.as_str() {
            "#fff" | "#ffffff" => return Color::WHITE,
            "#000" | "#000000" => return Color::BLACK,
            _ => {}
        }

        let parsed = if let Some(hex) = s.strip_prefix('#') {
            parse_hex(hex)
        } else if s.starts_with("rgb(") || s.starts_with("rgba(") {
            parse_functional(&s)
        } else {
            parse_named(&s)
        };

        parsed.unwrap_or_else(|| {
            tracing::debug!(color = %input, "unresolvable color string, using fallback gray");
            Color::FALLBACK
        })
    }

    /// Convert to the equivalent `wgpu::Color` (f64 components).
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    /// Convert to an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(arr: [f32; 4]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: arr[3],
        }
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expand = |c: u8| (c << 4) | c;
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);

    match hex.len() {
        3 | 4 => {
            let mut v = [0u8; 4];
            for (i, c) in hex.chars().enumerate() {
                v[i] = expand(nibble(c)?);
            }
            let a = if hex.len() == 4 { v[3] } else { 255 };
            Some(Color::from_rgba_u8(v[0], v[1], v[2], a))
        }
        6 | 8 => {
            let mut v = [0u8; 4];
            for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
                let hi = nibble(pair[0] as char)?;
                let lo = nibble(pair[1] as char)?;
                v[i] = (hi << 4) | lo;
            }
            let a = if hex.len() == 8 { v[3] } else { 255 };
            Some(Color::from_rgba_u8(v[0], v[1], v[2], a))
        }
        _ => None,
    }
}

fn parse_functional(s: &str) -> Option<Color> {
    let inner = s.split_once('(')?.1.strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |p: &str| -> Option<f32> {
        if let Some(pct) = p.strip_suffix('%') {
            Some((pct.trim().parse::<f32>().ok()? / 100.0).clamp(0.0, 1.0))
        } else {
            Some((p.parse::<f32>().ok()? / 255.0).clamp(0.0, 1.0))
        }
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(p) => p.parse::<f32>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Color::rgba(r, g, b, a))
}

fn parse_named(s: &str) -> Option<Color> {
    let c = match s {
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "transparent" => Color::TRANSPARENT,
        "red" => Color::from_hex(0xFF0000),
        "green" => Color::from_hex(0x008000),
        "lime" => Color::from_hex(0x00FF00),
        "blue" => Color::from_hex(0x0000FF),
        "yellow" => Color::from_hex(0xFFFF00),
        "cyan" | "aqua" => Color::from_hex(0x00FFFF),
        "magenta" | "fuchsia" => Color::from_hex(0xFF00FF),
        "orange" => Color::from_hex(0xFFA500),
        "purple" => Color::from_hex(0x800080),
        "gray" | "grey" => Color::from_hex(0x808080),
        "silver" => Color::from_hex(0xC0C0C0),
        "teal" => Color::from_hex(0x008080),
        "navy" => Color::from_hex(0x000080),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_black_fast_path() {
        assert_eq!(Color::parse_css("#fff"), Color::WHITE);
        assert_eq!(Color::parse_css("#FFFFFF"), Color::WHITE);
        assert_eq!(Color::parse_css("#000"), Color::BLACK);
    }

    #[test]
    fn hex_forms() {
        assert_eq!(Color::parse_css("#ff0000"), Color::from_rgba_u8(255, 0, 0, 255));
        assert_eq!(Color::parse_css("#f00"), Color::from_rgba_u8(255, 0, 0, 255));
        let half = Color::parse_css("#ff000080");
        assert!((half.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn functional_notation() {
        let c = Color::parse_css("rgb(255, 128, 0)");
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);

        let c = Color::parse_css("rgba(0, 0, 255, 0.25)");
        assert_eq!(c.b, 1.0);
        assert!((c.a - 0.25).abs() < 1e-6);
    }

    #[test]
    fn named_and_fallback() {
        assert_eq!(Color::parse_css("orange"), Color::from_hex(0xFFA500));
        assert_eq!(Color::parse_css("not-a-color"), Color::FALLBACK);
        assert_eq!(Color::parse_css("#zz0011"), Color::FALLBACK);
    }

    #[test]
    fn alpha_factor_clamps() {
        let c = Color::rgba(0.2, 0.4, 0.6, 0.8);
        assert!((c.with_alpha_factor(0.5).a - 0.4).abs() < 1e-6);
        assert_eq!(c.with_alpha_factor(2.0).a, 0.8);
        assert_eq!(c.with_alpha_factor(-1.0).a, 0.0);
    }
}
