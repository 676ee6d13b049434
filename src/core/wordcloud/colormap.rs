//! Named colour schemes for the word cloud and the common-words table
//!
//! Each scheme is a short list of evenly spaced anchor colours taken from the
//! matplotlib palettes of the same name; samples interpolate between anchors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::hex(0xffffff);
    pub const BLACK: Rgb = Rgb::hex(0x000000);

    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Parse `#rgb` or `#rrggbb`
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let value = u32::from_str_radix(digits, 16).ok()?;
                let expand = |nibble: u32| (nibble * 17) as u8;
                Some(Self {
                    r: expand((value >> 8) & 0xf),
                    g: expand((value >> 4) & 0xf),
                    b: expand(value & 0xf),
                })
            }
            6 => u32::from_str_radix(digits, 16).ok().map(Self::hex),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance in [0, 1], good enough to pick a readable text colour
    pub fn luminance(&self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }

    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Twilight,
    Hsv,
    Autumn,
    Winter,
}

const VIRIDIS: &[Rgb] = &[Rgb::hex(0x440154), Rgb::hex(0x3b528b), Rgb::hex(0x21918c), Rgb::hex(0x5ec962), Rgb::hex(0xfde725)];
const PLASMA: &[Rgb] = &[Rgb::hex(0x0d0887), Rgb::hex(0x7e03a8), Rgb::hex(0xcc4778), Rgb::hex(0xf89540), Rgb::hex(0xf0f921)];
const INFERNO: &[Rgb] = &[Rgb::hex(0x000004), Rgb::hex(0x57106e), Rgb::hex(0xbc3754), Rgb::hex(0xf98e09), Rgb::hex(0xfcffa4)];
const MAGMA: &[Rgb] = &[Rgb::hex(0x000004), Rgb::hex(0x51127c), Rgb::hex(0xb73779), Rgb::hex(0xfc8961), Rgb::hex(0xfcfdbf)];
const CIVIDIS: &[Rgb] = &[Rgb::hex(0x00224e), Rgb::hex(0x3d4d6e), Rgb::hex(0x7c7b78), Rgb::hex(0xbcaf6f), Rgb::hex(0xfee838)];
const TWILIGHT: &[Rgb] = &[Rgb::hex(0xe2d9e2), Rgb::hex(0x7a9bc6), Rgb::hex(0x5e43a5), Rgb::hex(0x2f1436), Rgb::hex(0x8e3b5a), Rgb::hex(0xc9846e), Rgb::hex(0xe2d9e2)];
const HSV: &[Rgb] = &[Rgb::hex(0xff0000), Rgb::hex(0xffff00), Rgb::hex(0x00ff00), Rgb::hex(0x00ffff), Rgb::hex(0x0000ff), Rgb::hex(0xff00ff), Rgb::hex(0xff0000)];
const AUTUMN: &[Rgb] = &[Rgb::hex(0xff0000), Rgb::hex(0xffff00)];
const WINTER: &[Rgb] = &[Rgb::hex(0x0000ff), Rgb::hex(0x00ff80)];

impl Colormap {
    /// Selector order
    pub const ALL: [Colormap; 9] = [
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Cividis,
        Colormap::Twilight,
        Colormap::Hsv,
        Colormap::Autumn,
        Colormap::Winter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Cividis => "cividis",
            Colormap::Twilight => "twilight",
            Colormap::Hsv => "hsv",
            Colormap::Autumn => "autumn",
            Colormap::Winter => "winter",
        }
    }

    fn anchors(&self) -> &'static [Rgb] {
        match self {
            Colormap::Viridis => VIRIDIS,
            Colormap::Plasma => PLASMA,
            Colormap::Inferno => INFERNO,
            Colormap::Magma => MAGMA,
            Colormap::Cividis => CIVIDIS,
            Colormap::Twilight => TWILIGHT,
            Colormap::Hsv => HSV,
            Colormap::Autumn => AUTUMN,
            Colormap::Winter => WINTER,
        }
    }

    /// Colour at position `t`, clamped to [0, 1]
    pub fn sample(&self, t: f64) -> Rgb {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (anchors.len() - 1) as f64;
        let index = (scaled.floor() as usize).min(anchors.len() - 2);
        anchors[index].lerp(&anchors[index + 1], scaled - index as f64)
    }

    /// Colour for `value` on a gradient spanning `min..=max`; a flat range
    /// maps to the top of the scheme
    pub fn sample_range(&self, value: usize, min: usize, max: usize) -> Rgb {
        if max > min {
            self.sample(value.saturating_sub(min) as f64 / (max - min) as f64)
        } else {
            self.sample(1.0)
        }
    }

    pub fn next(&self) -> Colormap {
        let position = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Colormap {
        let position = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(position + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| format!("unknown color scheme: {}", s))
    }
}
