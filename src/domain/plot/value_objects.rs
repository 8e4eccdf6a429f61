use derive_more::Display;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - space reserved around the plotting area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paddings {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Paddings {
    fn default() -> Self {
        Self { top: 30.0, bottom: 60.0, left: 90.0, right: 5.0 }
    }
}

impl Paddings {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

/// Value Object - axis captions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Legends {
    pub x: Option<String>,
    pub y: Option<String>,
}

impl Default for Legends {
    fn default() -> Self {
        Self { x: Some("Sequence".to_string()), y: Some("# of mutations".to_string()) }
    }
}

/// Value Object - how the y domain is chosen
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum YScaleMode {
    /// Domain derived from the mutation magnitudes
    #[default]
    #[display(fmt = "auto")]
    #[strum(serialize = "auto")]
    Auto,
    /// Domain taken from `y_scale_min` / `y_scale_max`
    #[display(fmt = "manual")]
    #[strum(serialize = "manual")]
    Manual,
}

/// Value Object - 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

static NAMED_COLORS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("black", 0x000000),
        ("white", 0xffffff),
        ("red", 0xff0000),
        ("green", 0x008000),
        ("lime", 0x00ff00),
        ("blue", 0x0000ff),
        ("navy", 0x000080),
        ("yellow", 0xffff00),
        ("orange", 0xffa500),
        ("gold", 0xffd700),
        ("grey", 0x808080),
        ("gray", 0x808080),
        ("lightgrey", 0xd3d3d3),
        ("lightgray", 0xd3d3d3),
        ("darkgrey", 0xa9a9a9),
        ("darkgray", 0xa9a9a9),
        ("silver", 0xc0c0c0),
        ("purple", 0x800080),
        ("violet", 0xee82ee),
        ("magenta", 0xff00ff),
        ("fuchsia", 0xff00ff),
        ("pink", 0xffc0cb),
        ("brown", 0xa52a2a),
        ("maroon", 0x800000),
        ("olive", 0x808000),
        ("teal", 0x008080),
        ("cyan", 0x00ffff),
        ("aqua", 0x00ffff),
        ("steelblue", 0x4682b4),
        ("darkred", 0x8b0000),
        ("darkgreen", 0x006400),
        ("darkblue", 0x00008b),
        ("darkorange", 0xff8c00),
    ])
});

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn from_hex(hex: u32) -> Self {
        Self { r: ((hex >> 16) & 0xFF) as u8, g: ((hex >> 8) & 0xFF) as u8, b: (hex & 0xFF) as u8 }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or a CSS color name.
    pub fn parse(color: &str) -> Option<Self> {
        let color = color.trim().to_ascii_lowercase();
        if let Some(hex) = color.strip_prefix('#') {
            return match hex.len() {
                3 => {
                    let value = u32::from_str_radix(hex, 16).ok()?;
                    let expand = |c: u32| ((c << 4) | c) as u8;
                    Some(Self {
                        r: expand((value >> 8) & 0xF),
                        g: expand((value >> 4) & 0xF),
                        b: expand(value & 0xF),
                    })
                }
                6 => u32::from_str_radix(hex, 16).ok().map(Self::from_hex),
                _ => None,
            };
        }
        if let Some(body) = color.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            let channels: Vec<u8> = body
                .split(',')
                .map(|c| c.trim().parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8))
                .collect::<Option<_>>()?;
            return match channels[..] {
                [r, g, b] => Some(Self { r, g, b }),
                _ => None,
            };
        }
        NAMED_COLORS.get(color.as_str()).copied().map(Self::from_hex)
    }

    /// YIQ brightness below 128 counts as dark.
    pub fn is_dark(&self) -> bool {
        let yiq = (self.r as f64 * 299.0 + self.g as f64 * 587.0 + self.b as f64 * 114.0) / 1000.0;
        yiq < 128.0
    }
}

/// Text color giving contrast on a head of the given fill. Missing and
/// unparseable fills are treated as black.
pub fn label_color_for(fill: Option<&str>) -> &'static str {
    let rgb = fill.and_then(Rgb::parse).unwrap_or(Rgb::BLACK);
    if rgb.is_dark() { "white" } else { "black" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_hex_rgb_and_names() {
        assert_eq!(Rgb::parse("#fff"), Some(Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(Rgb::parse("#FF8000"), Some(Rgb { r: 255, g: 128, b: 0 }));
        assert_eq!(Rgb::parse("rgb(10, 20, 30)"), Some(Rgb { r: 10, g: 20, b: 30 }));
        assert_eq!(Rgb::parse("Orange"), Some(Rgb { r: 255, g: 165, b: 0 }));
        assert_eq!(Rgb::parse("not-a-color"), None);
        assert_eq!(Rgb::parse("#12345"), None);
    }

    #[test]
    fn label_contrasts_with_head() {
        assert_eq!(label_color_for(Some("red")), "white");
        assert_eq!(label_color_for(Some("yellow")), "black");
        assert_eq!(label_color_for(Some("grey")), "black");
        assert_eq!(label_color_for(None), "white");
    }

    #[test]
    fn y_scale_mode_from_config_string() {
        assert_eq!(YScaleMode::from_str("manual").unwrap(), YScaleMode::Manual);
        assert_eq!(YScaleMode::default().as_ref(), "auto");
    }
}
