//! Color gradient generation.
//!
//! Produces ordered sequences of hex colors linearly interpolated in RGB
//! space, used for elevation coloring and density rendering. Colors are plain
//! `#rrggbb` strings at the boundary because that is what the map widget
//! consumes.

use crate::AtlasError;

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a 6-hex-digit RGB triple, with or without a leading `#`.
    ///
    /// Anything else (wrong length, shorthand form, non-hex digits) is
    /// rejected with [`AtlasError::InvalidColor`].
    pub fn parse(value: &str) -> Result<Self, AtlasError> {
        let invalid = || AtlasError::InvalidColor { value: value.to_string() };

        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?;

        Ok(Self { r, g, b })
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Build an ordered gradient of `steps` colors between two hex endpoints.
///
/// Step `i` interpolates each channel as
/// `round(start + i/(steps-1) * (end - start))`, rounding half away from
/// zero, so the midpoint of `#000000` to `#ffffff` is `#808080`. Two steps
/// yield exactly the endpoints. Fewer than two steps, or an endpoint that is
/// not a valid 6-hex-digit triple, is rejected.
///
/// # Example
///
/// ```rust
/// use trail_atlas::color_gradient;
///
/// let colors = color_gradient("#2a9d8f", "#e76f51", 10).unwrap();
/// assert_eq!(colors.len(), 10);
/// assert_eq!(colors[0], "#2a9d8f");
/// assert_eq!(colors[9], "#e76f51");
/// ```
pub fn color_gradient(start: &str, end: &str, steps: usize) -> Result<Vec<String>, AtlasError> {
    if steps < 2 {
        return Err(AtlasError::InvalidStepCount { steps });
    }

    let start = Rgb::parse(start)?;
    let end = Rgb::parse(end)?;

    let channel = |a: u8, b: u8, ratio: f64| -> u8 {
        (a as f64 + ratio * (b as f64 - a as f64)).round().clamp(0.0, 255.0) as u8
    };

    Ok((0..steps)
        .map(|i| {
            let ratio = i as f64 / (steps - 1) as f64;
            Rgb {
                r: channel(start.r, end.r, ratio),
                g: channel(start.g, end.g, ratio),
                b: channel(start.b, end.b, ratio),
            }
            .to_hex()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(Rgb::parse("#2a9d8f").unwrap(), Rgb { r: 0x2a, g: 0x9d, b: 0x8f });
        assert_eq!(Rgb::parse("2a9d8f").unwrap(), Rgb { r: 0x2a, g: 0x9d, b: 0x8f });
        assert_eq!(Rgb::parse("#FFFFFF").unwrap(), Rgb { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#fff", "#ggg000", "#12345", "#1234567", "not a color"] {
            assert!(
                matches!(Rgb::parse(bad), Err(AtlasError::InvalidColor { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_two_steps_are_the_endpoints() {
        let colors = color_gradient("#000000", "#ffffff", 2).unwrap();
        assert_eq!(colors, vec!["#000000", "#ffffff"]);
    }

    #[test]
    fn test_midpoint_rounds_half_up() {
        // 127.5 rounds away from zero to 128 = 0x80
        let colors = color_gradient("#000000", "#ffffff", 3).unwrap();
        assert_eq!(colors[1], "#808080");
    }

    #[test]
    fn test_descending_gradient() {
        let colors = color_gradient("#ffffff", "#000000", 3).unwrap();
        assert_eq!(colors, vec!["#ffffff", "#808080", "#000000"]);
    }

    #[test]
    fn test_all_outputs_are_valid_hex() {
        let colors = color_gradient("#2a9d8f", "#e76f51", 10).unwrap();
        assert_eq!(colors.len(), 10);
        for color in &colors {
            assert!(Rgb::parse(color).is_ok(), "bad output {color:?}");
        }
    }

    #[test]
    fn test_identical_endpoints() {
        let colors = color_gradient("#123456", "#123456", 4).unwrap();
        assert!(colors.iter().all(|c| c == "#123456"));
    }

    #[test]
    fn test_step_count_rejected() {
        assert!(matches!(
            color_gradient("#000000", "#ffffff", 1),
            Err(AtlasError::InvalidStepCount { steps: 1 })
        ));
        assert!(matches!(
            color_gradient("#000000", "#ffffff", 0),
            Err(AtlasError::InvalidStepCount { steps: 0 })
        ));
    }
}
