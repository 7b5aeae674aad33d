use crate::error::{PixmergeError, PixmergeResult};

/// Straight-alpha RGBA8 color value.
pub type Rgba8 = [u8; 4];

/// Fallback background when the supplied color string is malformed.
pub const DEFAULT_BACKGROUND: Rgba8 = [255, 255, 255, 255];

/// Parses a color string into RGBA8.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (case-insensitive), and a
/// small set of named colors. Color pickers emit `#rrggbb`; the rest covers
/// hand-typed input.
pub fn parse_color(s: &str) -> PixmergeResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex)
            .ok_or_else(|| PixmergeError::invalid_config(format!("malformed hex color '{s}'")));
    }

    match s.to_ascii_lowercase().as_str() {
        "white" => Ok([255, 255, 255, 255]),
        "black" => Ok([0, 0, 0, 255]),
        "red" => Ok([255, 0, 0, 255]),
        "green" => Ok([0, 128, 0, 255]),
        "blue" => Ok([0, 0, 255, 255]),
        "gray" | "grey" => Ok([128, 128, 128, 255]),
        "transparent" => Ok([0, 0, 0, 0]),
        other => Err(PixmergeError::invalid_config(format!(
            "unknown color '{other}'"
        ))),
    }
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    let nibble = |c: u8| -> Option<u8> { (c as char).to_digit(16).map(|d| d as u8) };
    let bytes = hex.as_bytes();

    match bytes.len() {
        // #rgb / #rgba: each nibble doubled
        3 | 4 => {
            let mut out = [255u8; 4];
            for (i, &c) in bytes.iter().enumerate() {
                let n = nibble(c)?;
                out[i] = n << 4 | n;
            }
            Some(out)
        }
        // #rrggbb / #rrggbbaa
        6 | 8 => {
            let mut out = [255u8; 4];
            for (i, pair) in bytes.chunks_exact(2).enumerate() {
                out[i] = nibble(pair[0])? << 4 | nibble(pair[1])?;
            }
            Some(out)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rrggbb() {
        assert_eq!(parse_color("#ff8000").unwrap(), [255, 128, 0, 255]);
        assert_eq!(parse_color("#FFFFFF").unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn parses_short_and_alpha_forms() {
        assert_eq!(parse_color("#f00").unwrap(), [255, 0, 0, 255]);
        assert_eq!(parse_color("#f008").unwrap(), [255, 0, 0, 136]);
        assert_eq!(parse_color("#11223344").unwrap(), [17, 34, 51, 68]);
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(parse_color("Black").unwrap(), [0, 0, 0, 255]);
        assert_eq!(parse_color(" white ").unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gggggg").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
        assert!(parse_color("").is_err());
    }
}
