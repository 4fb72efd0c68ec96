extern crate hex;
extern crate serde_json;
extern crate std;

pub const UNKNOWN: &str = "-";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_u32(value: u32) -> Rgb {
        return Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        };
    }
}

impl std::str::FromStr for Rgb {
    type Err = String;

    // Accepts "D93A30", "#D93A30" and "0xD93A30".
    fn from_str(s: &str) -> Result<Rgb, String> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#')
            .or_else(|| digits.strip_prefix("0x"))
            .unwrap_or(digits);
        let bytes = hex::decode(digits)
            .map_err(|err| format!("Invalid color '{}': {}", s, err))?;
        if bytes.len() != 3 {
            return Err(format!("Invalid color '{}': expected 3 bytes, got {}", s, bytes.len()));
        }
        return Ok(Rgb { r: bytes[0], g: bytes[1], b: bytes[2] });
    }
}

impl std::convert::TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Rgb, String> {
        return s.parse();
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        return write!(f, "#{}", hex::encode_upper([self.r, self.g, self.b]));
    }
}

/// One upcoming train, normalized from whichever feed produced it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArrivalRecord {
    pub line: String,
    pub color: Rgb,
    /// Either a countdown like "5m" or "-".
    pub projected_arrival: String,
    /// Upstream timestamp, passed through untouched.
    pub last_updated: String,
}

/// The string stored under `key`, if `entry` is an object and it is a string.
pub fn str_field<'v>(entry: &'v serde_json::Value, key: &str) -> Option<&'v str> {
    return entry.get(key).and_then(|value| value.as_str());
}

pub fn or_unknown(value: Option<String>) -> String {
    return value.unwrap_or_else(|| UNKNOWN.to_string());
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn parse_colors() {
        assert_eq!(Rgb::from_u32(0xD93A30), "D93A30".parse::<Rgb>().unwrap());
        assert_eq!(Rgb::from_u32(0xFF9900), "#ff9900".parse::<Rgb>().unwrap());
        assert_eq!(Rgb::from_u32(0xC2C2C2), "0xC2C2C2".parse::<Rgb>().unwrap());
        assert!("C2C2".parse::<Rgb>().is_err());
        assert!("zzzzzz".parse::<Rgb>().is_err());
    }

    #[test]
    fn u32_conversion() {
        let color = Rgb::from_u32(0xD93A30);
        assert_eq!(Rgb { r: 0xD9, g: 0x3A, b: 0x30 }, color);
        assert_eq!("#D93A30", color.to_string());
    }
}
