extern crate std;

use crate::structs::Rgb;

pub const DEFAULT_COLOR: Rgb = Rgb::from_u32(0xC2C2C2);

#[derive(Clone, Debug, Deserialize)]
pub struct LineInfo {
    pub abbreviation: String,
    pub color: Rgb,
}

/// Maps the raw headsign a feed reports to the label and color drawn on the
/// matrix. Built once at startup and only read afterwards.
#[derive(Debug)]
pub struct LineTable {
    lines: std::collections::BTreeMap<String, LineInfo>,
    default_color: Rgb,
}

impl LineTable {
    pub fn new(lines: std::collections::BTreeMap<String, LineInfo>, default_color: Rgb) -> LineTable {
        return LineTable {
            lines: lines,
            default_color: default_color,
        };
    }

    pub fn resolve(&self, raw_name: &str) -> (String, Rgb) {
        match self.lines.get(raw_name) {
            Some(info) => return (info.abbreviation.clone(), info.color),
            None => return (raw_name.to_string(), self.default_color),
        }
    }
}

pub fn path_lines() -> std::collections::BTreeMap<String, LineInfo> {
    let mut lines = std::collections::BTreeMap::new();
    lines.insert("World Trade Center".to_string(), LineInfo {
        abbreviation: "WTC".to_string(),
        color: Rgb::from_u32(0xD93A30),
    });
    lines.insert("33rd Street".to_string(), LineInfo {
        abbreviation: "33rd".to_string(),
        color: Rgb::from_u32(0xFF9900),
    });
    return lines;
}

impl Default for LineTable {
    fn default() -> LineTable {
        return LineTable::new(path_lines(), DEFAULT_COLOR);
    }
}
