extern crate anyhow;
extern crate chrono;
extern crate chrono_tz;
extern crate serde;
extern crate serde_json;
extern crate std;

use anyhow::Context;
use crate::clock;
use crate::lines;
use crate::razza;
use crate::result;
use crate::ridepath;
use crate::structs::Rgb;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RidePathConfig {
    pub url: String,
    pub station: String,
    pub direction: String,
}

impl Default for RidePathConfig {
    fn default() -> RidePathConfig {
        return RidePathConfig {
            url: ridepath::RIDEPATH_URL.to_string(),
            station: "GRV".to_string(),
            direction: "ToNY".to_string(),
        };
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RazzaConfig {
    pub base_url: String,
    pub station: String,
    pub direction: String,
}

impl Default for RazzaConfig {
    fn default() -> RazzaConfig {
        return RazzaConfig {
            base_url: razza::RAZZA_BASE_URL.to_string(),
            station: "grove_street".to_string(),
            direction: "TO_NY".to_string(),
        };
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub base_url: String,
    pub username: String,
    pub key: String,
    pub timezone: String,
}

impl Default for ClockConfig {
    fn default() -> ClockConfig {
        return ClockConfig {
            base_url: clock::ADAFRUIT_IO_BASE_URL.to_string(),
            username: "".to_string(),
            key: "".to_string(),
            // razza timestamps are UTC, so the trusted clock has to be too.
            timezone: "Etc/UTC".to_string(),
        };
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub normal_interval_secs: u64,
    pub degraded_interval_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> PollConfig {
        return PollConfig {
            normal_interval_secs: 60,
            degraded_interval_secs: 5,
            http_timeout_secs: 10,
        };
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub font_path: String,
    pub text_height: f32,
    pub placeholder: Vec<String>,
    pub placeholder_color: Rgb,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        return DisplayConfig {
            width: 64,
            height: 32,
            // sudo apt-get install fonts-roboto
            font_path: "/usr/share/fonts/truetype/roboto/hinted/RobotoCondensed-Regular.ttf".to_string(),
            text_height: 13.0,
            placeholder: vec!["Waiting on".to_string(), "PATH api".to_string()],
            placeholder_color: Rgb::from_u32(0xC7C7C7),
        };
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ridepath: RidePathConfig,
    pub razza: RazzaConfig,
    pub clock: ClockConfig,
    pub lines: std::collections::BTreeMap<String, lines::LineInfo>,
    pub default_color: Rgb,
    pub poll: PollConfig,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Config {
        return Config {
            ridepath: RidePathConfig::default(),
            razza: RazzaConfig::default(),
            clock: ClockConfig::default(),
            lines: lines::path_lines(),
            default_color: lines::DEFAULT_COLOR,
            poll: PollConfig::default(),
            display: DisplayConfig::default(),
        };
    }
}

impl Config {
    pub fn line_table(&self) -> lines::LineTable {
        return lines::LineTable::new(self.lines.clone(), self.default_color);
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        return std::time::Duration::from_secs(self.poll.http_timeout_secs);
    }

    /// Credentials and timezone may come from the environment instead of the
    /// file; the environment wins.
    fn apply_env(&mut self, env: &dyn Fn(&str) -> Option<String>) {
        if let Some(username) = env("ADAFRUIT_IO_USERNAME") {
            self.clock.username = username;
        }
        if let Some(key) = env("ADAFRUIT_IO_KEY") {
            self.clock.key = key;
        }
        if let Some(timezone) = env("TIMEZONE") {
            self.clock.timezone = timezone;
        }
    }

    fn validate(&self) -> result::PathDashResult<()> {
        let tz = self.clock.timezone.parse::<chrono_tz::Tz>()
            .map_err(|err| result::make_error(&format!("Invalid timezone '{}': {}", self.clock.timezone, err)))?;
        if !is_utc(&tz) {
            warn!("Clock timezone {} is not UTC; razza countdowns will be off by the UTC offset", self.clock.timezone);
        }
        if self.poll.normal_interval_secs == 0 || self.poll.degraded_interval_secs == 0 {
            return Err(result::make_error("Poll intervals must be at least one second"));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(result::make_error("Display must be at least 1x1"));
        }
        if self.clock.username.is_empty() || self.clock.key.is_empty() {
            warn!("No Adafruit IO credentials; the razza fallback feed will not work");
        }
        return Ok(());
    }
}

/// True when `tz` sits at UTC+0 both winter and summer.
fn is_utc(tz: &chrono_tz::Tz) -> bool {
    use chrono::{Offset, TimeZone};
    return [1, 7].iter().all(|month| {
        match chrono::NaiveDate::from_ymd_opt(2024, *month, 1).and_then(|d| d.and_hms_opt(12, 0, 0)) {
            Some(noon) => tz.offset_from_utc_datetime(&noon).fix().local_minus_utc() == 0,
            None => false,
        }
    });
}

pub fn config_from_str(raw: &str, env: &dyn Fn(&str) -> Option<String>) -> result::PathDashResult<Config> {
    let mut config: Config = serde_json::from_str(raw)
        .with_context(|| format!("while parsing config"))?;
    config.apply_env(env);
    config.validate()?;
    return Ok(config);
}

pub fn load_config<P: AsRef<std::path::Path>>(path: Option<P>) -> result::PathDashResult<Config> {
    let env = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    match path {
        Some(path) => {
            let debug_path = path.as_ref().to_string_lossy().to_string();
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Opening config from '{}'", debug_path))?;
            return config_from_str(&raw, &env);
        },
        None => {
            return config_from_str("{}", &env);
        },
    }
}
