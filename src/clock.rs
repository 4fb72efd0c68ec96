extern crate chrono;
extern crate std;

use crate::result;
use crate::webclient;

pub const ADAFRUIT_IO_BASE_URL: &str = "https://io.adafruit.com/api/v2";

// strftime pattern "%Y-%m-%d %H:%M:%S", pre-escaped for the query string.
const TIME_FORMAT_QUERY: &str = "%25Y-%25m-%25d+%25H%3A%25M%3A%25S";

pub trait TrustedClock {
    fn now(&self) -> result::FetchResult<chrono::NaiveDateTime>;
}

/// Wall clock in the configured timezone, as reported by Adafruit IO.
pub struct AdafruitClock<'a> {
    http: &'a dyn webclient::HttpGet,
    base_url: String,
    username: String,
    key: String,
    timezone: String,
}

impl<'a> AdafruitClock<'a> {
    pub fn new(http: &'a dyn webclient::HttpGet, base_url: &str, username: &str, key: &str, timezone: &str) -> AdafruitClock<'a> {
        return AdafruitClock {
            http: http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            key: key.to_string(),
            timezone: timezone.to_string(),
        };
    }

    fn url(&self) -> String {
        return format!(
            "{}/{}/integrations/time/strftime?x-aio-key={}&tz={}&fmt={}",
            self.base_url, self.username, self.key, self.timezone, TIME_FORMAT_QUERY);
    }

    fn fetch_now(&self) -> result::FetchResult<chrono::NaiveDateTime> {
        let body = webclient::get_ok(self.http, &self.url(), &[])?;
        return parse_service_time(&String::from_utf8_lossy(&body));
    }
}

impl<'a> TrustedClock for AdafruitClock<'a> {
    fn now(&self) -> result::FetchResult<chrono::NaiveDateTime> {
        return self.fetch_now().map_err(result::FetchError::time_service);
    }
}

/// Parses "2024-01-01 12:00:00" (or the same with a 'T' separator).
pub fn parse_service_time(raw: &str) -> result::FetchResult<chrono::NaiveDateTime> {
    return parse_naive(&raw.trim().replace(" ", "T"));
}

pub fn parse_naive(iso: &str) -> result::FetchResult<chrono::NaiveDateTime> {
    return Ok(chrono::NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")?);
}

/// Whole minutes from `now` until `arrival`, rounded toward negative
/// infinity, so a train 30 seconds overdue reads "-1".
pub fn minutes_until(now: &chrono::NaiveDateTime, arrival: &chrono::NaiveDateTime) -> i64 {
    let delta = arrival.signed_duration_since(*now);
    match delta.num_nanoseconds() {
        Some(nanos) => return nanos.div_euclid(60 * 1_000_000_000),
        // Only past ~292 years does the nanosecond count overflow.
        None => return delta.num_seconds().div_euclid(60),
    }
}
