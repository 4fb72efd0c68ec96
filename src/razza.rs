// path.api.razza.dev realtime feed. Frequently answers 503 under load, so it
// only backs up the RidePATH feed.
extern crate chrono;
extern crate serde;
extern crate serde_json;
extern crate std;

use crate::arrivals;
use crate::clock;
use crate::lines;
use crate::result;
use crate::structs;
use crate::webclient;

pub const RAZZA_BASE_URL: &str = "https://path.api.razza.dev/v1";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RazzaRealtime {
    // Entries stay raw until they pass the direction filter.
    upcoming_trains: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RazzaTrain {
    headsign: Option<String>,
    projected_arrival: Option<String>,
    last_updated: Option<String>,
}

pub struct RazzaSource<'a> {
    http: &'a dyn webclient::HttpGet,
    clock: &'a dyn clock::TrustedClock,
    lines: &'a lines::LineTable,
    base_url: String,
    station: String,
    direction: String,
}

impl<'a> RazzaSource<'a> {
    pub fn new(http: &'a dyn webclient::HttpGet,
               clock: &'a dyn clock::TrustedClock,
               lines: &'a lines::LineTable,
               base_url: &str,
               station: &str,
               direction: &str) -> RazzaSource<'a> {
        return RazzaSource {
            http: http,
            clock: clock,
            lines: lines,
            base_url: base_url.trim_end_matches('/').to_string(),
            station: station.to_string(),
            direction: direction.to_string(),
        };
    }

    fn url(&self) -> String {
        return format!("{}/stations/{}/realtime", self.base_url, self.station);
    }

    fn process(&self, realtime: RazzaRealtime, now: &chrono::NaiveDateTime) -> result::FetchResult<Vec<structs::ArrivalRecord>> {
        let mut arrivals = vec![];
        for entry in realtime.upcoming_trains.unwrap_or_default() {
            if structs::str_field(&entry, "direction") != Some(self.direction.as_str()) {
                continue;
            }
            let train: RazzaTrain = serde_json::from_value(entry)?;
            let (line, color) = self.lines.resolve(
                train.headsign.as_deref().unwrap_or(structs::UNKNOWN));
            let projected_arrival = match train.projected_arrival {
                Some(ref projected) => countdown(projected, now)?,
                None => structs::UNKNOWN.to_string(),
            };
            arrivals.push(structs::ArrivalRecord {
                line: line,
                color: color,
                projected_arrival: projected_arrival,
                last_updated: structs::or_unknown(train.last_updated),
            });
        }
        return Ok(arrivals);
    }
}

/// "2024-01-01T12:07:30Z" against a clock reading of 12:00:00 gives "7m".
fn countdown(projected: &str, now: &chrono::NaiveDateTime) -> result::FetchResult<String> {
    let arrival = clock::parse_naive(projected.strip_suffix('Z').unwrap_or(projected))?;
    return Ok(format!("{}m", clock::minutes_until(now, &arrival)));
}

impl<'a> arrivals::ArrivalSource for RazzaSource<'a> {
    fn name(&self) -> &str {
        return "razza";
    }

    fn fetch(&self) -> arrivals::FetchOutcome {
        let now = self.clock.now()?;
        let body = webclient::get_ok(self.http, &self.url(), &[webclient::ACCEPT_JSON])?;
        let realtime: RazzaRealtime = serde_json::from_slice(&body)?;
        let arrivals = self.process(realtime, &now)?;
        debug!("razza: {} arrivals for {}/{} at {}", arrivals.len(), self.station, self.direction, now);
        return Ok(arrivals);
    }
}

#[cfg(test)]
mod tests {
    use super::RazzaSource;
    use crate::arrivals::ArrivalSource;
    use crate::clock::{self, TrustedClock};
    use crate::lines::{LineTable, DEFAULT_COLOR};
    use crate::result::{self, FetchError};
    use crate::structs::{ArrivalRecord, Rgb};
    use crate::webclient::{testing, HttpGet};

    struct FixedClock(&'static str);

    impl TrustedClock for FixedClock {
        fn now(&self) -> result::FetchResult<chrono::NaiveDateTime> {
            return clock::parse_naive(self.0);
        }
    }

    struct BrokenClock;

    impl TrustedClock for BrokenClock {
        fn now(&self) -> result::FetchResult<chrono::NaiveDateTime> {
            return Err(FetchError::time_service(FetchError::Transport("timed out".to_string())));
        }
    }

    const NOON: FixedClock = FixedClock("2024-01-01T12:00:00");

    fn source<'a>(http: &'a dyn HttpGet, clock: &'a dyn TrustedClock, lines: &'a LineTable) -> RazzaSource<'a> {
        return RazzaSource::new(http, clock, lines, super::RAZZA_BASE_URL, "grove_street", "TO_NY");
    }

    #[test]
    fn golden_feed() {
        let http = |url: &str, headers: &[(&str, &str)]| {
            assert_eq!("https://path.api.razza.dev/v1/stations/grove_street/realtime", url);
            assert_eq!(&[("Accept", "application/json; charset=UTF-8")], headers);
            return testing::ok(&testing::testdata("razza.json"));
        };
        let lines = LineTable::default();

        let arrivals = source(&http, &NOON, &lines).fetch().expect("fetch");

        assert_eq!(vec![
            ArrivalRecord {
                line: "33rd".to_string(),
                color: Rgb::from_u32(0xFF9900),
                projected_arrival: "7m".to_string(),
                last_updated: "2024-01-01T11:59:58Z".to_string(),
            },
            ArrivalRecord {
                line: "WTC".to_string(),
                color: Rgb::from_u32(0xD93A30),
                projected_arrival: "-1m".to_string(),
                last_updated: "-".to_string(),
            },
            ArrivalRecord {
                line: "Hoboken".to_string(),
                color: DEFAULT_COLOR,
                projected_arrival: "-".to_string(),
                last_updated: "2024-01-01T11:59:58Z".to_string(),
            },
        ], arrivals);
    }

    #[test]
    fn due_now_reads_zero() {
        let http = |_: &str, _: &[(&str, &str)]| testing::ok(
            r#"{"upcomingTrains":[{"direction":"TO_NY","headsign":"33rd Street","projectedArrival":"2024-01-01T12:00:00Z"}]}"#);
        let lines = LineTable::default();

        let arrivals = source(&http, &NOON, &lines).fetch().expect("fetch");
        assert_eq!("0m", arrivals[0].projected_arrival);
    }

    #[test]
    fn null_or_foreign_entries_are_skipped() {
        let lines = LineTable::default();

        let null_trains = |_: &str, _: &[(&str, &str)]| testing::ok(r#"{"upcomingTrains":null}"#);
        assert!(source(&null_trains, &NOON, &lines).fetch().expect("fetch").is_empty());

        let mixed = |_: &str, _: &[(&str, &str)]| testing::ok(r#"{"upcomingTrains":[
            {"direction":"TO_NJ","headsign":5,"projectedArrival":["2024"]},
            "not an object",
            {"direction":"TO_NY","headsign":"World Trade Center","projectedArrival":"2024-01-01T12:02:00Z"}
        ]}"#);
        let arrivals = source(&mixed, &NOON, &lines).fetch().expect("fetch");
        assert_eq!(vec![ArrivalRecord {
            line: "WTC".to_string(),
            color: Rgb::from_u32(0xD93A30),
            projected_arrival: "2m".to_string(),
            last_updated: "-".to_string(),
        }], arrivals);
    }

    #[test]
    fn clock_failure_skips_feed() {
        let http = |_: &str, _: &[(&str, &str)]| -> result::FetchResult<crate::webclient::HttpResponse> {
            panic!("feed should not be fetched without a clock");
        };
        let lines = LineTable::default();

        match source(&http, &BrokenClock, &lines).fetch() {
            Err(FetchError::TimeService(_)) => {},
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn failures() {
        let lines = LineTable::default();

        let unavailable = |_: &str, _: &[(&str, &str)]| testing::status(503, "");
        match source(&unavailable, &NOON, &lines).fetch() {
            Err(FetchError::HttpStatus { code: 503, .. }) => {},
            other => panic!("unexpected: {:?}", other),
        }

        let bad_timestamp = |_: &str, _: &[(&str, &str)]| testing::ok(
            r#"{"upcomingTrains":[{"direction":"TO_NY","projectedArrival":"soon"}]}"#);
        match source(&bad_timestamp, &NOON, &lines).fetch() {
            Err(FetchError::Parse(_)) => {},
            other => panic!("unexpected: {:?}", other),
        }

        let doubled_zone = |_: &str, _: &[(&str, &str)]| testing::ok(
            r#"{"upcomingTrains":[{"direction":"TO_NY","projectedArrival":"2024-01-01T12:07:30ZZ"}]}"#);
        match source(&doubled_zone, &NOON, &lines).fetch() {
            Err(FetchError::Parse(_)) => {},
            other => panic!("unexpected: {:?}", other),
        }

        let wrong_type = |_: &str, _: &[(&str, &str)]| testing::ok(
            r#"{"upcomingTrains":[{"direction":"TO_NY","headsign":5}]}"#);
        match source(&wrong_type, &NOON, &lines).fetch() {
            Err(FetchError::Parse(_)) => {},
            other => panic!("unexpected: {:?}", other),
        }

        // Unparseable timestamps in the other direction are never looked at.
        let other_direction = |_: &str, _: &[(&str, &str)]| testing::ok(
            r#"{"upcomingTrains":[{"direction":"TO_NJ","projectedArrival":"soon"}]}"#);
        assert!(source(&other_direction, &NOON, &lines).fetch().expect("fetch").is_empty());
    }
}
