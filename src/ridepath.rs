// PANYNJ RidePATH feed: one JSON document for the whole system, already
// carrying countdown text per train.
extern crate serde;
extern crate serde_json;
extern crate std;

use crate::arrivals;
use crate::lines;
use crate::result;
use crate::structs;
use crate::webclient;

pub const RIDEPATH_URL: &str = "https://www.panynj.gov/bin/portauthority/ridepath.json";

// Stations and destinations stay raw until they pass the filters, so a bad
// entry elsewhere in the system does not spoil ours.
#[derive(Deserialize, Debug)]
struct RidePathResponse {
    results: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize, Debug)]
struct RidePathResult {
    destinations: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize, Debug)]
struct RidePathDestination {
    messages: Option<Vec<RidePathMessage>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RidePathMessage {
    head_sign: Option<String>,
    arrival_time_message: Option<String>,
    last_updated: Option<String>,
}

pub struct RidePathSource<'a> {
    http: &'a dyn webclient::HttpGet,
    lines: &'a lines::LineTable,
    url: String,
    station: String,
    direction: String,
}

impl<'a> RidePathSource<'a> {
    pub fn new(http: &'a dyn webclient::HttpGet, lines: &'a lines::LineTable, url: &str, station: &str, direction: &str) -> RidePathSource<'a> {
        return RidePathSource {
            http: http,
            lines: lines,
            url: url.to_string(),
            station: station.to_string(),
            direction: direction.to_string(),
        };
    }

    fn process(&self, response: RidePathResponse) -> result::FetchResult<Vec<structs::ArrivalRecord>> {
        let mut arrivals = vec![];
        for entry in response.results.unwrap_or_default() {
            if structs::str_field(&entry, "consideredStation") != Some(self.station.as_str()) {
                continue;
            }
            let result: RidePathResult = serde_json::from_value(entry)?;
            for entry in result.destinations.unwrap_or_default() {
                if structs::str_field(&entry, "label") != Some(self.direction.as_str()) {
                    continue;
                }
                let destination: RidePathDestination = serde_json::from_value(entry)?;
                for message in destination.messages.unwrap_or_default() {
                    let (line, color) = self.lines.resolve(
                        message.head_sign.as_deref().unwrap_or(structs::UNKNOWN));
                    arrivals.push(structs::ArrivalRecord {
                        line: line,
                        color: color,
                        projected_arrival: structs::or_unknown(message.arrival_time_message)
                            .replace(" min", "m"),
                        last_updated: structs::or_unknown(message.last_updated),
                    });
                }
            }
        }
        return Ok(arrivals);
    }
}

impl<'a> arrivals::ArrivalSource for RidePathSource<'a> {
    fn name(&self) -> &str {
        return "ridepath";
    }

    fn fetch(&self) -> arrivals::FetchOutcome {
        let body = webclient::get_ok(self.http, &self.url, &[webclient::ACCEPT_JSON])?;
        let response: RidePathResponse = serde_json::from_slice(&body)?;
        let arrivals = self.process(response)?;
        debug!("ridepath: {} arrivals for {}/{}", arrivals.len(), self.station, self.direction);
        return Ok(arrivals);
    }
}
