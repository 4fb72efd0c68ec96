extern crate reqwest;
extern crate std;

use crate::result;

pub const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json; charset=UTF-8");

const USER_AGENT: &str = "pathdash (LED arrival board)";

#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        return self.status == 200;
    }
}

/// Blocking GET. Connection problems come back as `FetchError::Transport`;
/// any status code, including errors, is an `Ok` response.
pub trait HttpGet {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> result::FetchResult<HttpResponse>;
}

// Lets tests stand in for the network with a closure.
#[cfg(test)]
impl<F> HttpGet for F
    where F: Fn(&str, &[(&str, &str)]) -> result::FetchResult<HttpResponse> {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> result::FetchResult<HttpResponse> {
        return self(url, headers);
    }
}

pub struct WebClient {
    client: reqwest::blocking::Client,
}

impl WebClient {
    pub fn new(timeout: std::time::Duration) -> result::PathDashResult<WebClient> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        return Ok(WebClient { client: client });
    }
}

impl HttpGet for WebClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> result::FetchResult<HttpResponse> {
        debug!("Fetching {}", url);
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        debug!("{} -> {} ({} bytes)", url, status, body.len());
        return Ok(HttpResponse {
            status: status,
            body: body.to_vec(),
        });
    }
}

/// Fetches `url` and returns the body of a 200 response. Other statuses are
/// turned into `FetchError::HttpStatus`.
pub fn get_ok(http: &dyn HttpGet, url: &str, headers: &[(&str, &str)]) -> result::FetchResult<Vec<u8>> {
    let response = http.get(url, headers)?;
    if !response.is_ok() {
        return Err(result::FetchError::http_status(response.status, &response.body));
    }
    return Ok(response.body);
}


#[cfg(test)]
mod tests {
    use super::{get_ok, testing};
    use crate::result::FetchError;

    #[test]
    fn get_ok_passes_body_through() {
        let http = |_: &str, _: &[(&str, &str)]| testing::ok("hello");
        assert_eq!(b"hello".to_vec(), get_ok(&http, "http://x", &[]).unwrap());
    }

    #[test]
    fn get_ok_rejects_non_200() {
        let http = |_: &str, _: &[(&str, &str)]| testing::status(204, "");
        match get_ok(&http, "http://x", &[]) {
            Err(FetchError::HttpStatus { code: 204, .. }) => {},
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn get_ok_keeps_transport_errors() {
        let http = |_: &str, _: &[(&str, &str)]| testing::unreachable();
        match get_ok(&http, "http://x", &[]) {
            Err(FetchError::Transport(_)) => {},
            other => panic!("unexpected: {:?}", other),
        }
    }
}
