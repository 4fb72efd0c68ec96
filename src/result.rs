extern crate anyhow;
extern crate chrono;
extern crate reqwest;
extern crate serde_json;
extern crate std;

pub type PathDashResult<T> = anyhow::Result<T>;

pub fn make_error(msg: &str) -> anyhow::Error {
    return anyhow::anyhow!("{}", msg);
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Longest body excerpt kept on an HttpStatus error.
const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Debug)]
pub enum FetchError {
    Transport(String),
    HttpStatus { code: u16, body: String },
    Parse(String),
    TimeService(Box<FetchError>),
}

impl FetchError {
    pub fn http_status(code: u16, body: &[u8]) -> FetchError {
        let body = String::from_utf8_lossy(body);
        return FetchError::HttpStatus {
            code: code,
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        };
    }

    pub fn time_service(cause: FetchError) -> FetchError {
        return FetchError::TimeService(Box::new(cause));
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            FetchError::Transport(ref msg) => {
                return write!(f, "Transport Error: {}", msg);
            },
            FetchError::HttpStatus { code, ref body } => {
                if body.is_empty() {
                    return write!(f, "HTTP Status {}", code);
                }
                return write!(f, "HTTP Status {}: {}", code, body);
            },
            FetchError::Parse(ref msg) => {
                return write!(f, "Parse Error: {}", msg);
            },
            FetchError::TimeService(ref cause) => {
                return write!(f, "Time Service Error: {}", cause);
            },
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            FetchError::TimeService(ref cause) => return Some(cause.as_ref()),
            _ => return None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> FetchError {
        return FetchError::Transport(err.to_string());
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> FetchError {
        return FetchError::Parse(format!("json: {}", err));
    }
}

impl From<chrono::ParseError> for FetchError {
    fn from(err: chrono::ParseError) -> FetchError {
        return FetchError::Parse(format!("timestamp: {}", err));
    }
}
