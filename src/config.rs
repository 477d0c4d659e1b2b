// =============================================================================
// config.rs — WHERE THE DASHBOARD LEARNS WHERE THE SPREADSHEET LIVES
// =============================================================================
//
// There is exactly one data source: a spreadsheet published as a web app that
// answers a GET with a JSON array. Everything here can be overridden through
// environment variables prefixed with TRIP_DASHBOARD_, and a .env file is
// honored when present.
//
// Bad values never stop the engine from starting. They are logged and the
// default is used instead.
// =============================================================================

use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

/// The spreadsheet web app that serves the trip requests.
pub const DEFAULT_ENDPOINT_URL: &str = "https://script.google.com/macros/s/AKfycbzcC4wcOk7ze8Eq6GiJ1o2Y4JYpp5HoB18eWMf1HLeoRrI3Ua2Nr8XlIJQoMoGD2U0Y/exec";

const DEFAULT_USER_AGENT: &str = "TripDashboardEngine/0.1 (trip-requests; read-only)";

const ENV_ENDPOINT_URL: &str = "TRIP_DASHBOARD_ENDPOINT_URL";
const ENV_HTTP_TIMEOUT_SECS: &str = "TRIP_DASHBOARD_HTTP_TIMEOUT_SECS";
const ENV_USER_AGENT: &str = "TRIP_DASHBOARD_USER_AGENT";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the single GET goes. Apps Script answers with a redirect to
    /// googleusercontent, which reqwest follows on its own.
    pub endpoint_url: Url,

    /// Optional cap on the whole request. `None` means wait for as long as
    /// the server takes; the fetch either completes or fails terminally.
    pub request_timeout: Option<Duration>,

    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint(),
            request_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if one
    /// exists).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup. `from_env` is this with
    /// `std::env::var` plugged in.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let endpoint_url = match lookup(ENV_ENDPOINT_URL) {
            Some(raw) if !raw.trim().is_empty() => match Url::parse(raw.trim()) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => url,
                Ok(url) => {
                    warn!(
                        key = ENV_ENDPOINT_URL,
                        scheme = url.scheme(),
                        "Endpoint must be http(s), using the default spreadsheet URL"
                    );
                    defaults.endpoint_url
                }
                Err(e) => {
                    warn!(key = ENV_ENDPOINT_URL, error = %e, "Invalid endpoint URL, using the default");
                    defaults.endpoint_url
                }
            },
            _ => defaults.endpoint_url,
        };

        let request_timeout = match lookup(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    warn!(key = ENV_HTTP_TIMEOUT_SECS, value = raw.as_str(), error = %e, "Ignoring unparseable timeout");
                    None
                }
            },
            None => defaults.request_timeout,
        };

        let user_agent = lookup(ENV_USER_AGENT)
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        Config {
            endpoint_url,
            request_timeout,
            user_agent,
        }
    }
}

fn default_endpoint() -> Url {
    // Literal above; only a typo there can make this fail.
    Url::parse(DEFAULT_ENDPOINT_URL).expect("default endpoint URL is valid")
}
