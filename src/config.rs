// Configuration: base URLs of the public services and the API keys.
// Everything has a working default so the CLI runs with no setup; each
// value can be overridden through an environment variable, which is also
// how the integration tests point the client at a mock server.

use std::time::Duration;

pub const DEFAULT_OMDB_API_KEY: &str = "dbe12aae";

/// Per-part request timeouts. The query exercises send requests without
/// a timeout; the error handling part uses 5 seconds; the dashboard uses 10.
pub const SAFE_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DASHBOARD_TIMEOUT: Duration = Duration::from_secs(10);
pub const POST_TIMEOUT: Duration = Duration::from_secs(5);

/// Base URLs for every service the CLI talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub placeholder: String,
    pub coinpaprika: String,
    pub open_meteo: String,
    pub air_quality: String,
    pub openweather: String,
    pub omdb: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            placeholder: "https://jsonplaceholder.typicode.com".into(),
            coinpaprika: "https://api.coinpaprika.com".into(),
            open_meteo: "https://api.open-meteo.com".into(),
            air_quality: "https://air-quality-api.open-meteo.com".into(),
            openweather: "http://api.openweathermap.org".into(),
            omdb: "http://www.omdbapi.com".into(),
        }
    }
}

impl Endpoints {
    /// Read overrides from the environment, falling back to the public
    /// services.
    pub fn from_env() -> Self {
        let defaults = Endpoints::default();
        Endpoints {
            placeholder: env_url("PLACEHOLDER_API_URL", defaults.placeholder),
            coinpaprika: env_url("COINPAPRIKA_API_URL", defaults.coinpaprika),
            open_meteo: env_url("OPEN_METEO_API_URL", defaults.open_meteo),
            air_quality: env_url("AIR_QUALITY_API_URL", defaults.air_quality),
            openweather: env_url("OPENWEATHER_API_URL", defaults.openweather),
            omdb: env_url("OMDB_API_URL", defaults.omdb),
        }
    }

    /// Point every service at the same base URL (handy with a mock server).
    pub fn all(base_url: &str) -> Self {
        let base = normalize(base_url);
        Endpoints {
            placeholder: base.clone(),
            coinpaprika: base.clone(),
            open_meteo: base.clone(),
            air_quality: base.clone(),
            openweather: base.clone(),
            omdb: base,
        }
    }
}

/// API keys. The OpenWeatherMap key is optional; OMDb ships with a demo key.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeys {
    pub openweather: Option<String>,
    pub omdb: String,
}

impl Default for ApiKeys {
    fn default() -> Self {
        ApiKeys {
            openweather: None,
            omdb: DEFAULT_OMDB_API_KEY.into(),
        }
    }
}

impl ApiKeys {
    pub fn from_env() -> Self {
        ApiKeys {
            openweather: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            omdb: std::env::var("OMDB_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OMDB_API_KEY.into()),
        }
    }
}

fn env_url(var: &str, default: String) -> String {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => normalize(&value),
        _ => default,
    }
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_strips_trailing_slash() {
        let endpoints = Endpoints::all("http://127.0.0.1:8080/");
        assert_eq!(endpoints.placeholder, "http://127.0.0.1:8080");
        assert_eq!(endpoints.omdb, "http://127.0.0.1:8080");
    }

    #[test]
    fn default_keys_use_demo_omdb_key() {
        let keys = ApiKeys::default();
        assert_eq!(keys.omdb, "dbe12aae");
        assert!(keys.openweather.is_none());
    }
}
