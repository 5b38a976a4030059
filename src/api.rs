// API client module: a small blocking HTTP client for the public services
// used by the exercises. Each method performs exactly one request (the
// posts/comments join performs two) and returns typed data; printing is
// left to the `ui` module.

use crate::config::{ApiKeys, Endpoints, POST_TIMEOUT, SAFE_REQUEST_TIMEOUT};
use crate::error::{ApiError, Result};
use crate::lookup::{self, Coordinates};
use crate::retry::{self, RetryPolicy, SafeResponse};
use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub const UNREACHABLE_DEMO_URL: &str = "https://wrong-url-test.com";

/// Client holding a reqwest blocking client, the service base URLs and
/// the API keys.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
    keys: ApiKeys,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Todo {
    pub title: String,
    pub completed: bool,
}

/// A post together with the comments made on it.
#[derive(Debug, Clone, PartialEq)]
pub struct PostThread {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// coinpaprika ticker. Only the fields the CLI prints are kept.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ticker {
    pub name: String,
    pub symbol: String,
    pub quotes: HashMap<String, Quote>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quote {
    pub price: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub percent_change_24h: f64,
}

impl Ticker {
    pub fn usd(&self) -> Result<&Quote> {
        self.quotes
            .get("USD")
            .ok_or_else(|| ApiError::decode("ticker has no USD quote"))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    #[serde(default)]
    pub winddirection: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

/// Hourly PM2.5 samples. `time` and `pm2_5` are parallel arrays.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HourlyPm25 {
    pub time: Vec<String>,
    pub pm2_5: Vec<Option<f64>>,
}

impl HourlyPm25 {
    /// Samples paired up; extra entries in either array are ignored.
    pub fn samples(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.time
            .iter()
            .map(String::as_str)
            .zip(self.pm2_5.iter().copied())
    }
}

#[derive(Deserialize, Debug)]
struct AirQualityResponse {
    hourly: HourlyPm25,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenWeatherReading {
    pub temperature: f64,
    pub description: String,
}

#[derive(Deserialize, Debug)]
struct OpenWeatherResponse {
    main: OpenWeatherMain,
    weather: Vec<OpenWeatherCondition>,
}

#[derive(Deserialize, Debug)]
struct OpenWeatherMain {
    temp: f64,
}

#[derive(Deserialize, Debug)]
struct OpenWeatherCondition {
    description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub director: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    pub plot: String,
}

/// Payload sent by the POST demo.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

impl Default for NewPost {
    fn default() -> Self {
        NewPost {
            title: "My Post".into(),
            body: "This is content".into(),
            user_id: 1,
        }
    }
}

/// The retry-wrapped ticker fetch only trusts data carrying `quotes.USD`.
pub fn validate_crypto_data(data: &Value) -> bool {
    data.get("quotes")
        .and_then(|quotes| quotes.get("USD"))
        .is_some()
}

/// Body read failures other than bad JSON keep their transport meaning.
fn body_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::decode(err.to_string())
    } else {
        ApiError::from(err)
    }
}

/// Inclusive date range covering the last seven days, ending `today`.
pub fn last_seven_days(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - chrono::Duration::days(6), today)
}

/// Keep the posts written by `user_id`, each with its comments.
pub fn join_posts_with_comments(
    user_id: &str,
    posts: Vec<Post>,
    comments: &[Comment],
) -> Vec<PostThread> {
    posts
        .into_iter()
        .filter(|post| post.user_id.to_string() == user_id)
        .map(|post| {
            let comments = comments
                .iter()
                .filter(|c| c.post_id == post.id)
                .cloned()
                .collect();
            PostThread { post, comments }
        })
        .collect()
}

impl ApiClient {
    /// Create an ApiClient configured from the environment (see
    /// `Endpoints::from_env` and `ApiKeys::from_env`).
    pub fn from_env() -> Result<Self> {
        Self::new(Endpoints::from_env(), ApiKeys::from_env())
    }

    pub fn new(endpoints: Endpoints, keys: ApiKeys) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("api-explorer-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient {
            client,
            endpoints,
            keys,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Log the call, apply the optional timeout and send. Non-2xx answers
    /// become `ApiError::Status`.
    fn send(
        &self,
        request: RequestBuilder,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<reqwest::blocking::Response> {
        tracing::info!("Calling API: {}", url);
        let request = match timeout {
            Some(t) => request.timeout(t),
            None => request,
        };
        let res = request.send()?;
        let status = res.status();
        if !status.is_success() {
            tracing::debug!("{} answered {}", url, status);
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(res)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> Result<T> {
        let res = self.send(self.client.get(url).query(query), url, timeout)?;
        res.json::<T>().map_err(body_error)
    }

    // ---- placeholder API -------------------------------------------------

    pub fn user(&self, user_id: &str) -> Result<User> {
        let url = format!("{}/users/{}", self.endpoints.placeholder, user_id);
        self.get_json(&url, &[], None)
    }

    pub fn posts(&self) -> Result<Vec<Post>> {
        let url = format!("{}/posts", self.endpoints.placeholder);
        self.get_json(&url, &[], None)
    }

    pub fn comments(&self) -> Result<Vec<Comment>> {
        let url = format!("{}/comments", self.endpoints.placeholder);
        self.get_json(&url, &[], None)
    }

    pub fn todos(&self) -> Result<Vec<Todo>> {
        let url = format!("{}/todos", self.endpoints.placeholder);
        self.get_json(&url, &[], None)
    }

    /// Posts of `user_id` joined with their comments.
    pub fn posts_with_comments(&self, user_id: &str) -> Result<Vec<PostThread>> {
        let posts = self.posts()?;
        let comments = self.comments()?;
        Ok(join_posts_with_comments(user_id, posts, &comments))
    }

    pub fn todos_by_status(&self, completed: bool) -> Result<Vec<Todo>> {
        Ok(self
            .todos()?
            .into_iter()
            .filter(|todo| todo.completed == completed)
            .collect())
    }

    /// POST the demo payload and return whatever JSON the server echoes.
    pub fn create_post(&self, payload: &NewPost) -> Result<Value> {
        let url = format!("{}/posts", self.endpoints.placeholder);
        tracing::info!("Calling API: {}", url);
        let res = self
            .client
            .post(&url)
            .json(payload)
            .timeout(POST_TIMEOUT)
            .send()?;
        res.json::<Value>().map_err(body_error)
    }

    // ---- coinpaprika -----------------------------------------------------

    pub fn ticker_url(&self, coin: &str) -> String {
        format!(
            "{}/v1/tickers/{}",
            self.endpoints.coinpaprika,
            lookup::resolve_coin(coin)
        )
    }

    pub fn ticker(&self, coin: &str, timeout: Option<Duration>) -> Result<Ticker> {
        let url = self.ticker_url(coin);
        self.get_json(&url, &[], timeout)
    }

    /// Retry-wrapped raw ticker fetch.
    pub fn ticker_with_retry(&self, coin: &str, policy: &RetryPolicy) -> SafeResponse {
        let url = self.ticker_url(coin);
        self.safe_get_with_retry(&url, policy)
    }

    // ---- open-meteo ------------------------------------------------------

    /// Current weather at `at`. `local_timezone` asks the service to report
    /// times in the city's own zone.
    pub fn current_weather(
        &self,
        at: Coordinates,
        local_timezone: bool,
        timeout: Option<Duration>,
    ) -> Result<CurrentWeather> {
        let url = format!("{}/v1/forecast", self.endpoints.open_meteo);
        let mut query = vec![
            ("latitude", at.latitude.to_string()),
            ("longitude", at.longitude.to_string()),
            ("current_weather", "true".to_string()),
        ];
        if local_timezone {
            query.push(("timezone", "auto".to_string()));
        }
        let res: ForecastResponse = self.get_json(&url, &query, timeout)?;
        Ok(res.current_weather)
    }

    /// Hourly PM2.5 between two dates, both inclusive.
    pub fn air_quality(
        &self,
        at: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
        timeout: Option<Duration>,
    ) -> Result<HourlyPm25> {
        let url = format!("{}/v1/air-quality", self.endpoints.air_quality);
        let query = [
            ("latitude", at.latitude.to_string()),
            ("longitude", at.longitude.to_string()),
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
            ("hourly", "pm2_5".to_string()),
        ];
        let res: AirQualityResponse = self.get_json(&url, &query, timeout)?;
        Ok(res.hourly)
    }

    // ---- OpenWeatherMap --------------------------------------------------

    pub fn openweather(&self, city: &str, timeout: Option<Duration>) -> Result<OpenWeatherReading> {
        let key = self
            .keys
            .openweather
            .as_deref()
            .ok_or_else(|| ApiError::MissingApiKey {
                service: "OpenWeatherMap".into(),
            })?;
        let url = format!("{}/data/2.5/weather", self.endpoints.openweather);
        let query = [
            ("q", city.trim().to_string()),
            ("appid", key.to_string()),
            ("units", "metric".to_string()),
        ];
        let res: OpenWeatherResponse = self.get_json(&url, &query, timeout)?;
        let description = res
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| ApiError::decode("no weather conditions in response"))?;
        Ok(OpenWeatherReading {
            temperature: res.main.temp,
            description,
        })
    }

    // ---- OMDb ------------------------------------------------------------

    /// Look a movie up by title. `Ok(None)` when OMDb reports no match.
    pub fn movie(&self, title: &str, timeout: Option<Duration>) -> Result<Option<Movie>> {
        let url = format!("{}/", self.endpoints.omdb);
        let query = [
            ("t", title.trim().to_string()),
            ("apikey", self.keys.omdb.clone()),
        ];
        let data: Value = self.get_json(&url, &query, timeout)?;
        if data.get("Response").and_then(Value::as_str) != Some("True") {
            return Ok(None);
        }
        let movie = serde_json::from_value(data)?;
        Ok(Some(movie))
    }

    // ---- safe requests ---------------------------------------------------

    /// GET `url` and fold every outcome into a `SafeResponse`.
    pub fn safe_get(&self, url: &str, timeout: Duration) -> SafeResponse {
        match self.get_json::<Value>(url, &[], Some(timeout)) {
            Ok(data) => SafeResponse::ok(data),
            Err(
                e @ (ApiError::Connection(_)
                | ApiError::Timeout(_)
                | ApiError::Status(_)
                | ApiError::Request(_)),
            ) => SafeResponse::err(e.to_string()),
            Err(e) => {
                tracing::debug!("{} failed: {}", url, e);
                SafeResponse::err("Request failed")
            }
        }
    }

    /// The three URLs the error handling demo walks through: an existing
    /// post, a missing post and a host that does not resolve.
    pub fn error_demo_urls(&self) -> Vec<String> {
        vec![
            format!("{}/posts/1", self.endpoints.placeholder),
            format!("{}/posts/99999", self.endpoints.placeholder),
            UNREACHABLE_DEMO_URL.to_string(),
        ]
    }

    /// `safe_get` under a fixed-count retry policy, using the error
    /// handling part's 5 second timeout.
    pub fn safe_get_with_retry(&self, url: &str, policy: &RetryPolicy) -> SafeResponse {
        retry::with_retry(policy, |_| self.safe_get(url, SAFE_REQUEST_TIMEOUT))
    }
}
