// UI layer: interactive menus built with `dialoguer`. Every handler
// collects its input, calls the API client behind a spinner and prints the
// result. API failures are printed and control goes back to the menu; only
// terminal errors are propagated.

use crate::api::{self, ApiClient, NewPost};
use crate::config::{DASHBOARD_TIMEOUT, SAFE_REQUEST_TIMEOUT};
use crate::error::ApiError;
use crate::lookup;
use crate::report;
use crate::retry::RetryPolicy;
use crate::storage;
use crate::validate;
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::time::Duration;

/// Top-level menu: pick one of the three exercise parts until "Exit".
pub fn main_menu(api: ApiClient) -> Result<()> {
    loop {
        let items = vec!["Dynamic queries", "Error handling", "API dashboard", "Exit"];
        let selection = Select::new()
            .with_prompt("Choose a part")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => queries_menu(&api)?,
            1 => error_handling_menu(&api)?,
            2 => dashboard_menu(&api)?,
            3 => {
                println!("Exiting program.");
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Part 3: dynamic queries built from user input.
pub fn queries_menu(api: &ApiClient) -> Result<()> {
    loop {
        let items = vec![
            "User Info",
            "User Posts + Comments",
            "Crypto Price",
            "Weather Info",
            "Todos by Status",
            "Back",
        ];
        let selection = Select::new()
            .with_prompt("=== MENU ===")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => user_info(api)?,
            1 => posts_with_comments(api)?,
            2 => crypto_price(api)?,
            3 => weather_info(api)?,
            4 => todos_by_status(api)?,
            _ => break,
        }
    }
    Ok(())
}

/// Part 4: error handling demo and the retry-wrapped crypto check.
pub fn error_handling_menu(api: &ApiClient) -> Result<()> {
    loop {
        let items = vec!["Error Handling Demo", "Safe Crypto Price", "Back"];
        let selection = Select::new()
            .with_prompt("Error handling")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => demo_error_handling(api),
            1 => fetch_crypto_safely(api)?,
            _ => break,
        }
    }
    Ok(())
}

/// Part 5: the multi-API dashboard.
pub fn dashboard_menu(api: &ApiClient) -> Result<()> {
    println!(
        "Enhanced API Dashboard - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    loop {
        let items = vec![
            "Weather",
            "Crypto Price",
            "Compare Cryptos",
            "POST Example",
            "Save Sample JSON",
            "OpenWeatherMap",
            "OMDB Movie Info",
            "Last 7 Days AQI",
            "Back",
        ];
        let selection = Select::new()
            .with_prompt("--- MENU ---")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => show_weather(api)?,
            1 => show_crypto(api)?,
            2 => compare_cryptos(api)?,
            3 => make_post(api),
            4 => save_sample(),
            5 => openweather(api)?,
            6 => movie_info(api)?,
            7 => aqi_history(api)?,
            _ => break,
        }
    }
    Ok(())
}

// ---- part 3 ---------------------------------------------------------------

fn user_info(api: &ApiClient) -> Result<()> {
    println!("\n=== User Information ===\n");
    let input = prompt("Enter user ID (1-10)")?;
    let id = match validate::user_id(&input) {
        Ok(id) => id,
        Err(e) => return warn(&e),
    };

    match with_spinner("Fetching user...", || api.user(&id)) {
        Ok(user) => print_lines(&report::user_details(&user)),
        Err(ApiError::Status(_)) => fail("User not found."),
        Err(e) => fail(&e.to_string()),
    }
    Ok(())
}

fn posts_with_comments(api: &ApiClient) -> Result<()> {
    println!("\n=== User Posts & Comments ===\n");
    let input = prompt("Enter user ID (1-10)")?;
    let id = match validate::user_id(&input) {
        Ok(id) => id,
        Err(e) => return warn(&e),
    };

    match with_spinner("Fetching posts and comments...", || {
        api.posts_with_comments(&id)
    }) {
        Ok(threads) => print_lines(&report::post_threads(&threads)),
        Err(e) => fail(&e.to_string()),
    }
    Ok(())
}

fn crypto_price(api: &ApiClient) -> Result<()> {
    println!("\n=== Crypto Price ===\n");
    let coin = prompt("Enter coin (e.g., btc-bitcoin / eth-ethereum)")?;

    let result = with_spinner("Fetching ticker...", || {
        let ticker = api.ticker(&coin, None)?;
        let lines = report::crypto_price(&ticker, ticker.usd()?);
        Ok::<_, ApiError>(lines)
    });
    match result {
        Ok(lines) => print_lines(&lines),
        Err(ApiError::Status(_)) => fail("Coin not found."),
        Err(e) => fail(&e.to_string()),
    }
    Ok(())
}

fn weather_info(api: &ApiClient) -> Result<()> {
    println!("\n=== Weather Info ===\n");
    println!("Available cities: {}", lookup::city_names());
    let city = prompt("Enter city")?;
    let coords = match lookup::require_city(&city, "City not available.") {
        Ok(c) => c,
        Err(e) => return warn(&e),
    };

    match with_spinner("Fetching weather...", || {
        api.current_weather(coords, false, None)
    }) {
        Ok(current) => {
            println!();
            print_lines(&report::weather(&city, &current));
        }
        Err(_) => fail("Could not fetch weather."),
    }
    Ok(())
}

fn todos_by_status(api: &ApiClient) -> Result<()> {
    println!("\n=== Todo Search ===\n");
    let input = prompt("Enter status (true / false)")?;
    let completed = match validate::completed_status(&input) {
        Ok(c) => c,
        Err(e) => return warn(&e),
    };

    match with_spinner("Fetching todos...", || api.todos_by_status(completed)) {
        Ok(todos) => print_lines(&report::todos(completed, &todos)),
        Err(e) => fail(&e.to_string()),
    }
    Ok(())
}

// ---- part 4 ---------------------------------------------------------------

fn demo_error_handling(api: &ApiClient) {
    println!("\nError Handling Demo\n");
    for url in api.error_demo_urls() {
        let result = api.safe_get(&url, SAFE_REQUEST_TIMEOUT);
        match result.into_result() {
            Ok(_) => println!("{} {}", "Success:".green(), url),
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }
}

fn fetch_crypto_safely(api: &ApiClient) -> Result<()> {
    println!("\nCrypto Price Checker\n");
    let coin = prompt("Enter coin (btc-bitcoin / eth-ethereum)")?;

    match api
        .ticker_with_retry(&coin, &RetryPolicy::default())
        .into_result()
    {
        Ok(data) => print_lines(&report::safe_crypto(&data)),
        Err(e) => fail(&e),
    }
    Ok(())
}

// ---- part 5 ---------------------------------------------------------------

fn show_weather(api: &ApiClient) -> Result<()> {
    let city = prompt("Enter city")?.trim().to_lowercase();
    let Some(coords) = lookup::find_city(&city) else {
        fail(&format!(
            "City '{}' not found. Available: {}",
            city,
            lookup::city_names()
        ));
        return Ok(());
    };

    match with_spinner("Fetching weather...", || {
        api.current_weather(coords, true, Some(DASHBOARD_TIMEOUT))
    }) {
        Ok(current) => {
            println!();
            print_lines(&report::weather(&city, &current));
        }
        Err(e) => fail(&format!("Weather fetch error: {}", e)),
    }
    Ok(())
}

fn show_crypto(api: &ApiClient) -> Result<()> {
    let coin = prompt("Enter coin")?;

    let result = with_spinner("Fetching ticker...", || {
        let ticker = api.ticker(&coin, Some(DASHBOARD_TIMEOUT))?;
        let lines = report::crypto_summary(&ticker, ticker.usd()?);
        Ok::<_, ApiError>(lines)
    });
    match result {
        Ok(lines) => {
            println!();
            print_lines(&lines);
        }
        Err(e) => {
            tracing::warn!("Crypto fetch error: {}", e);
            fail(&format!("Coin '{}' not found.", coin.trim()));
        }
    }
    Ok(())
}

fn compare_cryptos(api: &ApiClient) -> Result<()> {
    let coins = validate::coin_list(&prompt("Enter coins comma separated")?);

    println!("\nCrypto Comparison Table");
    print_lines(&report::comparison_header());
    for coin in coins {
        let row = api
            .ticker(&coin, Some(DASHBOARD_TIMEOUT))
            .and_then(|ticker| Ok(report::comparison_row(&ticker, ticker.usd()?)));
        match row {
            Ok(row) => println!("{}", row),
            Err(e) => tracing::warn!("Crypto fetch error for {}: {}", coin, e),
        }
    }
    Ok(())
}

fn make_post(api: &ApiClient) {
    match with_spinner("Posting...", || api.create_post(&NewPost::default())) {
        Ok(body) => {
            println!("\nPOST Response:");
            match serde_json::to_string_pretty(&body) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", body),
            }
        }
        Err(e) => fail(&format!("POST error: {}", e)),
    }
}

fn save_sample() {
    let sample = json!({"weather": "sunny", "crypto": "bitcoin"});
    match storage::save_to_file(&sample, storage::DEFAULT_RESULTS_FILE) {
        Ok(path) => println!("{} {}", "Saved results to".green(), path.display()),
        Err(e) => fail(&format!("Could not save results: {}", e)),
    }
}

fn openweather(api: &ApiClient) -> Result<()> {
    let city = prompt("Enter city for OpenWeatherMap")?;

    match with_spinner("Fetching weather...", || {
        api.openweather(&city, Some(DASHBOARD_TIMEOUT))
    }) {
        Ok(reading) => {
            println!();
            println!("{}", report::openweather(&city, &reading));
        }
        Err(e @ ApiError::MissingApiKey { .. }) => fail(&e.to_string()),
        Err(e) => fail(&format!("Error: {}", e)),
    }
    Ok(())
}

fn movie_info(api: &ApiClient) -> Result<()> {
    let input = prompt("Enter movie title")?;
    let title = match validate::non_empty(&input, "Please enter a movie title.") {
        Ok(t) => t,
        Err(e) => return warn(&e),
    };

    match with_spinner("Searching OMDb...", || {
        api.movie(&title, Some(DASHBOARD_TIMEOUT))
    }) {
        Ok(Some(movie)) => {
            println!();
            print_lines(&report::movie(&movie));
        }
        Ok(None) => fail("Movie not found!"),
        Err(e) => fail(&format!("OMDB API error: {}", e)),
    }
    Ok(())
}

fn aqi_history(api: &ApiClient) -> Result<()> {
    let city = prompt("Enter city for AQI (PM2.5) data")?;
    let coords = match lookup::require_city(&city, "City not found.") {
        Ok(c) => c,
        Err(e) => return warn(&e),
    };
    let (start, end) = api::last_seven_days(chrono::Local::now().date_naive());

    match with_spinner("Fetching air quality...", || {
        api.air_quality(coords, start, end, Some(DASHBOARD_TIMEOUT))
    }) {
        Ok(hourly) => {
            println!(
                "\nPM2.5 Levels in {} (last 7 days):",
                report::title_case(&city)
            );
            for (time, value) in hourly.samples() {
                println!("{}", report::pm25_sample(time, value));
            }
        }
        Err(e) => fail(&format!("AQI fetch error: {}", e)),
    }
    Ok(())
}

// ---- helpers --------------------------------------------------------------

/// Free-text prompt. Empty answers are allowed so validation can report
/// them the same way as any other bad input.
fn prompt(label: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Show a spinner while `call` runs.
fn with_spinner<T>(message: &str, call: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = call();
    spinner.finish_and_clear();
    result
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn fail(message: &str) {
    println!("{}", message.red());
}

/// Report an input error; the handler then returns to the menu.
fn warn(err: &ApiError) -> Result<()> {
    println!("{}", err.to_string().yellow());
    Ok(())
}
