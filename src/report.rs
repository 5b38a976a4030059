// Text formatting for the results. Kept separate from `ui` so the exact
// output can be unit tested without a terminal.

use crate::api::{
    self, CurrentWeather, Movie, OpenWeatherReading, PostThread, Quote, Ticker, Todo, User,
};

pub const TODO_PREVIEW: usize = 5;

/// Plain float display that keeps a trailing `.0` on whole numbers, so
/// `21.0` reads as a measurement rather than a count.
pub fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// "new york" -> "New York".
pub fn title_case(text: &str) -> String {
    text.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn user_details(user: &User) -> Vec<String> {
    vec![
        "User Details".to_string(),
        format!("Name: {}", user.name),
        format!("Email: {}", user.email),
        format!("Phone: {}", user.phone),
    ]
}

pub fn post_threads(threads: &[PostThread]) -> Vec<String> {
    if threads.is_empty() {
        return vec!["No posts found for this user.".to_string()];
    }
    let mut lines = Vec::new();
    for thread in threads {
        lines.push(String::new());
        lines.push(format!("Post: {}", thread.post.title));
        lines.push("Comments:".to_string());
        lines.extend(thread.comments.iter().map(|c| format!("- {}", c.name)));
    }
    lines
}

pub fn crypto_price(ticker: &Ticker, usd: &Quote) -> Vec<String> {
    vec![
        format!("Coin: {} ({})", ticker.name, ticker.symbol),
        format!("Price (USD): ${:.2}", usd.price),
        format!("24h Change: {:+.2}%", usd.percent_change_24h),
    ]
}

pub fn crypto_summary(ticker: &Ticker, usd: &Quote) -> Vec<String> {
    vec![
        format!("{} ({})", ticker.name, ticker.symbol),
        format!("Price: ${:.2}, Market Cap: ${:.0}", usd.price, usd.market_cap),
        format!("24h Change: {:+.2}%", usd.percent_change_24h),
    ]
}

pub fn comparison_header() -> Vec<String> {
    vec![
        format!("{:<15}{:<15}{}", "Name", "Price", "24h Change"),
        "-".repeat(40),
    ]
}

pub fn comparison_row(ticker: &Ticker, usd: &Quote) -> String {
    format!(
        "{:<15}${:<14.2}{:+.2}%",
        ticker.name, usd.price, usd.percent_change_24h
    )
}

/// Current weather. Wind direction is printed when the service sent it.
pub fn weather(city: &str, current: &CurrentWeather) -> Vec<String> {
    let mut lines = vec![
        format!("Weather in {}:", title_case(city)),
        format!("Temperature: {}°C", decimal(current.temperature)),
        format!("Wind Speed: {} km/h", decimal(current.windspeed)),
    ];
    if let Some(direction) = current.winddirection {
        lines.push(format!("Wind Direction: {}°", decimal(direction)));
    }
    lines
}

pub fn todos(completed: bool, todos: &[Todo]) -> Vec<String> {
    let mut lines = vec![format!(
        "Total todos with completed={}: {}",
        completed,
        todos.len()
    )];
    lines.extend(
        todos
            .iter()
            .take(TODO_PREVIEW)
            .map(|t| format!("- {}", t.title)),
    );
    lines
}

pub fn openweather(city: &str, reading: &OpenWeatherReading) -> String {
    format!(
        "OpenWeatherMap - {}: {}°C, {}",
        title_case(city),
        decimal(reading.temperature),
        reading.description
    )
}

pub fn movie(movie: &Movie) -> Vec<String> {
    vec![
        format!("Title: {}", movie.title),
        format!("Year: {}", movie.year),
        format!("Genre: {}", movie.genre),
        format!("Director: {}", movie.director),
        format!("IMDB Rating: {}", movie.imdb_rating),
        format!("Plot: {}", movie.plot),
    ]
}

pub fn pm25_sample(time: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}: {} µg/m³", time, decimal(v)),
        None => format!("{}: n/a µg/m³", time),
    }
}

/// Lines for the retry-wrapped crypto check, given the raw ticker JSON.
pub fn safe_crypto(data: &serde_json::Value) -> Vec<String> {
    let price = data["quotes"]["USD"]["price"].as_f64();
    match (api::validate_crypto_data(data), price) {
        (true, Some(price)) => vec![
            format!("Coin: {}", data["name"].as_str().unwrap_or("unknown")),
            format!("Price: {}", rounded_price(price)),
        ],
        _ => vec!["Invalid crypto data format".to_string()],
    }
}

/// Price rounded to two decimals the way the safe crypto check shows it.
pub fn rounded_price(price: f64) -> String {
    decimal((price * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Comment, Post};
    use std::collections::HashMap;

    fn bitcoin() -> (Ticker, Quote) {
        let quote = Quote {
            price: 64123.5,
            market_cap: 1_262_000_000_000.4,
            percent_change_24h: 2.5,
        };
        let mut quotes = HashMap::new();
        quotes.insert("USD".to_string(), quote.clone());
        (
            Ticker {
                name: "Bitcoin".into(),
                symbol: "BTC".into(),
                quotes,
            },
            quote,
        )
    }

    #[test]
    fn title_case_handles_multi_word_cities() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case(" dELHI "), "Delhi");
    }

    #[test]
    fn crypto_lines_are_signed_and_rounded() {
        let (ticker, usd) = bitcoin();
        assert_eq!(
            crypto_price(&ticker, &usd),
            vec![
                "Coin: Bitcoin (BTC)",
                "Price (USD): $64123.50",
                "24h Change: +2.50%",
            ]
        );
        assert_eq!(
            crypto_summary(&ticker, &usd)[1],
            "Price: $64123.50, Market Cap: $1262000000000"
        );
    }

    #[test]
    fn comparison_table_is_aligned() {
        let (ticker, usd) = bitcoin();
        let header = comparison_header();
        assert_eq!(header[0], "Name           Price          24h Change");
        assert_eq!(header[1].len(), 40);
        assert_eq!(
            comparison_row(&ticker, &usd),
            "Bitcoin        $64123.50      +2.50%"
        );
    }

    #[test]
    fn todo_listing_is_capped() {
        let items: Vec<Todo> = (0..8)
            .map(|i| Todo {
                title: format!("todo {}", i),
                completed: true,
            })
            .collect();
        let lines = todos(true, &items);
        assert_eq!(lines[0], "Total todos with completed=true: 8");
        assert_eq!(lines.len(), 1 + TODO_PREVIEW);
        assert_eq!(lines[5], "- todo 4");
    }

    #[test]
    fn empty_threads_print_fallback() {
        assert_eq!(post_threads(&[]), vec!["No posts found for this user."]);

        let thread = PostThread {
            post: Post {
                user_id: 1,
                id: 1,
                title: "hello".into(),
            },
            comments: vec![Comment {
                post_id: 1,
                name: "nice".into(),
            }],
        };
        let lines = post_threads(&[thread]);
        assert_eq!(lines[1..], ["Post: hello", "Comments:", "- nice"]);
    }

    #[test]
    fn weather_omits_missing_direction() {
        let current = CurrentWeather {
            temperature: 31.2,
            windspeed: 7.9,
            winddirection: None,
        };
        let lines = weather("mumbai", &current);
        assert_eq!(
            lines,
            vec!["Weather in Mumbai:", "Temperature: 31.2°C", "Wind Speed: 7.9 km/h"]
        );
    }

    #[test]
    fn pm25_missing_values_print_na() {
        assert_eq!(
            pm25_sample("2024-05-01T00:00", Some(41.3)),
            "2024-05-01T00:00: 41.3 µg/m³"
        );
        assert_eq!(
            pm25_sample("2024-05-01T01:00", None),
            "2024-05-01T01:00: n/a µg/m³"
        );
        assert_eq!(
            pm25_sample("2024-05-01T02:00", Some(12.0)),
            "2024-05-01T02:00: 12.0 µg/m³"
        );
    }

    #[test]
    fn safe_crypto_checks_shape_first() {
        let data = serde_json::json!({"name": "Ethereum", "quotes": {"USD": {"price": 3012.456}}});
        assert_eq!(safe_crypto(&data), vec!["Coin: Ethereum", "Price: 3012.46"]);

        let missing = serde_json::json!({"name": "Ethereum", "quotes": {}});
        assert_eq!(safe_crypto(&missing), vec!["Invalid crypto data format"]);
    }

    #[test]
    fn whole_numbers_keep_one_decimal() {
        assert_eq!(decimal(21.0), "21.0");
        assert_eq!(decimal(-3.0), "-3.0");
        assert_eq!(decimal(7.25), "7.25");

        let current = CurrentWeather {
            temperature: 30.0,
            windspeed: 12.0,
            winddirection: Some(270.0),
        };
        assert_eq!(
            weather("delhi", &current)[1..],
            ["Temperature: 30.0°C", "Wind Speed: 12.0 km/h", "Wind Direction: 270.0°"]
        );
    }

    #[test]
    fn rounded_price_keeps_two_places_at_most() {
        assert_eq!(rounded_price(1.005_1), "1.01");
        assert_eq!(rounded_price(3000.0), "3000.0");
    }
}
