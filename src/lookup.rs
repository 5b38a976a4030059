// Static lookup tables: short city names to coordinates and coin names to
// coinpaprika ticker ids. Slices keep the listing order stable for prompts.

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

const fn coords(latitude: f64, longitude: f64) -> Coordinates {
    Coordinates {
        latitude,
        longitude,
    }
}

pub const CITIES: &[(&str, Coordinates)] = &[
    ("delhi", coords(28.6139, 77.2090)),
    ("mumbai", coords(19.0760, 72.8777)),
    ("bangalore", coords(12.9716, 77.5946)),
    ("chennai", coords(13.0827, 80.2707)),
    ("kolkata", coords(22.5726, 88.3639)),
    ("hyderabad", coords(17.3850, 78.4867)),
    ("new york", coords(40.7128, -74.0060)),
    ("london", coords(51.5074, -0.1278)),
    ("tokyo", coords(35.6762, 139.6503)),
    ("sydney", coords(-33.8688, 151.2093)),
    ("paris", coords(48.8566, 2.3522)),
    ("berlin", coords(52.5200, 13.4050)),
];

pub const CRYPTO_IDS: &[(&str, &str)] = &[
    ("bitcoin", "btc-bitcoin"),
    ("ethereum", "eth-ethereum"),
    ("dogecoin", "doge-dogecoin"),
    ("cardano", "ada-cardano"),
    ("solana", "sol-solana"),
    ("ripple", "xrp-xrp"),
];

/// Comma separated list of the known cities, in table order.
pub fn city_names() -> String {
    CITIES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Look up a city ignoring case and surrounding whitespace.
pub fn find_city(city: &str) -> Option<Coordinates> {
    let key = city.trim().to_lowercase();
    CITIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, c)| *c)
}

/// Like `find_city`, but an unknown city is an input error carrying
/// `message`.
pub fn require_city(city: &str, message: &str) -> Result<Coordinates> {
    find_city(city).ok_or_else(|| ApiError::invalid_input(message))
}

/// Map a coin name to its ticker id. Anything not in the table (including
/// ids typed directly, like `btc-bitcoin`) passes through lowercased.
pub fn resolve_coin(coin: &str) -> String {
    let key = coin.trim().to_lowercase();
    CRYPTO_IDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, id)| id.to_string())
        .unwrap_or(key)
}
