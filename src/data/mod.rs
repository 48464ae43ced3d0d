//! Core data models for the restaurant menu CLI
//!
//! This module contains the menu data types shared by the fetcher, the
//! parser, the cache and the presenter.

pub mod fetch;
pub mod parser;
pub mod restaurants;

pub use fetch::{Fetcher, HttpFetcher, TransportError};
pub use parser::{parse_menu, MenuNode, ParseError};
pub use restaurants::{all_restaurants, get_restaurant_by_id, RestaurantInfo};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Price shown for meals that list no price tags
pub const UNKNOWN_PRICE: &str = "unknown";

/// A single meal on a restaurant's menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Whitespace-normalized meal name, never empty
    pub name: String,
    /// Free-form price text, possibly several prices joined with ", "
    pub price: String,
}

/// A restaurant and its meals in page order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Whitespace-normalized restaurant name
    pub name: String,
    /// Meals in the order they appear on the page
    #[serde(default)]
    pub meals: Vec<Meal>,
}

/// The complete parsed menu for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    /// Day the menu was scraped for
    pub date: NaiveDate,
    /// Restaurants in page order
    pub restaurants: Vec<Restaurant>,
}

impl Meal {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

impl Restaurant {
    pub fn new(name: impl Into<String>, meals: Vec<Meal>) -> Self {
        Self {
            name: name.into(),
            meals,
        }
    }
}

impl MenuSnapshot {
    pub fn new(date: NaiveDate, restaurants: Vec<Restaurant>) -> Self {
        Self { date, restaurants }
    }
}
