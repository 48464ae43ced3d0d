//! Menu page parser
//!
//! Turns the menu page HTML into `Restaurant` records. The parser only needs
//! two things from a document tree, selecting descendants and reading text,
//! which the `MenuNode` trait captures. `scraper` provides the implementation.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use super::{Meal, Restaurant, UNKNOWN_PRICE};

const RESTAURANT_QUERY: &str = "div.restaurants > div.restaurant";
const RESTAURANT_NAME_QUERY: &str = "h3.restaurantName";
const MEAL_ROW_QUERY: &str = "table.meals tr.meal";
const MEAL_NAME_QUERY: &str = "td.mealName";
const MEAL_PRICE_QUERY: &str = "td.mealPrices span.mealPrice";

/// Errors for a single restaurant or meal that could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A selector query could not be compiled
    #[error("Invalid selector '{query}': {reason}")]
    InvalidSelector { query: String, reason: String },

    /// A required element was not found
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    /// A required element contained no text
    #[error("Empty text in element: {0}")]
    EmptyText(&'static str),
}

/// A node of a structured document the parser can query
pub trait MenuNode: Sized {
    /// Returns all descendants matching a CSS-style query, in document order
    fn select_all(&self, query: &str) -> Result<Vec<Self>, ParseError>;

    /// Returns the concatenated text of the node and its descendants
    fn text_content(&self) -> String;
}

impl<'a> MenuNode for ElementRef<'a> {
    fn select_all(&self, query: &str) -> Result<Vec<Self>, ParseError> {
        let selector = Selector::parse(query).map_err(|e| ParseError::InvalidSelector {
            query: query.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(self.select(&selector).collect())
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}

/// Replaces non-breaking spaces and trims surrounding whitespace
pub fn normalize_text(s: &str) -> String {
    s.replace('\u{a0}', " ").trim().to_string()
}

/// Parses raw menu page bytes into restaurants
///
/// Restaurants that fail to parse are logged and left out of the result.
pub fn parse_menu(html: &[u8]) -> Vec<Restaurant> {
    let html = String::from_utf8_lossy(html);
    let document = Html::parse_document(&html);
    parse_document(&document.root_element())
}

/// Parses every restaurant container below `root`
pub fn parse_document<N: MenuNode>(root: &N) -> Vec<Restaurant> {
    let containers = match root.select_all(RESTAURANT_QUERY) {
        Ok(containers) => containers,
        Err(e) => {
            tracing::warn!("Failed to locate restaurants: {}", e);
            return Vec::new();
        }
    };

    containers
        .iter()
        .enumerate()
        .filter_map(|(index, container)| match parse_restaurant(container) {
            Ok(restaurant) => Some(restaurant),
            Err(e) => {
                tracing::warn!("Failed to parse restaurant #{}: {}", index + 1, e);
                None
            }
        })
        .collect()
}

/// Parses one restaurant container
///
/// Any meal row that fails to parse fails the whole restaurant.
pub fn parse_restaurant<N: MenuNode>(container: &N) -> Result<Restaurant, ParseError> {
    let name = first_text(container, RESTAURANT_NAME_QUERY)?;

    let meals = container
        .select_all(MEAL_ROW_QUERY)?
        .iter()
        .map(parse_meal)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Restaurant { name, meals })
}

/// Parses one meal row
pub fn parse_meal<N: MenuNode>(row: &N) -> Result<Meal, ParseError> {
    let name = first_text(row, MEAL_NAME_QUERY)?;

    let prices: Vec<String> = row
        .select_all(MEAL_PRICE_QUERY)?
        .iter()
        .map(|price| normalize_text(&price.text_content()))
        .collect();

    let price = if prices.is_empty() {
        UNKNOWN_PRICE.to_string()
    } else {
        prices.join(", ")
    };

    Ok(Meal { name, price })
}

/// Normalized text of the first match for `query`, which must be non-empty
fn first_text<N: MenuNode>(node: &N, query: &'static str) -> Result<String, ParseError> {
    let element = node
        .select_all(query)?
        .into_iter()
        .next()
        .ok_or(ParseError::MissingElement(query))?;

    let text = normalize_text(&element.text_content());
    if text.is_empty() {
        return Err(ParseError::EmptyText(query));
    }
    Ok(text)
}
