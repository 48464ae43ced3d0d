//! Menu filtering by restaurant and meal search
//!
//! Both filters are optional and compose; the input list is never modified.

use regex::{Regex, RegexBuilder};

use crate::data::{Meal, Restaurant};

/// Result of filtering a menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredMenu {
    /// Restaurants to show; with a search, one entry per matching meal
    pub restaurants: Vec<Restaurant>,
    /// Meals matching the search, in menu order
    pub matched_meals: Vec<Meal>,
}

impl FilteredMenu {
    /// Whether the meal should be highlighted
    pub fn is_matched(&self, meal: &Meal) -> bool {
        self.matched_meals.contains(meal)
    }
}

/// Compiles a case-insensitive meal search pattern
pub fn build_search(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Case-insensitive comparison of restaurant names after trimming
pub fn restaurant_name_matches(name: &str, wanted: &str) -> bool {
    name.trim().to_lowercase() == wanted.trim().to_lowercase()
}

/// Filters restaurants by name and meals by search pattern
///
/// Without a search every restaurant that survives the name filter is kept
/// as is and no meal counts as matched. With a search a restaurant is
/// repeated once for each of its matching meals.
pub fn filter_menu(
    restaurants: &[Restaurant],
    restaurant_name: Option<&str>,
    search: Option<&Regex>,
) -> FilteredMenu {
    let by_name = restaurants
        .iter()
        .filter(|r| restaurant_name.map_or(true, |wanted| restaurant_name_matches(&r.name, wanted)));

    let Some(search) = search else {
        return FilteredMenu {
            restaurants: by_name.cloned().collect(),
            matched_meals: Vec::new(),
        };
    };

    let mut filtered = FilteredMenu::default();
    for restaurant in by_name {
        for meal in restaurant.meals.iter().filter(|m| search.is_match(&m.name)) {
            filtered.restaurants.push(restaurant.clone());
            filtered.matched_meals.push(meal.clone());
        }
    }
    filtered
}
