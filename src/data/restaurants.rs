//! Static restaurant table for the Turku student restaurants
//!
//! Maps the short IDs accepted on the command line to the restaurant names
//! as they appear on the menu page.

/// A restaurant the CLI knows by ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestaurantInfo {
    /// Short identifier used with `--restaurant`
    pub id: &'static str,
    /// Name of the restaurant as printed on the menu page
    pub name: &'static str,
}

/// Static array of all known restaurants, in listing order
pub static RESTAURANTS: [RestaurantInfo; 5] = [
    RestaurantInfo {
        id: "assari",
        name: "Assarin Ullakko",
    },
    RestaurantInfo {
        id: "brygge",
        name: "Brygge",
    },
    RestaurantInfo {
        id: "delica",
        name: "Delica",
    },
    RestaurantInfo {
        id: "galilei",
        name: "Galilei",
    },
    RestaurantInfo {
        id: "dental",
        name: "Dental",
    },
];

/// Get a restaurant by its ID
///
/// # Example
///
/// ```
/// use ruokalista::data::get_restaurant_by_id;
///
/// if let Some(restaurant) = get_restaurant_by_id("delica") {
///     println!("Found: {}", restaurant.name);
/// }
/// ```
pub fn get_restaurant_by_id(id: &str) -> Option<&'static RestaurantInfo> {
    RESTAURANTS.iter().find(|restaurant| restaurant.id == id)
}

/// Get all known restaurants
pub fn all_restaurants() -> &'static [RestaurantInfo] {
    &RESTAURANTS
}
