//! Plain-text rendering of the menu for the terminal

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::data::Restaurant;
use crate::query::FilteredMenu;

/// Renders the filtered menu as output lines
///
/// Matched meals are drawn in green when `color` is set.
pub fn render_menu(menu: &FilteredMenu, color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for restaurant in &menu.restaurants {
        render_restaurant(&mut lines, restaurant, menu, color);
    }
    lines
}

fn render_restaurant(lines: &mut Vec<String>, restaurant: &Restaurant, menu: &FilteredMenu, color: bool) {
    let header = format!("Restaurant: {}", restaurant.name);
    let rule = "-".repeat(header.chars().count());
    lines.push(header);
    lines.push(rule);

    for meal in &restaurant.meals {
        let name = format!("`{}`", meal.name);
        let price = format!("\t{}", meal.price);

        if color && menu.is_matched(meal) {
            lines.push(name.as_str().green().to_string());
            lines.push(price.as_str().green().to_string());
        } else {
            lines.push(name);
            lines.push(price);
        }
        lines.push(String::new());
    }

    lines.push(String::new());
}

/// Writes the rendered menu to `out`
pub fn print_menu<W: Write>(out: &mut W, menu: &FilteredMenu, color: bool) -> io::Result<()> {
    for line in render_menu(menu, color) {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
