//! Command-line interface parsing for the restaurant menu CLI
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a validated `RunConfig`. Validation happens before any network call.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use regex::Regex;
use thiserror::Error;

use crate::cache::DEFAULT_RETENTION_DAYS;
use crate::data::fetch::DEFAULT_MENU_URL;
use crate::data::{all_restaurants, get_restaurant_by_id, RestaurantInfo};
use crate::query::build_search;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified restaurant ID is not in the restaurant table
    #[error("No such restaurant ID: '{0}'. Use --list to see valid IDs")]
    UnknownRestaurant(String),

    /// The search pattern is not a valid regular expression
    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidSearch {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Daily menus of Turku's student restaurants
#[derive(Parser, Debug)]
#[command(name = "ruokalista")]
#[command(about = "Search for daily meal lists from Turku's student restaurants")]
#[command(version)]
pub struct Cli {
    /// Override the scraped URL
    #[arg(short, long, value_name = "URL", default_value = DEFAULT_MENU_URL)]
    pub url: String,

    /// Show only a specific restaurant (see --list for IDs)
    #[arg(short, long, value_name = "ID")]
    pub restaurant: Option<String>,

    /// Show only meals matching this case-insensitive regular expression
    #[arg(short, long, value_name = "PATTERN")]
    pub search: Option<String>,

    /// Ignore today's cached menu and fetch it again
    #[arg(short, long)]
    pub clear_cache: bool,

    /// List all restaurant IDs
    #[arg(short, long)]
    pub list: bool,

    /// Disable highlighting of matched meals
    #[arg(long)]
    pub no_color: bool,

    /// Store cached menus in this directory instead of the user config directory
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Validated settings for one run, derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Page to fetch the menu from
    pub url: String,
    /// Restaurant to restrict the output to
    pub restaurant: Option<&'static RestaurantInfo>,
    /// Compiled meal search
    pub search: Option<Regex>,
    /// Skip the cache lookup
    pub clear_cache: bool,
    /// Print the restaurant table instead of the menu
    pub list: bool,
    /// Highlight matched meals
    pub color: bool,
    /// Cache directory override
    pub cache_dir: Option<PathBuf>,
    /// Days a cached snapshot is kept
    pub retention_days: i64,
    /// The calendar day the menu is wanted for
    pub today: NaiveDate,
}

/// Parses a restaurant ID argument against the restaurant table.
///
/// # Returns
/// * `Ok(&RestaurantInfo)` if the ID is known
/// * `Err(CliError::UnknownRestaurant)` otherwise
pub fn parse_restaurant_arg(id: &str) -> Result<&'static RestaurantInfo, CliError> {
    get_restaurant_by_id(id).ok_or_else(|| CliError::UnknownRestaurant(id.to_string()))
}

/// Compiles a search argument into a case-insensitive pattern.
pub fn parse_search_arg(pattern: &str) -> Result<Regex, CliError> {
    build_search(pattern).map_err(|source| CliError::InvalidSearch {
        pattern: pattern.to_string(),
        source,
    })
}

/// Text printed by `--list`
pub fn restaurant_listing() -> Vec<String> {
    let mut lines = vec![
        "ID - Restaurant name".to_string(),
        "--------------------".to_string(),
    ];
    lines.extend(
        all_restaurants()
            .iter()
            .map(|r| format!("{} - {}", r.id, r.name)),
    );
    lines
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    /// * `today` - The current calendar day
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with validated settings
    /// * `Err(CliError)` if the restaurant ID or search pattern is invalid
    pub fn from_cli(cli: &Cli, today: NaiveDate) -> Result<Self, CliError> {
        let restaurant = cli
            .restaurant
            .as_deref()
            .map(parse_restaurant_arg)
            .transpose()?;

        let search = cli.search.as_deref().map(parse_search_arg).transpose()?;

        Ok(RunConfig {
            url: cli.url.clone(),
            restaurant,
            search,
            clear_cache: cli.clear_cache,
            list: cli.list,
            color: !cli.no_color,
            cache_dir: cli.cache_dir.clone(),
            retention_days: DEFAULT_RETENTION_DAYS,
            today,
        })
    }
}
