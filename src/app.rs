//! Application pipeline
//!
//! Runs one invocation: cache lookup for today, fetch and parse on a miss,
//! cache write, then filtering. Rendering is left to the caller.

use thiserror::Error;

use crate::cache::MenuCache;
use crate::cli::{restaurant_listing, CliError, RunConfig};
use crate::data::{parse_menu, Fetcher, MenuSnapshot, TransportError};
use crate::query::{filter_menu, FilteredMenu};

/// Errors that end a run
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid arguments
    #[error(transparent)]
    Config(#[from] CliError),

    /// The menu page could not be fetched
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Nothing is left to show after parsing and filtering
    #[error("No restaurants found")]
    NoRestaurants,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The restaurant ID table
    Listing(Vec<String>),
    /// The filtered menu
    Menu(FilteredMenu),
}

/// One invocation of the menu pipeline
pub struct App<F> {
    config: RunConfig,
    cache: Option<MenuCache>,
    fetcher: F,
}

impl<F: Fetcher> App<F> {
    /// Creates an App, resolving the cache directory from the config
    ///
    /// Without a `--cache-dir` override the per-user directory is used; when
    /// that cannot be determined the app runs without a cache.
    pub fn new(config: RunConfig, fetcher: F) -> Self {
        let cache = match &config.cache_dir {
            Some(dir) => Some(MenuCache::with_dir(dir.clone(), config.today)),
            None => MenuCache::new(config.today),
        }
        .map(|cache| cache.with_retention_days(config.retention_days));

        if cache.is_none() {
            tracing::warn!("No cache directory available, menus will not be cached");
        }

        Self {
            config,
            cache,
            fetcher,
        }
    }

    /// Creates an App with an explicit cache (or none)
    pub fn with_cache(config: RunConfig, cache: Option<MenuCache>, fetcher: F) -> Self {
        Self {
            config,
            cache,
            fetcher,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns today's menu, from the cache when possible
    ///
    /// # Behavior
    /// - Unless `clear_cache` is set, reads today's snapshot from the cache
    /// - On a miss, fetches and parses the page
    /// - Non-empty results are written back to the cache; write failures are logged
    pub async fn load_menu(&self) -> Result<MenuSnapshot, AppError> {
        let today = self.config.today;

        if !self.config.clear_cache {
            if let Some(snapshot) = self.cache.as_ref().and_then(|cache| cache.read(today)) {
                tracing::debug!("using cached menu for {}", today);
                return Ok(snapshot);
            }
        }

        let html = self.fetcher.fetch(&self.config.url).await?;
        let snapshot = MenuSnapshot::new(today, parse_menu(&html));
        tracing::debug!(
            "parsed {} restaurants from {}",
            snapshot.restaurants.len(),
            self.config.url
        );

        if let Some(cache) = &self.cache {
            if snapshot.restaurants.is_empty() {
                tracing::debug!("not caching an empty menu");
            } else if let Err(e) = cache.write(&snapshot) {
                tracing::warn!("Failed to write menu cache in {}: {}", cache.dir().display(), e);
            }
        }

        Ok(snapshot)
    }

    /// Runs the whole pipeline
    pub async fn run(&self) -> Result<Output, AppError> {
        if self.config.list {
            return Ok(Output::Listing(restaurant_listing()));
        }

        let snapshot = self.load_menu().await?;
        let filtered = filter_menu(
            &snapshot.restaurants,
            self.config.restaurant.map(|r| r.name),
            self.config.search.as_ref(),
        );

        if filtered.restaurants.is_empty() {
            return Err(AppError::NoRestaurants);
        }

        Ok(Output::Menu(filtered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::data::{Meal, Restaurant};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use clap::Parser;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const PAGE: &str = r#"<html><body><div class="restaurants">
        <div class="restaurant">
            <h3 class="restaurantName">Delica</h3>
            <table class="meals">
                <tr class="meal"><td class="mealName">Soup</td>
                    <td class="mealPrices"><span class="mealPrice">2,50</span></td></tr>
            </table>
        </div>
        <div class="restaurant">
            <h3 class="restaurantName">Brygge</h3>
            <table class="meals">
                <tr class="meal"><td class="mealName">Fish Soup</td>
                    <td class="mealPrices"><span class="mealPrice">3,00</span></td></tr>
                <tr class="meal"><td class="mealName">Salad</td>
                    <td class="mealPrices"><span class="mealPrice">2,00</span></td></tr>
            </table>
        </div>
    </div></body></html>"#;

    struct FakeFetcher {
        body: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn serving(body: &'static str) -> Self {
            Self {
                body: Some(body),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                body: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Some(body) => Ok(body.as_bytes().to_vec()),
                None => Err(TransportError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            }
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    fn config(args: &[&str], dir: &TempDir) -> RunConfig {
        let mut argv = vec!["ruokalista", "--cache-dir"];
        argv.push(dir.path().to_str().unwrap());
        argv.extend_from_slice(args);
        RunConfig::from_cli(&Cli::parse_from(argv), today()).unwrap()
    }

    #[tokio::test]
    async fn test_cache_miss_fetches_and_writes() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&[], &dir), FakeFetcher::serving(PAGE));

        let snapshot = app.load_menu().await.unwrap();

        assert_eq!(app.fetcher().calls(), 1);
        assert_eq!(snapshot.date, today());
        assert_eq!(snapshot.restaurants.len(), 2);
        assert!(dir.path().join("menu-2024-09-02.json").exists());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_fetch() {
        let dir = TempDir::new().unwrap();
        let cached = MenuSnapshot::new(
            today(),
            vec![Restaurant::new("Galilei", vec![Meal::new("Pizza", "2,70")])],
        );
        MenuCache::with_dir(dir.path().to_path_buf(), today())
            .write(&cached)
            .unwrap();

        let app = App::new(config(&[], &dir), FakeFetcher::failing());

        assert_eq!(app.load_menu().await.unwrap(), cached);
        assert_eq!(app.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_clear_cache_fetches_again() {
        let dir = TempDir::new().unwrap();
        let stale = MenuSnapshot::new(today(), vec![Restaurant::new("Galilei", vec![])]);
        MenuCache::with_dir(dir.path().to_path_buf(), today())
            .write(&stale)
            .unwrap();

        let app = App::new(config(&["--clear-cache"], &dir), FakeFetcher::serving(PAGE));
        let snapshot = app.load_menu().await.unwrap();

        assert_eq!(app.fetcher().calls(), 1);
        assert_eq!(snapshot.restaurants[0].name, "Delica");

        let reread = MenuCache::with_dir(dir.path().to_path_buf(), today()).read(today());
        assert_eq!(reread, Some(snapshot));
    }

    #[tokio::test]
    async fn test_transport_error_is_fatal() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&[], &dir), FakeFetcher::failing());

        let err = app.run().await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
        assert_eq!(err.to_string(), "Received a non-OK HTTP status code: 500");
    }

    #[tokio::test]
    async fn test_empty_page_is_not_cached_and_reports_no_restaurants() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&[], &dir), FakeFetcher::serving("<html></html>"));

        let err = app.run().await.unwrap_err();
        assert!(matches!(err, AppError::NoRestaurants));
        assert!(!dir.path().join("menu-2024-09-02.json").exists());
    }

    #[tokio::test]
    async fn test_run_filters_by_search() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&["-s", "soup"], &dir), FakeFetcher::serving(PAGE));

        let Output::Menu(menu) = app.run().await.unwrap() else {
            panic!("expected a menu");
        };
        let names: Vec<_> = menu.restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Delica", "Brygge"]);
        assert_eq!(
            menu.matched_meals,
            vec![Meal::new("Soup", "2,50"), Meal::new("Fish Soup", "3,00")]
        );
    }

    #[tokio::test]
    async fn test_run_restaurant_missing_from_page() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&["-r", "dental"], &dir), FakeFetcher::serving(PAGE));

        assert!(matches!(app.run().await, Err(AppError::NoRestaurants)));
    }

    #[tokio::test]
    async fn test_list_does_not_fetch() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&["--list"], &dir), FakeFetcher::serving(PAGE));

        let output = app.run().await.unwrap();
        assert_eq!(output, Output::Listing(restaurant_listing()));
        assert_eq!(app.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_runs_without_cache() {
        let dir = TempDir::new().unwrap();
        let app = App::with_cache(config(&[], &dir), None, FakeFetcher::serving(PAGE));

        assert_eq!(app.load_menu().await.unwrap().restaurants.len(), 2);
        assert_eq!(app.load_menu().await.unwrap().restaurants.len(), 2);
        assert_eq!(app.fetcher().calls(), 2);
        assert!(!dir.path().join("menu-2024-09-02.json").exists());
    }
}
