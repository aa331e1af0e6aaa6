//! # Birthboard
//!
//! A terminal calendar for browsing who was born on a given day, with
//! favourites grouped by the date they were marked under.
//!
//! ## Architecture
//!
//! ```text
//! Calendar → Board → Fetcher → Board → UI
//! ```
//!
//! - [`tui`]: calendar pane emits a date selection, panes draw the board's views
//! - [`board`]: formats the date, starts one lookup, applies its result,
//!   keeps favourites and search text
//! - [`fetcher`]: HTTP client for the Wikimedia "on this day" births feed
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! birthboard
//!
//! # Print births for December 10th, filtered
//! birthboard births 12 10 --search lovelace
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the configuration to the
/// fetcher used by every front end.
pub mod app;

/// The interactive state machine: selected date, lookup status, favourites,
/// search text.
pub mod board;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (the default)
/// - `births <month> <day> [--search <text>]` - Print one day's births
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/birthboard/config.toml`, supporting:
/// - API base URL, user agent, timeout, stale-response policy
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`DateSelection`](domain::DateSelection) and [`SelectedDate`](domain::SelectedDate)
/// - [`BirthEntry`](domain::BirthEntry) and [`BirthPayload`](domain::BirthPayload)
/// - [`FavouriteEntry`](domain::FavouriteEntry) and [`GroupedFavourites`](domain::GroupedFavourites)
pub mod domain;

/// Births lookup.
///
/// - [`BirthdayFetcher`](fetcher::BirthdayFetcher): Async trait for lookups
/// - [`HttpBirthdayFetcher`](fetcher::http_fetcher::HttpBirthdayFetcher): reqwest-based implementation
pub mod fetcher;

/// Terminal user interface.
///
/// Calendar and search on the left, births and favourites on the right.
///
/// Keybindings: hjkl move, n/p change month, Enter selects a date,
/// f toggles a favourite, / searches, o opens in browser, Tab cycles panes, q quits.
pub mod tui;
