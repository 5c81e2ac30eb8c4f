//! Application configuration constants
//!
//! Central location for the tunables shared by the loader, the scroll
//! trigger and the calendar.

use crate::calendar::WeekStart;

/// Base URL used when `BACKOFFICE_API_URL` is not set at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Minimum spacing between two scroll handler invocations
pub const SCROLL_THROTTLE_MS: u64 = 500;

/// Fraction of the viewport height that counts as "near the bottom"
pub const SCROLL_THRESHOLD_RATIO: f64 = 0.25;

/// Week boundary used for every month grid in the application
pub const DEFAULT_WEEK_START: WeekStart = WeekStart::Monday;

/// Config for the infinite-scroll list views
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Rate limit applied to viewport scroll events
    pub throttle_ms: u64,
    /// Distance from the bottom, as a fraction of the viewport, that triggers the next page
    pub threshold_ratio: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            throttle_ms: SCROLL_THROTTLE_MS,
            threshold_ratio: SCROLL_THRESHOLD_RATIO,
        }
    }
}
