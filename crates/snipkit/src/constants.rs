//! Default parameters shared by the utilities

use std::time::Duration;

// =============================================================================
// Numeric comparison
// =============================================================================

/// Tolerance used by `approximately_equal_default`
pub const DEFAULT_EPSILON: f64 = 0.001;

// =============================================================================
// Sorting
// =============================================================================

/// Slice length from which `max_n`/`min_n` sort on the rayon pool
///
/// Only honored with the `parallel-sort` feature.
pub const PARALLEL_SORT_THRESHOLD: usize = 1 << 14; // 16,384

// =============================================================================
// Dates
// =============================================================================

/// Milliseconds in one day (1000 * 3600 * 24)
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Date format produced by `tomorrow`
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Text
// =============================================================================

/// Separator used by `words`: any run of characters other than ASCII letters and `-`
pub const DEFAULT_WORD_PATTERN: &str = r"[^a-zA-Z-]+";

/// Tag pattern removed by `strip_html_tags`
pub const HTML_TAG_PATTERN: &str = r"<[^>]*>";

// =============================================================================
// Host collaborators
// =============================================================================

/// Locale used by `to_currency` when none is given
pub const DEFAULT_LOCALE: &str = "en-US";

/// Delay before a deferred closure runs
pub const DEFER_DELAY: Duration = Duration::from_millis(1);
