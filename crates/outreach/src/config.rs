//! Pipeline tuning knobs.

use std::time::Duration;

/// Number of class listing pages fetched per run. The backend gives no
/// total-count signal, so this is an upper bound rather than a stop condition.
pub const DEFAULT_PAGE_COUNT: u32 = 3;

/// Page size requested from the class listing.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Course-type marker a class name must contain to be targeted.
pub const DEFAULT_COURSE_KEYWORD: &str = "暑假";

/// Connection status value meaning "already a contact".
pub const CONNECTED: i64 = 1;

/// Configuration for an outreach pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Keyword every targeted class name must contain.
    pub course_keyword: String,
    /// Class listing pages fetched per discovery run.
    pub page_count: u32,
    /// Classes per listing page.
    pub page_size: u32,
    /// Lower bound of the random delay before each roster request.
    pub pacing_min: Duration,
    /// Upper bound of the random delay before each roster request.
    pub pacing_max: Duration,
    /// Timeout of a single roster request.
    pub roster_timeout: Duration,
    /// Connection status meaning "already connected".
    pub connected_status: i64,
}

impl PipelineConfig {
    /// Set the course keyword.
    pub fn with_course_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.course_keyword = keyword.into();
        self
    }

    /// Set the number of listing pages.
    pub fn with_page_count(mut self, pages: u32) -> Self {
        self.page_count = pages;
        self
    }

    /// Set the roster pacing range.
    pub fn with_pacing(mut self, min: Duration, max: Duration) -> Self {
        self.pacing_min = min;
        self.pacing_max = max.max(min);
        self
    }

    /// Set the roster request timeout.
    pub fn with_roster_timeout(mut self, timeout: Duration) -> Self {
        self.roster_timeout = timeout;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            course_keyword: DEFAULT_COURSE_KEYWORD.to_string(),
            page_count: DEFAULT_PAGE_COUNT,
            page_size: DEFAULT_PAGE_SIZE,
            pacing_min: Duration::from_millis(100),
            pacing_max: Duration::from_millis(300),
            roster_timeout: Duration::from_secs(10),
            connected_status: CONNECTED,
        }
    }
}
