//! Core logic for the masonry timeline: post index, visibility tracking,
//! timeline segments and the event coordinator that ties them together.

use serde::{Deserialize, Serialize};

pub mod date;
pub mod index;
pub mod layout;
pub mod render;
pub mod visibility;
pub mod widget;

pub use date::{DateFormat, YearMonth};
pub use index::{MonthHistogram, PositionCache, Post, PostGeometry};
pub use layout::{MeasuredPost, StaticLayout};
pub use render::{SegmentKey, TimelineModel, TimelineSegment, YearBand};
pub use visibility::visible_posts;
pub use widget::{LayoutHost, MasonryTimeline, WidgetSnapshot};

/// Widget configuration. Every field has a default so that callers can pass
/// a partial object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Moment-style pattern used to read the `data-date` attribute.
    pub date_format: String,
    pub granularity: Granularity,
    /// Options handed through to the packing library untouched.
    pub packery: PackeryOptions,
    /// Delay before a resize triggers a full rebuild. `0` rebuilds on every event.
    pub resize_debounce_ms: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            date_format: "DD.MM.YYYY".to_string(),
            granularity: Granularity::Months,
            packery: PackeryOptions::default(),
            resize_debounce_ms: 0,
        }
    }
}

/// Size of one timeline bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One segment per calendar month, with a post-count histogram.
    #[default]
    Months,
    /// One segment per year, no height encoding.
    Years,
}

/// Pass-through options for the masonry packer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PackeryOptions {
    pub item_selector: String,
    pub is_horizontal: bool,
    pub gutter: f64,
    pub row_height: f64,
}

impl Default for PackeryOptions {
    fn default() -> Self {
        Self {
            item_selector: ".post".to_string(),
            is_horizontal: true,
            gutter: 10.0,
            row_height: 100.0,
        }
    }
}

/// Errors raised while building or driving a timeline.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimelineError {
    #[error("unsupported date format pattern: {0}")]
    InvalidDateFormat(String),
    #[error("cannot read date {input:?} with format {format:?}")]
    InvalidDate { input: String, format: String },
    #[error("required element not found: {0}")]
    MissingElement(String),
    #[error("cannot read input: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}
