//! A host for cards that were measured elsewhere, e.g. handed over from
//! JavaScript or read from a JSON file.

use serde::{Deserialize, Serialize};

use crate::index::PostGeometry;
use crate::widget::LayoutHost;
use crate::{PackeryOptions, TimelineError};

/// One card as reported by the page: raw date attribute plus geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasuredPost {
    pub date: String,
    pub left: f64,
    pub width: f64,
}

/// Fixed layout. Packing is a no-op because the geometry is already final.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticLayout {
    pub posts: Vec<MeasuredPost>,
    pub scroll_left: f64,
    pub viewport_width: f64,
    pub timeline_width: f64,
}

impl StaticLayout {
    pub fn new(posts: Vec<MeasuredPost>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    /// Read posts from a JSON array of `{ "date", "left", "width" }`.
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let posts: Vec<MeasuredPost> =
            serde_json::from_str(json).map_err(|err| TimelineError::Parse(err.to_string()))?;
        Ok(Self::new(posts))
    }

    pub fn with_viewport(mut self, scroll_left: f64, viewport_width: f64) -> Self {
        self.scroll_left = scroll_left;
        self.viewport_width = viewport_width;
        self
    }

    pub fn with_timeline_width(mut self, width: f64) -> Self {
        self.timeline_width = width;
        self
    }
}

impl LayoutHost for StaticLayout {
    fn post_dates(&self) -> Vec<String> {
        self.posts.iter().map(|post| post.date.clone()).collect()
    }

    fn pack(&mut self, _options: &PackeryOptions) {}

    fn measure_posts(&self) -> Vec<PostGeometry> {
        self.posts
            .iter()
            .map(|post| PostGeometry {
                left: post.left,
                width: post.width,
            })
            .collect()
    }

    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, left: f64) {
        self.scroll_left = left;
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn timeline_width(&self) -> f64 {
        self.timeline_width
    }
}
