//! In-memory page used by the integration tests.

#![allow(dead_code)]

use masonry_timeline_core::{LayoutHost, PackeryOptions, PostGeometry};

/// Lays cards out in a single row, left to right in document order.
#[derive(Debug, Clone)]
pub struct RowHost {
    pub dates: Vec<String>,
    pub widths: Vec<f64>,
    pub gutter: f64,
    pub scale: f64,
    pub scroll_left: f64,
    pub viewport_width: f64,
    pub timeline_width: f64,
    pub pack_calls: usize,
    layout: Vec<PostGeometry>,
    measured: std::cell::Cell<usize>,
}

impl RowHost {
    pub fn new(posts: &[(&str, f64)]) -> Self {
        Self {
            dates: posts.iter().map(|(date, _)| date.to_string()).collect(),
            widths: posts.iter().map(|(_, width)| *width).collect(),
            gutter: 10.0,
            scale: 1.0,
            scroll_left: 0.0,
            viewport_width: 300.0,
            timeline_width: 600.0,
            pack_calls: 0,
            layout: Vec::new(),
            measured: std::cell::Cell::new(0),
        }
    }

    pub fn measured(&self) -> usize {
        self.measured.get()
    }
}

impl LayoutHost for RowHost {
    fn post_dates(&self) -> Vec<String> {
        self.dates.clone()
    }

    fn pack(&mut self, options: &PackeryOptions) {
        self.pack_calls += 1;
        self.gutter = options.gutter;
        let mut left = 0.0;
        self.layout = self
            .widths
            .iter()
            .map(|width| {
                let geo = PostGeometry {
                    left,
                    width: width * self.scale,
                };
                left += geo.width + self.gutter;
                geo
            })
            .collect();
    }

    fn measure_posts(&self) -> Vec<PostGeometry> {
        self.measured.set(self.measured.get() + 1);
        self.layout.clone()
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
