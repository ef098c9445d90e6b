//! Event coordinator: owns the per-instance state and reacts to init, scroll,
//! resize and segment clicks.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::DateFormat;
use crate::index::{parse_post_dates, MonthHistogram, PositionCache, Post, PostGeometry};
use crate::render::{SegmentKey, TimelineModel};
use crate::visibility::visible_posts;
use crate::{PackeryOptions, TimelineConfig, TimelineError};

/// The page the widget is mounted on. The browser implementation reads the
/// DOM and drives the packing library; tests use an in-memory layout.
pub trait LayoutHost {
    /// Raw date attribute of every post, in document order.
    fn post_dates(&self) -> Vec<String>;

    /// Lay out the post cards.
    fn pack(&mut self, options: &PackeryOptions);

    /// Geometry of every post after packing, in document order.
    fn measure_posts(&self) -> Vec<PostGeometry>;

    fn scroll_left(&self) -> f64;

    fn set_scroll_left(&mut self, left: f64);

    /// Visible width of the post container.
    fn viewport_width(&self) -> f64;

    /// Width available to the timeline strip.
    fn timeline_width(&self) -> f64;
}

/// What a renderer needs to draw the strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetSnapshot {
    pub timeline: TimelineModel,
    pub active: Vec<SegmentKey>,
}

pub struct MasonryTimeline<H> {
    host: H,
    config: TimelineConfig,
    dates: Vec<Option<NaiveDate>>,
    histogram: MonthHistogram,
    cache: PositionCache,
    timeline: TimelineModel,
}

impl<H: LayoutHost> MasonryTimeline<H> {
    /// Parse every post date, pack the cards, draw the strip and highlight
    /// whatever is initially in view.
    pub fn new(mut host: H, config: TimelineConfig) -> Result<Self, TimelineError> {
        let format = DateFormat::parse(&config.date_format)?;
        let dates = parse_post_dates(&format, &host.post_dates());
        let histogram = MonthHistogram::from_dates(dates.iter().flatten().copied());

        host.pack(&config.packery);

        let timeline = TimelineModel::empty(config.granularity, host.timeline_width());
        let mut widget = Self {
            host,
            config,
            dates,
            histogram,
            cache: PositionCache::new(),
            timeline,
        };
        widget.redraw();
        widget.on_scroll();
        Ok(widget)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn timeline(&self) -> &TimelineModel {
        &self.timeline
    }

    /// Sorted posts, rebuilt first if the layout changed since the last read.
    pub fn posts(&mut self) -> &[Post] {
        self.ensure_cache();
        self.cache.posts()
    }

    pub fn is_cache_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    pub fn visible_posts(&mut self) -> Vec<Post> {
        self.ensure_cache();
        let scroll_left = self.host.scroll_left();
        let viewport = self.host.viewport_width();
        visible_posts(self.cache.posts(), scroll_left, viewport)
            .into_iter()
            .copied()
            .collect()
    }

    /// Scroll the post container to the first post in `key`'s period.
    /// Returns the new scroll offset, or `None` when no post matches.
    pub fn jump_to(&mut self, key: SegmentKey) -> Option<f64> {
        self.ensure_cache();
        let left = self.cache.first_matching(key)?.left;
        self.host.set_scroll_left(left);
        tracing::debug!(?key, left, "jumped to segment");
        Some(left)
    }

    /// Highlight the segments of the posts now in view. Returns the active keys.
    pub fn on_scroll(&mut self) -> Vec<SegmentKey> {
        let granularity = self.timeline.granularity;
        let keys: BTreeSet<SegmentKey> = self
            .visible_posts()
            .iter()
            .map(|post| post.segment_key(granularity))
            .collect();

        self.timeline.set_active(&keys);
        tracing::trace!(active = keys.len(), "updated active segments");
        self.timeline.active_keys()
    }

    /// Re-pack the cards and rebuild everything derived from their layout.
    pub fn on_resize(&mut self) -> Vec<SegmentKey> {
        self.host.pack(&self.config.packery);
        self.redraw();
        self.on_scroll()
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            timeline: self.timeline.clone(),
            active: self.timeline.active_keys(),
        }
    }

    fn redraw(&mut self) {
        self.cache.mark_dirty();
        self.timeline = TimelineModel::build(
            self.config.granularity,
            &self.histogram,
            self.host.timeline_width(),
        );
    }

    fn ensure_cache(&mut self) {
        if self.cache.is_dirty() {
            let geometry = self.host.measure_posts();
            self.cache.rebuild(&self.dates, &geometry);
        }
    }
}
