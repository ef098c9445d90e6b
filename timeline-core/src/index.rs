//! Post index: parsed dates, measured card geometry and the sorted position
//! cache used by the visibility tracker.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::{DateFormat, YearMonth};
use crate::render::SegmentKey;
use crate::Granularity;

/// Horizontal geometry of one card after packing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PostGeometry {
    pub left: f64,
    pub width: f64,
}

/// A dated card with its position in the post container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub date: NaiveDate,
    pub left: f64,
    pub width: f64,
    /// Position of the card in document order.
    pub dom_index: usize,
}

impl Post {
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    /// Key of the timeline segment this post belongs to.
    pub fn segment_key(&self, granularity: Granularity) -> SegmentKey {
        match granularity {
            Granularity::Months => SegmentKey::Month(self.year_month()),
            Granularity::Years => SegmentKey::Year(self.date.year()),
        }
    }
}

/// Parse the raw date attribute of every post. Entries that do not match the
/// format come back as `None` and are left out of the index.
pub fn parse_post_dates<S: AsRef<str>>(format: &DateFormat, raw: &[S]) -> Vec<Option<NaiveDate>> {
    raw.iter()
        .enumerate()
        .map(|(dom_index, text)| match format.parse_date(text.as_ref()) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!(dom_index, %err, "skipping post with unreadable date");
                None
            }
        })
        .collect()
}

/// Cards sorted by left offset. Starts dirty; the owner calls
/// [`PositionCache::rebuild`] before reading whenever [`is_dirty`](Self::is_dirty) is set.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionCache {
    posts: Vec<Post>,
    dirty: bool,
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionCache {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            dirty: true,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Zip parsed dates with freshly measured geometry (both in document
    /// order) and sort by left offset. Ties keep document order.
    pub fn rebuild(&mut self, dates: &[Option<NaiveDate>], geometry: &[PostGeometry]) {
        if dates.len() != geometry.len() {
            tracing::warn!(
                dates = dates.len(),
                measured = geometry.len(),
                "post count changed between parse and measure"
            );
        }

        self.posts.clear();
        self.posts.extend(
            dates
                .iter()
                .zip(geometry)
                .enumerate()
                .filter_map(|(dom_index, (date, geo))| {
                    date.map(|date| Post {
                        date,
                        left: geo.left,
                        width: geo.width,
                        dom_index,
                    })
                }),
        );
        self.posts.sort_by(|a, b| a.left.total_cmp(&b.left));
        self.dirty = false;

        tracing::debug!(posts = self.posts.len(), "rebuilt post position cache");
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// First post in left-offset order whose segment key equals `key`.
    pub fn first_matching(&self, key: SegmentKey) -> Option<&Post> {
        let granularity = key.granularity();
        self.posts
            .iter()
            .find(|post| post.segment_key(granularity) == key)
    }
}

/// Number of posts per calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthHistogram {
    counts: BTreeMap<YearMonth, usize>,
    max: usize,
}

impl MonthHistogram {
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut counts = BTreeMap::new();
        for date in dates {
            *counts.entry(YearMonth::of(date)).or_insert(0usize) += 1;
        }
        let max = counts.values().copied().max().unwrap_or(0);
        Self { counts, max }
    }

    pub fn count(&self, month: YearMonth) -> usize {
        self.counts.get(&month).copied().unwrap_or(0)
    }

    /// Posts in the busiest month.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Posts per year, derived from the month buckets.
    pub fn year_count(&self, year: i32) -> usize {
        self.counts
            .range(YearMonth::new(year, 1)..=YearMonth::new(year, 12))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn earliest(&self) -> Option<YearMonth> {
        self.counts.keys().next().copied()
    }

    pub fn latest(&self) -> Option<YearMonth> {
        self.counts.keys().next_back().copied()
    }
}
