//! Timeline strip model: year bands holding month or year segments sized
//! to split the strip evenly.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::date::YearMonth;
use crate::index::MonthHistogram;
use crate::Granularity;

/// Identity of a segment, shared by highlighting and jump lookups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKey {
    Month(YearMonth),
    Year(i32),
}

impl SegmentKey {
    pub fn granularity(self) -> Granularity {
        match self {
            SegmentKey::Month(_) => Granularity::Months,
            SegmentKey::Year(_) => Granularity::Years,
        }
    }

    /// Element id used by the rendered strip.
    pub fn element_id(self) -> String {
        match self {
            SegmentKey::Month(month) => format!("date_{}_{}", month.year, month.month),
            SegmentKey::Year(year) => format!("date_{year}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineSegment {
    pub key: SegmentKey,
    pub label: String,
    /// Width in pixels.
    pub width: f64,
    /// Bar height as a percentage of the busiest month. Months only.
    pub fill_percent: Option<u8>,
    pub post_count: usize,
    /// No posts fall into this period.
    pub empty: bool,
    pub active: bool,
}

/// Segments of one calendar year, labeled with the year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearBand {
    pub year: i32,
    pub label: String,
    pub segments: Vec<TimelineSegment>,
}

/// A fully laid out strip. Bands and segments run from the latest period to
/// the earliest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineModel {
    pub granularity: Granularity,
    pub width: f64,
    pub bands: Vec<YearBand>,
}

impl TimelineModel {
    pub fn empty(granularity: Granularity, width: f64) -> Self {
        Self {
            granularity,
            width,
            bands: Vec::new(),
        }
    }

    /// Lay out the strip for `histogram` across `width` pixels.
    pub fn build(granularity: Granularity, histogram: &MonthHistogram, width: f64) -> Self {
        let width = width.max(0.0);
        let (Some(earliest), Some(latest)) = (histogram.earliest(), histogram.latest()) else {
            return Self::empty(granularity, width);
        };

        let bands = match granularity {
            Granularity::Months => month_bands(histogram, earliest, latest, width),
            Granularity::Years => year_bands(histogram, earliest.year, latest.year, width),
        };

        tracing::debug!(
            ?granularity,
            width,
            bands = bands.len(),
            "drew timeline"
        );

        Self {
            granularity,
            width,
            bands,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &TimelineSegment> {
        self.bands.iter().flat_map(|band| band.segments.iter())
    }

    pub fn segment(&self, key: SegmentKey) -> Option<&TimelineSegment> {
        self.segments().find(|segment| segment.key == key)
    }

    pub fn segment_count(&self) -> usize {
        self.bands.iter().map(|band| band.segments.len()).sum()
    }

    /// Mark exactly the segments in `keys` as active.
    pub fn set_active(&mut self, keys: &BTreeSet<SegmentKey>) {
        for segment in self.bands.iter_mut().flat_map(|band| band.segments.iter_mut()) {
            segment.active = keys.contains(&segment.key);
        }
    }

    pub fn active_keys(&self) -> Vec<SegmentKey> {
        self.segments()
            .filter(|segment| segment.active)
            .map(|segment| segment.key)
            .collect()
    }
}

fn month_bands(
    histogram: &MonthHistogram,
    earliest: YearMonth,
    latest: YearMonth,
    width: f64,
) -> Vec<YearBand> {
    let months = earliest.span_to(latest);
    let segment_width = width / months as f64;
    let max = histogram.max().max(1);

    let mut bands: Vec<YearBand> = Vec::new();
    let mut current = latest;
    for _ in 0..months {
        let count = histogram.count(current);
        let fill = u8::try_from(count * 100 / max).unwrap_or(100);

        let segment = TimelineSegment {
            key: SegmentKey::Month(current),
            label: current.short_name().to_string(),
            width: segment_width,
            fill_percent: Some(fill),
            post_count: count,
            empty: count == 0,
            active: false,
        };

        match bands.last_mut() {
            Some(band) if band.year == current.year => band.segments.push(segment),
            _ => bands.push(YearBand {
                year: current.year,
                label: current.year.to_string(),
                segments: vec![segment],
            }),
        }

        current = current.pred();
    }

    bands
}

fn year_bands(histogram: &MonthHistogram, earliest: i32, latest: i32, width: f64) -> Vec<YearBand> {
    let years = (latest - earliest + 1).max(1);
    let segment_width = width / f64::from(years);

    (earliest..=latest)
        .rev()
        .map(|year| {
            let count = histogram.year_count(year);
            YearBand {
                year,
                label: year.to_string(),
                segments: vec![TimelineSegment {
                    key: SegmentKey::Year(year),
                    label: year.to_string(),
                    width: segment_width,
                    fill_percent: None,
                    post_count: count,
                    empty: count == 0,
                    active: false,
                }],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn histogram() -> MonthHistogram {
        MonthHistogram::from_dates([
            date(2014, 2, 10),
            date(2014, 2, 3),
            date(2014, 1, 28),
            date(2013, 11, 15),
            date(2013, 11, 1),
            date(2013, 11, 2),
            date(2013, 11, 20),
        ])
    }

    #[test]
    fn months_cover_the_whole_span_latest_first() {
        let model = TimelineModel::build(Granularity::Months, &histogram(), 400.0);

        let keys: Vec<String> = model.segments().map(|s| s.key.element_id()).collect();
        assert_eq!(keys, vec!["date_2014_2", "date_2014_1", "date_2013_12", "date_2013_11"]);

        assert_eq!(model.bands.len(), 2);
        assert_eq!(model.bands[0].label, "2014");
        assert_eq!(model.bands[1].segments.len(), 2);
        assert!(model.segments().all(|s| (s.width - 100.0).abs() < f64::EPSILON));
    }

    #[test]
    fn month_fill_is_relative_to_busiest_month() {
        let model = TimelineModel::build(Granularity::Months, &histogram(), 400.0);

        let fills: Vec<(Option<u8>, bool)> =
            model.segments().map(|s| (s.fill_percent, s.empty)).collect();
        // 2, 1, 0, 4 posts
        assert_eq!(
            fills,
            vec![(Some(50), false), (Some(25), false), (Some(0), true), (Some(100), false)]
        );
    }

    #[test]
    fn years_have_one_segment_each() {
        let model = TimelineModel::build(Granularity::Years, &histogram(), 300.0);

        let labels: Vec<&str> = model.segments().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["2014", "2013"]);
        assert!(model.segments().all(|s| s.fill_percent.is_none()));
        assert_eq!(model.segment(SegmentKey::Year(2013)).map(|s| s.post_count), Some(4));
        assert!(model.segments().all(|s| (s.width - 150.0).abs() < f64::EPSILON));
    }

    #[test]
    fn set_active_replaces_previous_highlight() {
        let mut model = TimelineModel::build(Granularity::Months, &histogram(), 400.0);
        let jan = SegmentKey::Month(YearMonth::new(2014, 1));
        let nov = SegmentKey::Month(YearMonth::new(2013, 11));

        model.set_active(&BTreeSet::from([jan, nov]));
        assert_eq!(model.active_keys(), vec![jan, nov]);

        model.set_active(&BTreeSet::from([nov]));
        assert_eq!(model.active_keys(), vec![nov]);
    }

    #[test]
    fn no_posts_means_no_segments() {
        let model = TimelineModel::build(Granularity::Months, &MonthHistogram::default(), 400.0);
        assert_eq!(model.segment_count(), 0);
    }
}
