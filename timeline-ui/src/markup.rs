//! Attribute helpers shared by the strip components.

use masonry_timeline_core::{Granularity, TimelineSegment};

/// Set on a root element once a widget has been started on it.
pub const MOUNTED_ATTRIBUTE: &str = "data-masonry-timeline-mounted";

/// Whether a root still needs a widget, given its [`MOUNTED_ATTRIBUTE`] value.
/// Any value, including an empty one, counts as mounted.
pub fn needs_mount(marker: Option<&str>) -> bool {
    marker.is_none()
}

/// Inline style of one segment: its width, plus the bar height for
/// non-empty months.
pub fn segment_style(segment: &TimelineSegment) -> String {
    let mut style = format!("width: {:.3}px;", segment.width);
    if let Some(fill) = segment.fill_percent.filter(|fill| *fill > 0) {
        style.push_str(&format!(" height: {fill}%;"));
    }
    style
}

pub fn segment_classes(segment: &TimelineSegment) -> Vec<&'static str> {
    let mut classes = Vec::with_capacity(2);
    if segment.active {
        classes.push("active");
    }
    if segment.empty {
        classes.push("empty");
    }
    classes
}

pub fn strip_class(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Months => "timeline-months",
        Granularity::Years => "timeline-years",
    }
}

/// Hover text, e.g. `Feb 2014 · 3 posts`.
pub fn segment_title(segment: &TimelineSegment, year_label: &str) -> String {
    let posts = match segment.post_count {
        1 => "1 post".to_string(),
        n => format!("{n} posts"),
    };
    if segment.label == year_label {
        format!("{year_label} · {posts}")
    } else {
        format!("{} {year_label} · {posts}", segment.label)
    }
}

#[cfg(test)]
mod tests {
    use masonry_timeline_core::{SegmentKey, YearMonth};

    use super::*;

    fn segment(fill: Option<u8>, count: usize, active: bool) -> TimelineSegment {
        TimelineSegment {
            key: SegmentKey::Month(YearMonth::new(2014, 2)),
            label: "Feb".to_string(),
            width: 33.3333,
            fill_percent: fill,
            post_count: count,
            empty: count == 0,
            active,
        }
    }

    #[test]
    fn empty_month_has_no_height() {
        let empty = segment(Some(0), 0, false);
        assert_eq!(segment_style(&empty), "width: 33.333px;");
        assert_eq!(segment_classes(&empty), vec!["empty"]);
    }

    #[test]
    fn filled_month_carries_height_and_highlight() {
        let busy = segment(Some(75), 3, true);
        assert_eq!(segment_style(&busy), "width: 33.333px; height: 75%;");
        assert_eq!(segment_classes(&busy), vec!["active"]);
        assert_eq!(segment_title(&busy, "2014"), "Feb 2014 · 3 posts");
    }

    #[test]
    fn marked_roots_are_not_mounted_twice() {
        assert!(needs_mount(None));
        assert!(!needs_mount(Some("")));
        assert!(!needs_mount(Some("1")));
    }

    #[test]
    fn year_title_is_not_repeated() {
        let mut year = segment(None, 1, false);
        year.key = SegmentKey::Year(2014);
        year.label = "2014".to_string();
        assert_eq!(segment_title(&year, "2014"), "2014 · 1 post");
    }
}
