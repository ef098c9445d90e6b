//! Sample cards for trying the timeline without a browser.

use chrono::{Duration, NaiveDate};
use masonry_timeline_core::{DateFormat, MeasuredPost};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Card sizes of the demo page and their widths in pixels.
const SIZES: [(&str, f64); 4] = [
    ("small", 100.0),
    ("big", 320.0),
    ("medium-wide", 210.0),
    ("medium", 150.0),
];

/// `count` posts, newest first, each 1 to 27 days older than the previous
/// one, laid out left to right in a single row.
pub fn generate(
    count: usize,
    seed: u64,
    start: NaiveDate,
    format: &DateFormat,
    gutter: f64,
) -> Vec<MeasuredPost> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut date = start;
    let mut left = 0.0;

    (0..count)
        .map(|_| {
            date -= Duration::days(rng.gen_range(1..28));
            let (_, width) = SIZES[rng.gen_range(0..SIZES.len())];
            let post = MeasuredPost {
                date: format.format_date(date),
                left,
                width,
            };
            left += width + gutter;
            post
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_posts() {
        let start = NaiveDate::from_ymd_opt(2014, 3, 1).unwrap();
        let format = DateFormat::default();
        assert_eq!(
            generate(20, 7, start, &format, 10.0),
            generate(20, 7, start, &format, 10.0)
        );
    }

    #[test]
    fn posts_get_older_and_never_overlap() {
        let start = NaiveDate::from_ymd_opt(2014, 3, 1).unwrap();
        let format = DateFormat::default();
        let posts = generate(30, 1, start, &format, 10.0);

        let dates: Vec<NaiveDate> = posts
            .iter()
            .map(|post| format.parse_date(&post.date).unwrap())
            .collect();
        assert!(dates.windows(2).all(|pair| pair[0] > pair[1]));
        assert!(dates[0] < start);
        assert!(posts
            .windows(2)
            .all(|pair| pair[0].left + pair[0].width + 10.0 == pair[1].left));
    }

    #[test]
    fn consecutive_posts_are_one_to_twenty_seven_days_apart() {
        let start = NaiveDate::from_ymd_opt(2014, 3, 1).unwrap();
        let format = DateFormat::default();
        let posts = generate(200, 3, start, &format, 10.0);

        let mut previous = start;
        for post in &posts {
            let date = format.parse_date(&post.date).unwrap();
            let gap = (previous - date).num_days();
            assert!((1..=27).contains(&gap), "gap of {gap} days");
            previous = date;
        }
    }
}
