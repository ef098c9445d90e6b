use crate::index::Post;

/// Posts whose horizontal center lies within
/// `[scroll_left, scroll_left + viewport_width]`.
///
/// `posts` must be sorted by left offset. The scan stops once a card starts
/// past the right edge: every later card starts even further right, so its
/// center cannot be in view either.
pub fn visible_posts(posts: &[Post], scroll_left: f64, viewport_width: f64) -> Vec<&Post> {
    let right = scroll_left + viewport_width;
    let mut visible = Vec::new();

    for post in posts {
        if post.left > right {
            break;
        }
        let center = post.center();
        if center >= scroll_left && center <= right {
            visible.push(post);
        }
    }

    visible
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn post(left: f64, width: f64) -> Post {
        Post {
            date: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
            left,
            width,
            dom_index: 0,
        }
    }

    #[test]
    fn selects_posts_by_center() {
        let posts = [post(0.0, 100.0), post(110.0, 100.0), post(220.0, 100.0), post(330.0, 100.0)];

        // centers: 50, 160, 270, 380
        let visible = visible_posts(&posts, 100.0, 200.0);
        let lefts: Vec<f64> = visible.iter().map(|p| p.left).collect();
        assert_eq!(lefts, vec![110.0, 220.0]);
    }

    #[test]
    fn range_edges_are_inclusive() {
        let posts = [post(0.0, 100.0), post(100.0, 100.0)];

        // centers 50 and 150 sit exactly on the edges
        assert_eq!(visible_posts(&posts, 50.0, 100.0).len(), 2);
    }

    #[test]
    fn wide_card_does_not_hide_later_cards() {
        // first card starts in view but its center is past the right edge
        let posts = [post(0.0, 1000.0), post(20.0, 40.0)];
        let visible = visible_posts(&posts, 0.0, 300.0);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].left, 20.0);
    }

    #[test]
    fn empty_when_nothing_in_view() {
        let posts = [post(0.0, 10.0), post(20.0, 10.0)];
        assert!(visible_posts(&posts, 500.0, 100.0).is_empty());
        assert!(visible_posts(&[], 0.0, 100.0).is_empty());
    }
}
