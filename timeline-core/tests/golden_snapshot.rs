use std::fs;

use masonry_timeline_core::{MasonryTimeline, StaticLayout, TimelineConfig};
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn five_posts_snapshot_matches_golden() {
    let posts = fs::read_to_string(fixture_path("five_posts.json")).expect("cannot read posts fixture");
    let layout = StaticLayout::from_json(&posts)
        .expect("fixture should parse")
        .with_viewport(0.0, 300.0)
        .with_timeline_width(300.0);

    let widget = MasonryTimeline::new(layout, TimelineConfig::default())
        .expect("cannot build widget");
    let actual = serde_json::to_value(widget.snapshot()).expect("cannot serialize snapshot");

    let expected = fs::read_to_string(fixture_path("five_posts_snapshot.json"))
        .expect("cannot read golden snapshot");
    let expected: Value = serde_json::from_str(&expected).expect("golden snapshot is not valid JSON");

    assert_eq!(actual, expected);
}

#[test]
fn malformed_fixture_is_a_parse_error() {
    let err = StaticLayout::from_json("[{\"date\": 3}]").unwrap_err();
    assert!(err.to_string().starts_with("cannot read input"));
}
