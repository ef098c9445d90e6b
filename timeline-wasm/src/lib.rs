//! Framework-neutral WASM <-> JavaScript bridge.
//!
//! JavaScript measures the cards itself and passes `[{ date, left, width }]`;
//! the bridge answers with the timeline layout, the active segments or the
//! scroll offset for a segment click.

use masonry_timeline_core::{
    Granularity, MasonryTimeline, MeasuredPost, PackeryOptions, SegmentKey, StaticLayout,
    TimelineConfig, TimelineError, TimelineModel,
};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Partial options object as written on the JavaScript side.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsTimelineConfig {
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub granularity: Option<Granularity>,
    #[serde(default)]
    pub packery: Option<JsPackeryOptions>,
    #[serde(default)]
    pub resize_debounce_ms: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsPackeryOptions {
    #[serde(default)]
    pub item_selector: Option<String>,
    #[serde(default)]
    pub is_horizontal: Option<bool>,
    #[serde(default)]
    pub gutter: Option<f64>,
    #[serde(default)]
    pub row_height: Option<f64>,
}

impl From<JsTimelineConfig> for TimelineConfig {
    fn from(cfg: JsTimelineConfig) -> Self {
        let mut base = TimelineConfig::default();
        if let Some(format) = cfg.date_format {
            base.date_format = format;
        }
        if let Some(granularity) = cfg.granularity {
            base.granularity = granularity;
        }
        if let Some(packery) = cfg.packery {
            base.packery = packery.merged_into(base.packery);
        }
        if let Some(delay) = cfg.resize_debounce_ms {
            base.resize_debounce_ms = delay;
        }
        base
    }
}

impl JsPackeryOptions {
    fn merged_into(self, mut base: PackeryOptions) -> PackeryOptions {
        if let Some(selector) = self.item_selector {
            base.item_selector = selector;
        }
        if let Some(horizontal) = self.is_horizontal {
            base.is_horizontal = horizontal;
        }
        if let Some(gutter) = self.gutter {
            base.gutter = gutter;
        }
        if let Some(row_height) = self.row_height {
            base.row_height = row_height;
        }
        base
    }
}

/// Read an optional JavaScript options object, falling back to defaults.
pub fn read_config(config: Option<JsValue>) -> Result<TimelineConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsTimelineConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("cannot read config: {err}")))?;
            Ok(TimelineConfig::from(cfg))
        }
        _ => Ok(TimelineConfig::default()),
    }
}

pub fn timeline_for(
    posts: Vec<MeasuredPost>,
    timeline_width: f64,
    config: TimelineConfig,
) -> Result<TimelineModel, TimelineError> {
    let layout = StaticLayout::new(posts).with_timeline_width(timeline_width);
    let widget = MasonryTimeline::new(layout, config)?;
    Ok(widget.timeline().clone())
}

pub fn active_segments_for(
    posts: Vec<MeasuredPost>,
    scroll_left: f64,
    viewport_width: f64,
    config: TimelineConfig,
) -> Result<Vec<SegmentKey>, TimelineError> {
    let layout = StaticLayout::new(posts).with_viewport(scroll_left, viewport_width);
    let widget = MasonryTimeline::new(layout, config)?;
    Ok(widget.snapshot().active)
}

pub fn jump_offset_for(
    posts: Vec<MeasuredPost>,
    key: SegmentKey,
    config: TimelineConfig,
) -> Result<Option<f64>, TimelineError> {
    let mut widget = MasonryTimeline::new(StaticLayout::new(posts), config)?;
    Ok(widget.jump_to(key))
}

#[wasm_bindgen]
pub fn build_timeline(
    posts: JsValue,
    timeline_width: f64,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let posts = read_posts(posts)?;
    let model = timeline_for(posts, timeline_width, read_config(config)?)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&model).map_err(|err| JsValue::from_str(&format!("cannot serialize timeline: {err}")))
}

#[wasm_bindgen]
pub fn visible_segments(
    posts: JsValue,
    scroll_left: f64,
    viewport_width: f64,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    let posts = read_posts(posts)?;
    let active = active_segments_for(posts, scroll_left, viewport_width, read_config(config)?)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&active).map_err(|err| JsValue::from_str(&format!("cannot serialize segments: {err}")))
}

/// Scroll offset for a click on the segment `key`, or `undefined` when no
/// post falls into it.
#[wasm_bindgen]
pub fn jump_offset(
    posts: JsValue,
    key: JsValue,
    config: Option<JsValue>,
) -> Result<Option<f64>, JsValue> {
    let posts = read_posts(posts)?;
    let key: SegmentKey = from_value(key)
        .map_err(|err| JsValue::from_str(&format!("cannot read segment key: {err}")))?;

    jump_offset_for(posts, key, read_config(config)?)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))
}

fn read_posts(posts: JsValue) -> Result<Vec<MeasuredPost>, JsValue> {
    from_value(posts).map_err(|err| JsValue::from_str(&format!("cannot read posts: {err}")))
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}
