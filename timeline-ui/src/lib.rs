//! Browser widget: packs the post cards, draws the timeline strip into
//! `.dates` and keeps it in sync with scrolling, resizing and clicks.

mod markup;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod packery;
mod styles;
#[cfg(target_arch = "wasm32")]
mod view;

pub use markup::{
    needs_mount, segment_classes, segment_style, segment_title, strip_class, MOUNTED_ATTRIBUTE,
};
pub use styles::DEFAULT_STYLES;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use masonry_timeline_core::{MasonryTimeline, TimelineConfig};
    use masonry_timeline_wasm::read_config;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, Window};

    use crate::dom::DomHost;
    use crate::markup::{needs_mount, MOUNTED_ATTRIBUTE};
    use crate::view::{MasonryTimelineProps, MasonryTimelineView};
    use crate::{logging, styles};

    /// Mount the widget on every element matching `selector` and return how
    /// many new widgets were started. Roots mounted by an earlier call are
    /// skipped.
    ///
    /// `options` is a partial `{ dateFormat, granularity, packery, resizeDebounceMs }`
    /// object; missing keys take their defaults.
    #[wasm_bindgen]
    pub fn mount_masonry_timeline(selector: &str, options: Option<JsValue>) -> Result<u32, JsValue> {
        console_error_panic_hook::set_once();
        logging::init();

        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("cannot access document"))?;

        let matches = document
            .query_selector_all(selector)
            .map_err(|err| JsValue::from_str(&format!("invalid selector: {err:?}")))?;
        if matches.length() == 0 {
            return Err(JsValue::from_str("no element matches selector"));
        }

        if let Err(err) = styles::ensure_styles(&document) {
            console::error_1(&err);
        }

        let config = read_config(options)?;
        let roots = (0..matches.length())
            .filter_map(|i| matches.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok());

        let mut mounted = 0;
        for root in roots {
            if !needs_mount(root.get_attribute(MOUNTED_ATTRIBUTE).as_deref()) {
                tracing::debug!(id = %root.id(), "masonry timeline already mounted");
                continue;
            }
            mount_root(&root, config.clone())?;
            root.set_attribute(MOUNTED_ATTRIBUTE, "")?;
            mounted += 1;
        }
        Ok(mounted)
    }

    fn mount_root(root: &Element, config: TimelineConfig) -> Result<(), JsValue> {
        let resize_debounce_ms = config.resize_debounce_ms;
        let host = DomHost::locate(root, &config.packery.item_selector)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let dates = host.dates_element();

        let widget = MasonryTimeline::new(host, config)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        tracing::info!(
            segments = widget.timeline().segment_count(),
            "mounted masonry timeline"
        );

        yew::Renderer::<MasonryTimelineView>::with_root_and_props(
            dates,
            MasonryTimelineProps {
                widget: Rc::new(RefCell::new(widget)),
                resize_debounce_ms,
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_masonry_timeline;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_masonry_timeline(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<u32, wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "masonry-timeline-ui only supports the wasm32 target",
    ))
}
