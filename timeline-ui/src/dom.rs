#![cfg(target_arch = "wasm32")]

use masonry_timeline_core::{LayoutHost, PackeryOptions, PostGeometry, TimelineError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement};

use crate::packery::Packery;

const POSTS_CONTAINER: &str = ".posts-container";
const POSTS: &str = ".posts";
const DATES: &str = ".dates";
const DATE_ATTRIBUTE: &str = "data-date";

/// The widget's markup:
///
/// ```html
/// <div>
///   <div class="posts-container">
///     <div class="posts"><div class="post" data-date="11.01.1980">…</div></div>
///   </div>
///   <div class="dates-container"><div class="dates"></div></div>
/// </div>
/// ```
pub struct DomHost {
    posts_container: HtmlElement,
    posts: Element,
    dates: HtmlElement,
    items: Vec<HtmlElement>,
    packery: Option<Packery>,
}

impl DomHost {
    /// Find the required children of `root`. Post cards are the children of
    /// `.posts` matching `item_selector`.
    pub fn locate(root: &Element, item_selector: &str) -> Result<Self, TimelineError> {
        let posts_container: HtmlElement = require(root, POSTS_CONTAINER)?;
        let posts: Element = require(root, POSTS)?;
        let dates: HtmlElement = require(root, DATES)?;

        let list = posts
            .query_selector_all(item_selector)
            .map_err(|err| TimelineError::Other(format!("invalid item selector: {err:?}")))?;
        let items: Vec<HtmlElement> = (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .filter(|item| item.has_attribute(DATE_ATTRIBUTE))
            .collect();

        tracing::debug!(posts = items.len(), "located widget markup");

        Ok(Self {
            posts_container,
            posts,
            dates,
            items,
            packery: None,
        })
    }

    pub fn dates_element(&self) -> Element {
        self.dates.clone().into()
    }

    pub fn scroll_target(&self) -> EventTarget {
        self.posts_container.clone().into()
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        if let Some(packery) = self.packery.take() {
            packery.destroy();
        }
    }
}

impl LayoutHost for DomHost {
    fn post_dates(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.get_attribute(DATE_ATTRIBUTE).unwrap_or_default())
            .collect()
    }

    fn pack(&mut self, options: &PackeryOptions) {
        if let Some(packery) = &self.packery {
            packery.layout();
            return;
        }
        match Packery::attach(&self.posts, options) {
            Ok(packery) => self.packery = Some(packery),
            Err(err) => tracing::error!(error = ?err, "Packery is not available, using the markup as laid out"),
        }
    }

    fn measure_posts(&self) -> Vec<PostGeometry> {
        self.items
            .iter()
            .map(|item| PostGeometry {
                left: f64::from(item.offset_left()),
                width: f64::from(item.offset_width()),
            })
            .collect()
    }

    fn scroll_left(&self) -> f64 {
        f64::from(self.posts_container.scroll_left())
    }

    fn set_scroll_left(&mut self, left: f64) {
        self.posts_container.set_scroll_left(left.round() as i32);
    }

    fn viewport_width(&self) -> f64 {
        let viewport = self
            .posts_container
            .parent_element()
            .unwrap_or_else(|| self.posts_container.clone().into());
        f64::from(viewport.client_width())
    }

    fn timeline_width(&self) -> f64 {
        f64::from(self.dates.client_width())
    }
}

fn require<T: JsCast>(root: &Element, selector: &str) -> Result<T, TimelineError> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| TimelineError::MissingElement(selector.to_string()))
}

/// A DOM listener removed again when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
