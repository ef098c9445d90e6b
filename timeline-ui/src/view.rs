#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use masonry_timeline_core::{
    MasonryTimeline, SegmentKey, TimelineModel, TimelineSegment, WidgetSnapshot, YearBand,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Window};
use yew::prelude::*;

use crate::dom::{DomHost, EventListener};
use crate::markup;

pub type SharedWidget = Rc<RefCell<MasonryTimeline<DomHost>>>;

#[derive(Properties, Clone)]
pub struct MasonryTimelineProps {
    pub widget: SharedWidget,
    pub resize_debounce_ms: u32,
}

impl PartialEq for MasonryTimelineProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.widget, &other.widget)
            && self.resize_debounce_ms == other.resize_debounce_ms
    }
}

/// Renders the strip into `.dates` and keeps it in sync with the post
/// container for as long as the component lives.
#[function_component(MasonryTimelineView)]
pub fn masonry_timeline_view(props: &MasonryTimelineProps) -> Html {
    let snapshot = use_state(|| props.widget.borrow().snapshot());

    {
        let widget = props.widget.clone();
        let snapshot = snapshot.clone();
        let delay = props.resize_debounce_ms;
        use_effect_with((), move |_| {
            let wiring = Wiring::attach(widget, snapshot, delay);
            if let Err(err) = &wiring {
                console::error_1(err);
            }
            move || drop(wiring)
        });
    }

    let on_select = {
        let widget = props.widget.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |key: SegmentKey| {
            let mut widget = widget.borrow_mut();
            if widget.jump_to(key).is_some() {
                widget.on_scroll();
                snapshot.set(widget.snapshot());
            }
        })
    };

    html! {
        <TimelineStrip timeline={snapshot.timeline.clone()} {on_select} />
    }
}

#[derive(Properties, PartialEq)]
pub struct TimelineStripProps {
    pub timeline: TimelineModel,
    pub on_select: Callback<SegmentKey>,
}

#[function_component(TimelineStrip)]
fn timeline_strip(props: &TimelineStripProps) -> Html {
    let class = markup::strip_class(props.timeline.granularity);
    html! {
        <div class={classes!("timeline-strip", class)}>
            { for props.timeline.bands.iter().map(|band| render_band(band, &props.on_select)) }
        </div>
    }
}

fn render_band(band: &YearBand, on_select: &Callback<SegmentKey>) -> Html {
    html! {
        <div class="year" key={band.label.clone()}>
            <ul class="months">
                { for band.segments.iter().map(|segment| render_segment(segment, &band.label, on_select)) }
            </ul>
            <p>{ band.label.clone() }</p>
        </div>
    }
}

fn render_segment(
    segment: &TimelineSegment,
    year_label: &str,
    on_select: &Callback<SegmentKey>,
) -> Html {
    let key = segment.key;
    let onclick = on_select.reform(move |_: MouseEvent| key);
    let class: Classes = markup::segment_classes(segment).into_iter().collect();

    html! {
        <li
            key={key.element_id()}
            id={key.element_id()}
            class={class}
            style={markup::segment_style(segment)}
            title={markup::segment_title(segment, year_label)}
            onclick={onclick}
        />
    }
}

/// Scroll and resize listeners, torn down with the component.
struct Wiring {
    _scroll: EventListener,
    _resize: EventListener,
    _debounce: Rc<Debounce>,
}

impl Wiring {
    fn attach(
        widget: SharedWidget,
        snapshot: UseStateHandle<WidgetSnapshot>,
        delay_ms: u32,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let scroll_target = widget.borrow().host().scroll_target();

        let scroll = {
            let widget = widget.clone();
            let snapshot = snapshot.clone();
            EventListener::new(&scroll_target, "scroll", move |_| {
                let mut widget = widget.borrow_mut();
                widget.on_scroll();
                snapshot.set(widget.snapshot());
            })?
        };

        let debounce = Rc::new(Debounce::new(window.clone(), delay_ms, move || {
            let mut widget = widget.borrow_mut();
            widget.on_resize();
            snapshot.set(widget.snapshot());
        }));

        let resize = {
            let debounce = debounce.clone();
            EventListener::new(&window, "resize", move |_| debounce.trigger())?
        };

        Ok(Self {
            _scroll: scroll,
            _resize: resize,
            _debounce: debounce,
        })
    }
}

/// Runs `action` once events stop arriving for `delay_ms`. A zero delay runs
/// it synchronously on every event.
struct Debounce {
    window: Window,
    delay_ms: i32,
    pending: Rc<Cell<Option<i32>>>,
    action: Rc<dyn Fn()>,
    timer: Closure<dyn FnMut()>,
}

impl Debounce {
    fn new(window: Window, delay_ms: u32, action: impl Fn() + 'static) -> Self {
        let action: Rc<dyn Fn()> = Rc::new(action);
        let pending = Rc::new(Cell::new(None));
        let timer = {
            let action = action.clone();
            let pending = pending.clone();
            Closure::<dyn FnMut()>::new(move || {
                pending.set(None);
                action();
            })
        };

        Self {
            window,
            delay_ms: i32::try_from(delay_ms).unwrap_or(i32::MAX),
            pending,
            action,
            timer,
        }
    }

    fn trigger(&self) {
        if self.delay_ms == 0 {
            (self.action)();
            return;
        }

        if let Some(handle) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.timer.as_ref().unchecked_ref(),
                self.delay_ms,
            ) {
            Ok(handle) => self.pending.set(Some(handle)),
            Err(err) => console::error_1(&err),
        }
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
