#![cfg(target_arch = "wasm32")]

use masonry_timeline_core::PackeryOptions;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    /// The global `Packery` constructor loaded by the page.
    pub type Packery;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &Element, options: &JsValue) -> Result<Packery, JsValue>;

    #[wasm_bindgen(method)]
    pub fn layout(this: &Packery);

    #[wasm_bindgen(method)]
    pub fn destroy(this: &Packery);
}

impl Packery {
    /// Pack the children of `container` matching `options.item_selector`.
    pub fn attach(container: &Element, options: &PackeryOptions) -> Result<Packery, JsValue> {
        let options = serde_wasm_bindgen::to_value(options)?;
        Packery::new(container, &options)
    }
}
