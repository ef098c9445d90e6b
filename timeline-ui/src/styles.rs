#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Node};

#[cfg(target_arch = "wasm32")]
const STYLE_TAG_SELECTOR: &str = "style[data-masonry-timeline]";

/// Default CSS for the widget along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --masonry-timeline-height: 64px;
  --masonry-timeline-bar: rgba(71, 84, 103, 0.45);
  --masonry-timeline-bar-active: #2563eb;
  --masonry-timeline-empty: rgba(148, 163, 184, 0.25);
  --masonry-timeline-label: #52606d;
  --masonry-timeline-font-family: 'Inter', system-ui, -apple-system, sans-serif;
}

.posts-container {
  overflow-x: auto;
  overflow-y: hidden;
  position: relative;
}

.posts {
  position: relative;
  height: 100%;
}

.dates {
  font-family: var(--masonry-timeline-font-family);
}

.dates .timeline-strip {
  display: flex;
  flex-direction: row;
  align-items: flex-end;
}

.dates .year {
  display: flex;
  flex-direction: column;
  border-left: 1px solid var(--masonry-timeline-empty);
}

.dates .year p {
  margin: 4px 0 0 4px;
  font-size: 0.75rem;
  color: var(--masonry-timeline-label);
  font-variant-numeric: tabular-nums;
}

.dates .months {
  display: flex;
  align-items: flex-end;
  height: var(--masonry-timeline-height);
  margin: 0;
  padding: 0;
  list-style: none;
}

.dates .months > li {
  box-sizing: border-box;
  border-right: 1px solid transparent;
  background: var(--masonry-timeline-bar);
  cursor: pointer;
  transition: background 120ms ease-in-out;
}

.dates .timeline-years .months > li {
  height: 100%;
}

.dates .months > li.empty {
  height: 2px;
  background: var(--masonry-timeline-empty);
}

.dates .months > li.active {
  background: var(--masonry-timeline-bar-active);
}
"#;

#[cfg(target_arch = "wasm32")]
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-masonry-timeline", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::DEFAULT_STYLES;

    fn rule(selector: &str) -> &'static str {
        let start = DEFAULT_STYLES
            .find(&format!("\n{selector} {{"))
            .unwrap_or_else(|| panic!("no rule for {selector}"));
        let body = &DEFAULT_STYLES[start..];
        &body[..body.find('}').unwrap()]
    }

    #[test]
    fn year_bands_sit_side_by_side() {
        let strip = rule(".dates .timeline-strip");
        assert!(strip.contains("display: flex;"));
        assert!(strip.contains("flex-direction: row;"));
    }

    #[test]
    fn bands_stack_label_under_months() {
        assert!(rule(".dates .year").contains("flex-direction: column;"));
    }
}
