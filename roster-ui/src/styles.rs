#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-roster-ui]";

/// Default CSS for the patient list along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --roster-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --roster-bg: #f8fafc;
  --roster-card-bg: #ffffff;
  --roster-card-border: rgba(148, 163, 184, 0.28);
  --roster-card-focus: #2563eb;
  --roster-radius: 12px;
  --roster-text: #1f2933;
  --roster-muted: #52606d;
  --roster-heading: #11181c;
  --roster-error: #b42318;
  --roster-error-bg: rgba(180, 35, 24, 0.08);
}

.roster-root {
  font-family: var(--roster-font-family);
  background: var(--roster-bg);
  color: var(--roster-text);
  padding: 24px;
  max-width: 760px;
  margin: 0 auto;
}

.roster-heading {
  font-size: 1.5rem;
  font-weight: 700;
  color: var(--roster-heading);
  margin: 0 0 16px;
}

.roster-loading {
  color: var(--roster-muted);
  font-style: italic;
}

.roster-error {
  color: var(--roster-error);
  background: var(--roster-error-bg);
  border-radius: var(--roster-radius);
  font-weight: 700;
  font-size: 1.25rem;
  padding: 16px 20px;
  margin: 0;
}

.patient-card {
  background: var(--roster-card-bg);
  border: 1px solid var(--roster-card-border);
  border-radius: var(--roster-radius);
  box-shadow: 0 4px 12px rgba(15, 23, 42, 0.08);
  padding: 20px 24px;
  margin-bottom: 16px;
  cursor: pointer;
  transition: box-shadow 0.15s ease;
}

.patient-card:hover {
  box-shadow: 0 8px 20px rgba(15, 23, 42, 0.12);
}

.patient-card:focus-visible {
  outline: 2px solid var(--roster-card-focus);
  outline-offset: 2px;
}

.patient-card[aria-disabled="true"] {
  cursor: default;
}

.patient-line {
  margin: 0 0 8px;
}

.patient-detail {
  border-top: 1px dashed var(--roster-card-border);
  margin-top: 12px;
  padding-top: 12px;
}

.patient-contact {
  margin-top: 16px;
}

.patient-contact p {
  margin: 8px 0 0;
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-roster-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
