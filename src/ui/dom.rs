//! Thin DOM construction helpers.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub fn el(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = doc.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

pub fn text_el(doc: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let element = el(doc, tag, class)?;
    element.set_text_content(Some(text));
    Ok(element)
}

/// `<button type="button" data-action=...>`; clicks are routed by the
/// delegated handler on the game container.
pub fn action_button(
    doc: &Document,
    class: &str,
    action: &str,
    label: &str,
) -> Result<Element, JsValue> {
    let button = text_el(doc, "button", class, label)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-action", action)?;
    Ok(button)
}

/// `<dl>` with one dt/dd per entry.
pub fn definition_list(
    doc: &Document,
    class: &str,
    entries: &[(&str, &Element)],
) -> Result<Element, JsValue> {
    let dl = el(doc, "dl", class)?;
    for (key, value) in entries {
        dl.append_child(text_el(doc, "dt", "", key)?.as_ref())?;
        let dd = el(doc, "dd", "")?;
        dd.append_child(value)?;
        dl.append_child(&dd)?;
    }
    Ok(dl)
}

pub fn replace_children(parent: &Element, children: &[&Element]) -> Result<(), JsValue> {
    parent.set_text_content(None);
    for child in children {
        parent.append_child(child)?;
    }
    Ok(())
}
