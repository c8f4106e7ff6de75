//! Small DOM helpers shared by the component bindings.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, NodeList, Window};

use shakes_site_core::{Result, SiteError};

/// Attach context to a `JsValue` error coming out of a DOM call.
pub trait JsResultExt<T> {
    fn js_context(self, context: &'static str) -> Result<T>;
}

impl<T> JsResultExt<T> for std::result::Result<T, JsValue> {
    fn js_context(self, context: &'static str) -> Result<T> {
        self.map_err(|err| SiteError::Js {
            context,
            message: describe(&err),
        })
    }
}

/// Best-effort human readable text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document> {
    window.document().ok_or(SiteError::NoDocument)
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Every element in the document matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .js_context("querying document")?;
    Ok(elements(&list))
}

/// Every descendant of `root` matching `selector`.
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let list = root
        .query_selector_all(selector)
        .js_context("querying element")?;
    Ok(elements(&list))
}

/// Add or remove `class` on `element`. Failures are logged and dropped.
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!(class, error = %describe(&err), "failed to update class");
    }
}
