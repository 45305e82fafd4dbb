//! WASM bindings for the Ribbon token pipeline.
//!
//! Exposes `build()` to JavaScript via wasm-bindgen.
//! Returns a JS object `{ variables, typography, button }` or throws on error.

use indexmap::IndexMap;
use ribbon_codegen::{BuildOutput, ButtonTable};
use ribbon_tokens::{TokenDocument, TokenSet, CATEGORIES};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Build the stylesheets from in-memory token documents.
///
/// `documents` maps a category name (`color`, `typography`, ...) to its token
/// document. `button` optionally overrides the button table; omitted fields
/// keep their defaults. `typography` is `undefined` when there is no styles
/// group. Throws a JS error if a document is malformed.
#[wasm_bindgen]
pub fn build(documents: JsValue, button: Option<JsValue>) -> Result<JsValue, JsError> {
    let documents: IndexMap<String, Value> = serde_wasm_bindgen::from_value(documents)
        .map_err(|e| JsError::new(&format!("Invalid token documents: {e}")))?;
    let table = match button {
        Some(value) if !value.is_undefined() && !value.is_null() => {
            serde_wasm_bindgen::from_value(value)
                .map_err(|e| JsError::new(&format!("Invalid button table: {e}")))?
        }
        _ => ButtonTable::default(),
    };

    let output = build_documents(documents, &table).map_err(|e| JsError::new(&e))?;

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"variables".into(), &output.variables.into())
        .map_err(|_| JsError::new("Failed to set variables property"))?;
    let typography = output.typography.map_or(JsValue::UNDEFINED, JsValue::from);
    js_sys::Reflect::set(&js_obj, &"typography".into(), &typography)
        .map_err(|_| JsError::new("Failed to set typography property"))?;
    js_sys::Reflect::set(&js_obj, &"button".into(), &output.button.into())
        .map_err(|_| JsError::new("Failed to set button property"))?;

    Ok(js_obj.into())
}

/// Get the pipeline version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Known categories in merge order, then any other documents in input order.
fn ordered(mut documents: IndexMap<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::with_capacity(documents.len());
    for category in CATEGORIES {
        if let Some(value) = documents.shift_remove(category) {
            out.push((category.to_string(), value));
        }
    }
    out.extend(documents);
    out
}

fn build_documents(
    documents: IndexMap<String, Value>,
    table: &ButtonTable,
) -> Result<BuildOutput, String> {
    let documents = ordered(documents)
        .iter()
        .map(|(name, value)| TokenDocument::from_value(name, value))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    let transformed = ribbon_transform::transform(TokenSet::new(documents));
    for diagnostic in transformed.diagnostics() {
        warn(&diagnostic.to_string());
    }
    ribbon_codegen::compile(&transformed, table).map_err(|e| e.to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(message: &str);
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    console_warn(message);
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(message: &str) {
    tracing::warn!("{message}");
}
