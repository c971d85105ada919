use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Error type for JsValue conversions
#[derive(Debug, Error)]
pub enum Error {
    #[error("Serde WASM Bindgen Error: {0}")]
    SerdeWasmBindgen(#[from] serde_wasm_bindgen::Error),
    #[error("value is undefined or null")]
    Missing,
}

/// Serialize a Rust data structure into a plain JS object
pub fn to_value<T: Serialize>(value: &T) -> Result<JsValue, Error> {
    // Plain objects instead of ES Maps, so JS libraries can read the fields
    let serializer = serde_wasm_bindgen::Serializer::new()
        .serialize_maps_as_objects(true)
        .serialize_large_number_types_as_bigints(false);
    value.serialize(&serializer).map_err(Error::from)
}

/// Deserialize a JsValue into a Rust data structure; `undefined`/`null` is an error
pub fn from_value<T: DeserializeOwned>(value: JsValue) -> Result<T, Error> {
    if value.is_undefined() || value.is_null() {
        return Err(Error::Missing);
    }
    serde_wasm_bindgen::from_value(value).map_err(Error::from)
}
