//! Public JavaScript API.

pub mod wasm;
