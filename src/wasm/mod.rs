//! Browser bindings
//!
//! Compiled only with the `wasm` feature. [`WasmSession`] wraps
//! [`EditorSession`](crate::EditorSession) behind a JSON-string API;
//! [`utils`] carries the panic hook and console plumbing.

pub mod bindings;
pub mod utils;

pub use bindings::WasmSession;
