//! Support glue for the browser build

use wasm_bindgen::prelude::*;

/// Install the panic-to-console hook
///
/// [`WasmSession::new`](crate::wasm::WasmSession::new) installs it on first
/// construction; the export lets embedders that never build a session
/// install it at module start instead. Safe to call repeatedly.
#[wasm_bindgen(js_name = initPanicHook)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// `console.log` with `format!` arguments, for ad-hoc debugging of the
/// browser build
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::wasm::utils::log(&format_args!($($t)*).to_string())
    }
}
