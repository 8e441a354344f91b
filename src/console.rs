//! Logging facade.
//!
//! On wasm32 messages go to the browser console. Elsewhere (unit tests,
//! native builds) they go to stderr, since calling wasm imports off-wasm panics.

const PREFIX: &str = "MAY COIN";

pub fn info(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{PREFIX}: {msg}");
}

pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{PREFIX} [warn]: {msg}");
}
