// Logging and URL helpers shared by the session, sync loop and components

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", msg);
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warn: {}", msg);
}

/// Match id from a page URL: the digits right after the first `?id=` that has any.
/// Missing or unparsable ids give 0.
pub fn parse_match_id(href: &str) -> u64 {
    for (pos, marker) in href.match_indices("?id=") {
        let rest = &href[pos + marker.len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end > 0 {
            return rest[..end].parse().unwrap_or(0);
        }
    }
    0
}

/// Reads `window.location.href`, if there is a window.
pub fn current_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}
