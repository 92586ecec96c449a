#![forbid(unsafe_code)]

//! Browser binding for the folio portfolio page.
//!
//! This crate exports [`boot`] through `wasm-bindgen`. The page loads the
//! generated module and calls it once; from then on every listener, the
//! intersection observer and the toast timers live inside the module and
//! forward into a `folio_core::PageController` over real DOM elements.
//!
//! ```text
//! <script type="module">
//!   import init, { boot } from "./folio_web.js";
//!   await init();
//!   boot();                                   // stock markup
//!   // boot('{"scroll_lookahead_px": 120}');  // or with overrides
//! </script>
//! ```
//!
//! Pieces with no JS types (option parsing, console line buffering) are
//! compiled everywhere so native tests cover them.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::boot;

// Used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod log_sink;
#[cfg(any(target_arch = "wasm32", test))]
mod options;
