//! # Assembly Module
//!
//! The WASM-exported entry points. The host page loads PDF.js (which defines
//! the global `pdfjsLib`), imports this module and calls `startViewer`:
//!
//! ```javascript
//! import init, { startViewer } from "./pdf_viewer_wasm.js";
//! await init();
//! await startViewer(JSON.stringify({ document_url: "dergi/sayi-1.pdf" }));
//! ```

use crate::logging;
use crate::schema::ViewerOptions;
use crate::viewer;
use wasm_bindgen::prelude::wasm_bindgen;

/// Runs when the module is instantiated.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Warn);
}

/// Opens the configured document and attaches the viewer to the page.
///
/// `options_json` is an optional JSON object with any subset of the viewer
/// options; omitted fields keep their defaults. A load failure is logged and
/// shown in the results area; the returned promise always resolves.
#[wasm_bindgen(js_name = startViewer)]
pub async fn start_viewer(options_json: Option<String>) {
    let options = ViewerOptions::from_json(options_json.as_deref());
    logging::init(options.log_filter());

    match viewer::launch(options).await {
        Ok(session) => log::info!(
            "viewer ready at page {} of {}",
            session.current_page(),
            session.page_count()
        ),
        Err(err) => log::error!("{}", err),
    }
}
