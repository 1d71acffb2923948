//! JavaScript bindings for PDF.js
//!
//! This module declares the slice of the PDF.js API the viewer uses. The
//! host page loads PDF.js itself, which exposes the global `pdfjsLib`
//! object; nothing here parses PDF bytes.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `pdfjsLib.getDocument({ url, disableWorker })`
    #[wasm_bindgen(js_namespace = pdfjsLib, js_name = getDocument, catch)]
    pub fn get_document(params: &JsValue) -> Result<PdfLoadingTask, JsValue>;

    pub type PdfLoadingTask;

    /// Resolves to a `PDFDocumentProxy`.
    #[wasm_bindgen(method, getter)]
    pub fn promise(this: &PdfLoadingTask) -> js_sys::Promise;

    pub type PdfDocumentProxy;

    #[wasm_bindgen(method, getter, js_name = numPages)]
    pub fn num_pages(this: &PdfDocumentProxy) -> u32;

    /// Pages are 1-based. Resolves to a `PDFPageProxy`.
    #[wasm_bindgen(method, js_name = getPage)]
    pub fn get_page(this: &PdfDocumentProxy, page_number: u32) -> js_sys::Promise;

    pub type PdfPageProxy;

    /// `page.getViewport({ scale })`
    #[wasm_bindgen(method, js_name = getViewport)]
    pub fn get_viewport(this: &PdfPageProxy, params: &JsValue) -> PageViewport;

    /// `page.render({ canvasContext, viewport })`
    #[wasm_bindgen(method, catch)]
    pub fn render(this: &PdfPageProxy, params: &JsValue) -> Result<RenderTask, JsValue>;

    /// Resolves to `{ items: [{ str, ... }] }`.
    #[wasm_bindgen(method, js_name = getTextContent)]
    pub fn get_text_content(this: &PdfPageProxy) -> js_sys::Promise;

    pub type PageViewport;

    #[wasm_bindgen(method, getter)]
    pub fn width(this: &PageViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn height(this: &PageViewport) -> f64;

    pub type RenderTask;

    #[wasm_bindgen(method, getter)]
    pub fn promise(this: &RenderTask) -> js_sys::Promise;
}

/// Points `pdfjsLib.GlobalWorkerOptions.workerSrc` at `src`.
pub fn set_worker_src(src: &str) -> Result<(), JsValue> {
    let lib = js_sys::Reflect::get(&js_sys::global(), &"pdfjsLib".into())?;
    if lib.is_undefined() {
        return Err(JsValue::from_str("pdfjsLib is not loaded"));
    }
    let worker_options = js_sys::Reflect::get(&lib, &"GlobalWorkerOptions".into())?;
    js_sys::Reflect::set(&worker_options, &"workerSrc".into(), &src.into())?;
    Ok(())
}
