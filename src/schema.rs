//! Data structures and types shared by the viewer.
//!
//! This module defines the error type, the viewer configuration and the
//! user-facing message catalogue.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Errors that can occur while loading or displaying a document.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Fetching or opening the PDF failed.
    #[error("could not load document: {0}")]
    DocumentLoad(String),
    /// pdf.js rejected a render of the given page.
    #[error("render of page {page} failed: {message}")]
    Render { page: u32, message: String },
    /// The page proxy could not be obtained.
    #[error("could not fetch page {page}: {message}")]
    PageFetch { page: u32, message: String },
    /// Text extraction for the page failed or returned an unexpected shape.
    #[error("could not read text of page {page}: {message}")]
    TextContent { page: u32, message: String },
    /// A required DOM element is absent.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// Any other JavaScript exception.
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Renders a thrown JavaScript value as text for error messages.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

/// DOM ids of the elements the viewer attaches to.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ElementIds {
    pub canvas: String,
    pub loading: String,
    pub prev: String,
    pub next: String,
    pub page_input: String,
    pub page_total: String,
    pub zoom_in: String,
    pub zoom_out: String,
    pub zoom_label: String,
    pub search_input: String,
    pub search_button: String,
    pub results: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "pdfCanvas".into(),
            loading: "loading".into(),
            prev: "prevBtn".into(),
            next: "nextBtn".into(),
            page_input: "pageInput".into(),
            page_total: "pageTotal".into(),
            zoom_in: "zoomIn".into(),
            zoom_out: "zoomOut".into(),
            zoom_label: "zoomLabel".into(),
            search_input: "searchInput".into(),
            search_button: "searchBtn".into(),
            results: "results".into(),
        }
    }
}

/// User-facing strings.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Messages {
    pub empty_query: String,
    pub searching: String,
    pub not_found: String,
    pub load_failed: String,
    pub page_label: String,
    pub found_badge: String,
    pub go_to_page: String,
    pub more_results: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty_query: "Aramak için bir şey yaz.".into(),
            searching: "Aranıyor… (PDF uzun ise biraz sürebilir)".into(),
            not_found: "Sonuç bulunamadı.".into(),
            load_failed: "PDF yüklenemedi. Konsolu kontrol et.".into(),
            page_label: "Sayfa".into(),
            found_badge: "Bulundu".into(),
            go_to_page: "Bu sayfaya git".into(),
            more_results: "sonuç daha var.".into(),
        }
    }
}

impl Messages {
    /// Heading of a search result card, e.g. `Sayfa 4`.
    pub fn page_heading(&self, page: u32) -> String {
        format!("{} {}", self.page_label, page)
    }

    /// Trailing note shown when results were cut off.
    pub fn more_note(&self, hidden: usize) -> String {
        format!("+ {} {}", hidden, self.more_results)
    }
}

/// Configuration options for the viewer.
///
/// Every field is optional in JSON; missing fields fall back to the
/// defaults, which describe the stock single-document page:
///
/// ```json
/// { "document_url": "dergi/sayi-2.pdf", "initial_zoom": 1.0 }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ViewerOptions {
    /// Relative URL of the PDF to open.
    pub document_url: String,
    /// Script URL for the pdf.js worker. `None` leaves pdf.js' setting alone.
    pub worker_src: Option<String>,
    pub disable_worker: bool,
    pub initial_zoom: f64,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Lower bound of the container-fit scale, applied before zoom.
    pub min_fit_scale: f64,
    /// Pixels subtracted from the canvas container's width.
    pub container_gutter_px: f64,
    pub max_displayed_results: usize,
    /// Characters of context kept before a search match.
    pub snippet_before: usize,
    /// Characters of context kept after a search match.
    pub snippet_after: usize,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    pub elements: ElementIds,
    pub messages: Messages,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            document_url: "dergi/sayi-1.pdf".into(),
            worker_src: Some(
                "https://cdn.jsdelivr.net/npm/pdfjs-dist@4.4.168/build/pdf.worker.min.js".into(),
            ),
            disable_worker: true,
            initial_zoom: 1.2,
            zoom_step: 0.1,
            min_zoom: 0.6,
            max_zoom: 2.2,
            min_fit_scale: 0.6,
            container_gutter_px: 20.0,
            max_displayed_results: 40,
            snippet_before: 35,
            snippet_after: 60,
            log_level: "warn".into(),
            elements: ElementIds::default(),
            messages: Messages::default(),
        }
    }
}

impl ViewerOptions {
    /// Parses options from an optional JSON string.
    ///
    /// Invalid JSON is logged and replaced by the defaults, so a typo in
    /// the host page never keeps the document from showing.
    pub fn from_json(options_json: Option<&str>) -> Self {
        let Some(raw) = options_json else {
            return Self::default();
        };
        match serde_json::from_str::<ViewerOptions>(raw) {
            Ok(options) => options.normalized(),
            Err(err) => {
                log::warn!("ignoring invalid viewer options: {}", err);
                Self::default()
            }
        }
    }

    /// Swaps an inverted zoom range so that clamping stays well defined.
    fn normalized(mut self) -> Self {
        if self.min_zoom > self.max_zoom {
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        self
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_page() {
        let opts = ViewerOptions::default();
        assert_eq!(opts.document_url, "dergi/sayi-1.pdf");
        assert_eq!(opts.initial_zoom, 1.2);
        assert_eq!((opts.min_zoom, opts.max_zoom), (0.6, 2.2));
        assert_eq!(opts.max_displayed_results, 40);
        assert_eq!((opts.snippet_before, opts.snippet_after), (35, 60));
        assert_eq!(opts.elements.canvas, "pdfCanvas");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let opts = ViewerOptions::from_json(Some(
            r#"{"document_url":"a.pdf","messages":{"not_found":"none"}}"#,
        ));
        assert_eq!(opts.document_url, "a.pdf");
        assert_eq!(opts.messages.not_found, "none");
        assert_eq!(opts.messages.empty_query, "Aramak için bir şey yaz.");
        assert_eq!(opts.zoom_step, 0.1);
    }

    #[test]
    fn invalid_json_falls_back() {
        let opts = ViewerOptions::from_json(Some("{not json"));
        assert_eq!(opts.document_url, "dergi/sayi-1.pdf");
    }

    #[test]
    fn inverted_zoom_range_is_swapped() {
        let opts = ViewerOptions::from_json(Some(r#"{"min_zoom":3.0,"max_zoom":1.0}"#));
        assert_eq!((opts.min_zoom, opts.max_zoom), (1.0, 3.0));
    }

    #[test]
    fn log_level_parsing() {
        let mut opts = ViewerOptions::default();
        assert_eq!(opts.log_filter(), log::LevelFilter::Warn);
        opts.log_level = "debug".into();
        assert_eq!(opts.log_filter(), log::LevelFilter::Debug);
        opts.log_level = "loud".into();
        assert_eq!(opts.log_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn message_formatting() {
        let m = Messages::default();
        assert_eq!(m.page_heading(7), "Sayfa 7");
        assert_eq!(m.more_note(5), "+ 5 sonuç daha var.");
    }
}
