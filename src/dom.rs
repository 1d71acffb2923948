//! DOM elements the viewer reads from and writes to.
//!
//! Only the canvas is required. Any other element may be missing from the
//! host page, in which case the behaviour tied to it is skipped.

use crate::schema::{describe_js, ElementIds, Messages, ViewerError};
use crate::search::SearchResults;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, HtmlInputElement,
};

pub struct ViewerElements {
    document: Document,
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
    pub loading: Option<HtmlElement>,
    pub prev: Option<Element>,
    pub next: Option<Element>,
    pub page_input: Option<HtmlInputElement>,
    pub page_total: Option<Element>,
    pub zoom_in: Option<Element>,
    pub zoom_out: Option<Element>,
    pub zoom_label: Option<Element>,
    pub search_input: Option<HtmlInputElement>,
    pub search_button: Option<Element>,
    pub results: Option<Element>,
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    match document.get_element_by_id(id) {
        Some(el) => match el.dyn_into::<T>() {
            Ok(typed) => Some(typed),
            Err(_) => {
                log::warn!("#{} has an unexpected element type; ignoring it", id);
                None
            }
        },
        None => {
            log::warn!("#{} not found; related controls are disabled", id);
            None
        }
    }
}

impl ViewerElements {
    pub fn locate(document: &Document, ids: &ElementIds) -> Result<Self, ViewerError> {
        let canvas = document
            .get_element_by_id(&ids.canvas)
            .ok_or_else(|| ViewerError::MissingElement(format!("#{}", ids.canvas)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ViewerError::MissingElement(format!("#{} is not a canvas", ids.canvas)))?;
        let context = canvas
            .get_context("2d")
            .map_err(|e| ViewerError::Js(describe_js(&e)))?
            .ok_or_else(|| ViewerError::MissingElement("2d canvas context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewerError::MissingElement("2d canvas context".into()))?;

        Ok(Self {
            document: document.clone(),
            canvas,
            context,
            loading: optional(document, &ids.loading),
            prev: optional(document, &ids.prev),
            next: optional(document, &ids.next),
            page_input: optional(document, &ids.page_input),
            page_total: optional(document, &ids.page_total),
            zoom_in: optional(document, &ids.zoom_in),
            zoom_out: optional(document, &ids.zoom_out),
            zoom_label: optional(document, &ids.zoom_label),
            search_input: optional(document, &ids.search_input),
            search_button: optional(document, &ids.search_button),
            results: optional(document, &ids.results),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn set_loading(&self, on: bool) {
        let Some(loading) = &self.loading else {
            return;
        };
        let display = if on { "flex" } else { "none" };
        if let Err(e) = loading.style().set_property("display", display) {
            log::warn!("could not toggle loading indicator: {}", describe_js(&e));
        }
    }

    /// Width of the canvas' parent, or 0 when detached.
    pub fn container_width(&self) -> f64 {
        self.canvas
            .parent_element()
            .map_or(0.0, |parent| f64::from(parent.client_width()))
    }

    pub fn resize_canvas(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn show_total(&self, page_count: u32) {
        if let Some(total) = &self.page_total {
            total.set_text_content(Some(&format!("/ {}", page_count)));
        }
    }

    /// Updates the page field, page total and zoom label after a render.
    pub fn show_page_status(&self, page: u32, page_count: u32, zoom_label: &str) {
        if let Some(input) = &self.page_input {
            input.set_value(&page.to_string());
        }
        self.show_total(page_count);
        if let Some(label) = &self.zoom_label {
            label.set_text_content(Some(zoom_label));
        }
    }

    pub fn search_query(&self) -> String {
        self.search_input
            .as_ref()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    pub fn page_input_value(&self) -> Option<String> {
        self.page_input.as_ref().map(HtmlInputElement::value)
    }

    /// Replaces the results area with a plain text message.
    pub fn show_message(&self, message: &str) {
        if let Some(results) = &self.results {
            results.set_text_content(Some(message));
        }
    }

    fn element(&self, tag: &str, class: &str, text: Option<&str>) -> Result<Element, ViewerError> {
        let el = self
            .document
            .create_element(tag)
            .map_err(|e| ViewerError::Js(describe_js(&e)))?;
        el.set_class_name(class);
        if text.is_some() {
            el.set_text_content(text);
        }
        Ok(el)
    }

    fn append(parent: &Element, child: &Element) -> Result<(), ViewerError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| ViewerError::Js(describe_js(&e)))
    }

    /// Renders the first `limit` hits as result cards.
    ///
    /// Each card's button carries `data-go`, so clicks go through the same
    /// delegated handler as the page's quick-jump controls.
    pub fn render_results(
        &self,
        results: &SearchResults,
        limit: usize,
        messages: &Messages,
    ) -> Result<(), ViewerError> {
        let Some(container) = &self.results else {
            return Ok(());
        };
        container.set_text_content(None);

        for hit in results.displayed(limit) {
            let card = self.element("div", "result", None)?;

            let top = self.element("div", "r-top", None)?;
            let heading = messages.page_heading(hit.page);
            Self::append(&top, &self.element("div", "r-page", Some(&heading))?)?;
            Self::append(&top, &self.element("span", "badge", Some(&messages.found_badge))?)?;
            Self::append(&card, &top)?;

            let snippet = format!("{}…", hit.snippet);
            Self::append(&card, &self.element("div", "muted tiny", Some(&snippet))?)?;

            let button = self.element("button", "btn ghost", Some(&messages.go_to_page))?;
            let js_err = |e: wasm_bindgen::JsValue| ViewerError::Js(describe_js(&e));
            button.set_attribute("type", "button").map_err(js_err)?;
            button
                .set_attribute("data-go", &hit.page.to_string())
                .map_err(js_err)?;
            Self::append(&card, &button)?;

            Self::append(container, &card)?;
        }

        let hidden = results.hidden(limit);
        if hidden > 0 {
            let note = messages.more_note(hidden);
            Self::append(container, &self.element("div", "muted tiny", Some(&note))?)?;
        }
        Ok(())
    }
}
