//! # Document Loader
//!
//! Safe wrappers over the PDF.js proxies. A [`PdfDocument`] is opened once
//! per session and never mutated afterwards; pages are fetched on demand.

use crate::pdfjs_bindings::{self, PdfDocumentProxy, PdfPageProxy, PageViewport};
use crate::schema::{describe_js, ViewerError, ViewerOptions};
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::CanvasRenderingContext2d;

/// Width and height of a page viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// Integral canvas dimensions for this viewport.
    pub fn canvas_pixels(&self) -> (u32, u32) {
        (floor_px(self.width), floor_px(self.height))
    }
}

fn floor_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentParams<'a> {
    url: &'a str,
    disable_worker: bool,
}

#[derive(Serialize)]
struct ViewportParams {
    scale: f64,
}

/// One element of `getTextContent().items`. Marked-content entries carry
/// no `str` and count as empty text.
#[derive(Deserialize, Debug, Default)]
struct TextItem {
    #[serde(default, rename = "str")]
    text: String,
}

#[derive(Deserialize, Debug, Default)]
struct TextContent {
    #[serde(default)]
    items: Vec<TextItem>,
}

/// Joins text fragments with single spaces, the same way the page text is
/// presented to search.
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, fragment) in fragments.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(fragment.as_ref());
    }
    out
}

/// A loaded PDF.
pub struct PdfDocument {
    proxy: PdfDocumentProxy,
    page_count: u32,
}

impl PdfDocument {
    /// Fetches and opens `options.document_url`.
    pub async fn open(options: &ViewerOptions) -> Result<Self, ViewerError> {
        if let Some(src) = options.worker_src.as_deref() {
            pdfjs_bindings::set_worker_src(src)
                .map_err(|e| ViewerError::DocumentLoad(describe_js(&e)))?;
        }

        let params = serde_wasm_bindgen::to_value(&DocumentParams {
            url: &options.document_url,
            disable_worker: options.disable_worker,
        })
        .map_err(|e| ViewerError::DocumentLoad(e.to_string()))?;

        let task = pdfjs_bindings::get_document(&params)
            .map_err(|e| ViewerError::DocumentLoad(describe_js(&e)))?;
        let proxy: PdfDocumentProxy = JsFuture::from(task.promise())
            .await
            .map_err(|e| ViewerError::DocumentLoad(describe_js(&e)))?
            .unchecked_into();

        let page_count = proxy.num_pages();
        log::info!("opened {} ({} pages)", options.document_url, page_count);
        Ok(Self { proxy, page_count })
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Fetches page `number` (1-based).
    pub async fn page(&self, number: u32) -> Result<PdfPage, ViewerError> {
        let value = JsFuture::from(self.proxy.get_page(number))
            .await
            .map_err(|e| ViewerError::PageFetch {
                page: number,
                message: describe_js(&e),
            })?;
        Ok(PdfPage {
            number,
            proxy: value.unchecked_into(),
        })
    }
}

/// A single page of a [`PdfDocument`].
pub struct PdfPage {
    number: u32,
    proxy: PdfPageProxy,
}

impl PdfPage {
    pub fn number(&self) -> u32 {
        self.number
    }

    fn viewport(&self, scale: f64) -> Result<PageViewport, ViewerError> {
        let params = serde_wasm_bindgen::to_value(&ViewportParams { scale }).map_err(|e| {
            ViewerError::Render {
                page: self.number,
                message: e.to_string(),
            }
        })?;
        Ok(self.proxy.get_viewport(&params))
    }

    /// Viewport dimensions at `scale`; `1.0` gives the intrinsic size.
    pub fn size_at(&self, scale: f64) -> Result<PageSize, ViewerError> {
        let viewport = self.viewport(scale)?;
        Ok(PageSize {
            width: viewport.width(),
            height: viewport.height(),
        })
    }

    /// Draws the page into `context` at `scale` and waits for completion.
    ///
    /// The caller sizes the canvas beforehand from [`PdfPage::size_at`].
    pub async fn render_to(
        &self,
        context: &CanvasRenderingContext2d,
        scale: f64,
    ) -> Result<(), ViewerError> {
        let render_err = |e: JsValue| ViewerError::Render {
            page: self.number,
            message: describe_js(&e),
        };

        let viewport = self.viewport(scale)?;
        let params = js_sys::Object::new();
        js_sys::Reflect::set(&params, &"canvasContext".into(), context).map_err(render_err)?;
        js_sys::Reflect::set(&params, &"viewport".into(), &viewport).map_err(render_err)?;

        let task = self.proxy.render(&params).map_err(render_err)?;
        JsFuture::from(task.promise()).await.map_err(render_err)?;
        Ok(())
    }

    /// The page's text fragments joined by single spaces.
    pub async fn text(&self) -> Result<String, ViewerError> {
        let text_err = |message: String| ViewerError::TextContent {
            page: self.number,
            message,
        };
        let value = JsFuture::from(self.proxy.get_text_content())
            .await
            .map_err(|e| text_err(describe_js(&e)))?;
        let content: TextContent =
            serde_wasm_bindgen::from_value(value).map_err(|e| text_err(e.to_string()))?;
        Ok(join_fragments(content.items.iter().map(|item| item.text.as_str())))
    }
}

/// Sequential access to per-page text, the seam the search engine scans
/// through.
#[allow(async_fn_in_trait)]
pub trait PageTextSource {
    fn page_count(&self) -> u32;

    /// Text of page `number` (1-based).
    async fn page_text(&self, number: u32) -> Result<String, ViewerError>;
}

impl PageTextSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    async fn page_text(&self, number: u32) -> Result<String, ViewerError> {
        self.page(number).await?.text().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_join_with_single_spaces() {
        assert_eq!(join_fragments(["Merhaba", "dünya"]), "Merhaba dünya");
        assert_eq!(join_fragments(["a", "", "b"]), "a  b");
        assert_eq!(join_fragments(Vec::<String>::new()), "");
    }

    #[test]
    fn canvas_pixels_floor() {
        let size = PageSize {
            width: 612.9,
            height: 792.2,
        };
        assert_eq!(size.canvas_pixels(), (612, 792));
        let bad = PageSize {
            width: f64::NAN,
            height: -3.0,
        };
        assert_eq!(bad.canvas_pixels(), (0, 0));
    }

    #[test]
    fn text_content_tolerates_missing_str() {
        let content: TextContent = serde_json::from_str(
            r#"{"items":[{"str":"Sayfa","dir":"ltr"},{"type":"beginMarkedContent"},{"str":"bir"}],"styles":{}}"#,
        )
        .unwrap();
        let joined = join_fragments(content.items.iter().map(|i| i.text.as_str()));
        assert_eq!(joined, "Sayfa  bir");
    }
}
