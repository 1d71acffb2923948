//! Single-document PDF viewer for the browser.
//!
//! PDF.js does the parsing, rasterizing and text extraction; this crate owns
//! the viewer logic around it: a depth-1 render queue, container-fit zoom,
//! page navigation and a linear text search across pages.

pub mod assembly;
pub mod document;
pub mod dom;
pub mod logging;
pub mod navigation;
pub mod pdfjs_bindings;
pub mod render_queue;
pub mod schema;
pub mod search;
pub mod view_state;
pub mod viewer;
pub mod viewport;

pub use schema::{ViewerError, ViewerOptions};
pub use search::{SearchHit, SearchOutcome, SearchResults};
pub use view_state::ViewState;
