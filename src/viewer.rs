//! Viewing session: owns the document, the view state and the DOM handles,
//! and wires user input to them.
//!
//! Everything runs on the browser's single thread. Renders and searches are
//! `spawn_local` tasks; `RefCell` borrows of the view state are never held
//! across an await point.

use crate::document::PdfDocument;
use crate::dom::ViewerElements;
use crate::navigation::{key_command, parse_page_number, KeyCommand};
use crate::schema::{describe_js, ViewerError, ViewerOptions};
use crate::search::{normalize_query, search_document, SearchOutcome, SnippetWindow};
use crate::view_state::ViewState;
use crate::viewport::{available_width, fit_scale, render_scale};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

pub struct Session {
    document: PdfDocument,
    state: RefCell<ViewState>,
    ui: ViewerElements,
    options: ViewerOptions,
}

/// Locates the page elements, opens the document and starts the session.
///
/// Failures after the elements were found are reported once on screen with
/// the load-failed message; the loading indicator is hidden again.
pub async fn launch(options: ViewerOptions) -> Result<Rc<Session>, ViewerError> {
    let window = web_sys::window().ok_or_else(|| ViewerError::Js("no window".into()))?;
    let dom = window
        .document()
        .ok_or_else(|| ViewerError::Js("no document".into()))?;
    let ui = ViewerElements::locate(&dom, &options.elements)?;

    ui.set_loading(true);
    let document = match PdfDocument::open(&options).await {
        Ok(document) => document,
        Err(err) => {
            ui.show_message(&options.messages.load_failed);
            ui.set_loading(false);
            return Err(err);
        }
    };

    ui.show_total(document.page_count());
    let mut state = ViewState::from_options(&options);
    state.document_loaded(document.page_count());

    let session = Rc::new(Session {
        document,
        state: RefCell::new(state),
        ui,
        options,
    });
    session.go_to(1);

    if let Err(err) = session.wire(&window) {
        session.ui.show_message(&session.options.messages.load_failed);
        session.ui.set_loading(false);
        return Err(err);
    }
    Ok(session)
}

impl Session {
    /// Applies a state change and starts the render it asks for, if any.
    fn update(self: &Rc<Self>, change: impl FnOnce(&mut ViewState) -> Option<u32>) {
        let start = {
            let mut state = self.state.borrow_mut();
            change(&mut *state)
        };
        if let Some(page) = start {
            let session = Rc::clone(self);
            spawn_local(async move { session.render_loop(page).await });
        }
    }

    pub fn go_to(self: &Rc<Self>, requested: i64) {
        self.update(|state| state.go_to(requested));
    }

    pub fn current_page(&self) -> u32 {
        self.state.borrow().current_page()
    }

    pub fn page_count(&self) -> u32 {
        self.document.page_count()
    }

    /// Renders `first`, then whatever page was requested meanwhile, until the
    /// queue is empty.
    async fn render_loop(&self, first: u32) {
        let mut next = Some(first);
        while let Some(page) = next {
            if let Err(err) = self.render_page(page).await {
                log::error!("{}", err);
                self.state.borrow_mut().abort_render();
                return;
            }
            next = self.state.borrow_mut().finish_render();
        }
    }

    async fn render_page(&self, number: u32) -> Result<(), ViewerError> {
        self.ui.set_loading(true);
        let page = self.document.page(number).await?;

        let intrinsic = page.size_at(1.0)?;
        let container = available_width(self.ui.container_width(), self.options.container_gutter_px);
        let fit = fit_scale(container, intrinsic.width, self.options.min_fit_scale);
        let zoom = self.state.borrow().zoom().factor();
        let scale = render_scale(fit, zoom);

        let (width, height) = page.size_at(scale)?.canvas_pixels();
        self.ui.resize_canvas(width, height);
        page.render_to(&self.ui.context, scale).await?;

        self.ui.set_loading(false);
        let state = self.state.borrow();
        self.ui
            .show_page_status(state.current_page(), self.page_count(), &state.zoom().label());
        log::debug!("rendered page {} at scale {:.3}", number, scale);
        Ok(())
    }

    pub fn search(self: &Rc<Self>, raw_query: String) {
        let session = Rc::clone(self);
        spawn_local(async move { session.run_search(raw_query).await });
    }

    async fn run_search(&self, raw_query: String) {
        let messages = &self.options.messages;
        if normalize_query(&raw_query).is_some() {
            self.ui.show_message(&messages.searching);
        }

        let window = SnippetWindow::from(&self.options);
        match search_document(&self.document, &raw_query, window).await {
            Ok(SearchOutcome::EmptyQuery) => self.ui.show_message(&messages.empty_query),
            Ok(SearchOutcome::NoMatches) => self.ui.show_message(&messages.not_found),
            Ok(SearchOutcome::Matches(results)) => {
                let limit = self.options.max_displayed_results;
                if let Err(err) = self.ui.render_results(&results, limit, messages) {
                    log::error!("could not show search results: {}", err);
                }
            }
            Err(err) => log::error!("search failed: {}", err),
        }
    }

    fn on_key(self: &Rc<Self>, command: KeyCommand) {
        match command {
            KeyCommand::Prev => self.update(ViewState::prev),
            KeyCommand::Next => self.update(ViewState::next),
            KeyCommand::ZoomIn => self.update(ViewState::zoom_in),
            KeyCommand::ZoomOut => self.update(ViewState::zoom_out),
        }
    }

    fn wire(self: &Rc<Self>, window: &web_sys::Window) -> Result<(), ViewerError> {
        let ui = &self.ui;

        if let Some(prev) = &ui.prev {
            let s = Rc::clone(self);
            listen(prev, "click", move |_| s.update(ViewState::prev))?;
        }
        if let Some(next) = &ui.next {
            let s = Rc::clone(self);
            listen(next, "click", move |_| s.update(ViewState::next))?;
        }

        if let Some(input) = &ui.page_input {
            let s = Rc::clone(self);
            listen(input, "keydown", move |event| {
                if !is_enter(&event) {
                    return;
                }
                // non-numeric entries are ignored
                if let Some(n) = s.ui.page_input_value().as_deref().and_then(parse_page_number) {
                    s.go_to(n);
                }
            })?;
        }

        if let Some(zoom_in) = &ui.zoom_in {
            let s = Rc::clone(self);
            listen(zoom_in, "click", move |_| s.update(ViewState::zoom_in))?;
        }
        if let Some(zoom_out) = &ui.zoom_out {
            let s = Rc::clone(self);
            listen(zoom_out, "click", move |_| s.update(ViewState::zoom_out))?;
        }

        if let Some(button) = &ui.search_button {
            let s = Rc::clone(self);
            listen(button, "click", move |_| s.search(s.ui.search_query()))?;
        }
        if let Some(input) = &ui.search_input {
            let s = Rc::clone(self);
            listen(input, "keydown", move |event| {
                if is_enter(&event) {
                    s.search(s.ui.search_query());
                }
            })?;
        }

        // quick-jump controls and result buttons
        let s = Rc::clone(self);
        listen(ui.document(), "click", move |event| {
            if let Some(page) = data_go_target(&event) {
                s.go_to(page);
            }
        })?;

        let s = Rc::clone(self);
        listen(window, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(command) = key_command(&key.key(), key.ctrl_key() || key.meta_key()) else {
                return;
            };
            if command.prevents_default() {
                event.prevent_default();
            }
            s.on_key(command);
        })?;

        let s = Rc::clone(self);
        listen(window, "resize", move |_| s.update(ViewState::refresh))?;

        Ok(())
    }
}

fn is_enter(event: &Event) -> bool {
    event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|key| key.key() == "Enter")
}

/// Page number carried by the nearest `[data-go]` ancestor of the click
/// target.
fn data_go_target(event: &Event) -> Option<i64> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let control = target.closest("[data-go]").ok()??;
    parse_page_number(&control.get_attribute("data-go")?)
}

/// Adds an event listener that lives as long as the page.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), ViewerError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| ViewerError::Js(describe_js(&e)))?;
    closure.forget();
    Ok(())
}
