use std::cell::RefCell;
use std::rc::Rc;

use folio_core::effects::parallax::ParallaxTargets;
use folio_core::effects::{CounterAnimation, lazy, page_state, reveal, ripple};
use folio_core::schedule::{Debounce, FrameGate};
use folio_core::{Site, SiteConfig, SiteSnapshot, anchor, diagnostics};
use folio_protocol::{DomPatch, Point, Target};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, ErrorEvent, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent, TouchEvent,
};

use crate::console;
use crate::dom::{self, Dom};

type Installer = fn(&Rc<App>) -> Result<(), JsValue>;

/// One `requestAnimationFrame`-coalesced job.
#[derive(Default)]
struct FrameSlot {
    gate: RefCell<FrameGate>,
    handle: RefCell<Option<AnimationFrame>>,
}

/// One debounced job. Replacing the handle cancels the previous timer.
#[derive(Default)]
struct DelaySlot {
    debounce: RefCell<Debounce>,
    handle: RefCell<Option<Timeout>>,
}

#[derive(Debug, Clone, Copy)]
enum FrameTask {
    ScrollSpy,
    Parallax,
}

#[derive(Debug, Clone, Copy)]
enum DelayedTask {
    LayoutResize,
    ViewportHeight,
    ScrollIdle,
}

/// Binds the core [`Site`] to the live document.
///
/// Listeners hold an `Rc<App>`; the app itself is kept alive for the whole
/// page view, so nothing is ever torn down.
pub struct App {
    config: SiteConfig,
    dom: Dom,
    site: RefCell<Site>,
    spy_frame: FrameSlot,
    parallax_frame: FrameSlot,
    layout_resize: DelaySlot,
    vh_resize: DelaySlot,
    scroll_idle: DelaySlot,
    counter_frames: RefCell<Vec<Option<AnimationFrame>>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl App {
    pub fn new(config: SiteConfig, dom: Dom) -> Rc<Self> {
        Rc::new(Self {
            site: RefCell::new(Site::new(config.clone())),
            config,
            dom,
            spy_frame: FrameSlot::default(),
            parallax_frame: FrameSlot::default(),
            layout_resize: DelaySlot::default(),
            vh_resize: DelaySlot::default(),
            scroll_idle: DelaySlot::default(),
            counter_frames: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Install every component. A component whose setup fails is logged and
    /// left out; the rest still run.
    pub fn install(self: &Rc<Self>) {
        let steps: [(&str, Installer); 14] = [
            ("mobile menu", Self::install_menu),
            ("smooth scroll", Self::install_anchors),
            ("scroll spy", Self::install_scroll_spy),
            ("nav hover", Self::install_hover),
            ("keyboard", Self::install_keyboard),
            ("entrance animations", Self::install_reveal),
            ("ripple", Self::install_ripple),
            ("lazy images", Self::install_lazy_images),
            ("swipe", Self::install_swipe),
            ("viewport height", Self::install_viewport_height),
            ("scroll state", Self::install_scroll_state),
            ("parallax", Self::install_parallax),
            ("counters", Self::install_counters),
            ("diagnostics", Self::install_diagnostics),
        ];
        for (name, install) in steps {
            if let Err(err) = install(self) {
                console::error_with(&format!("{name} disabled:"), &err);
            }
        }
    }

    pub fn active_section(&self) -> Option<String> {
        self.site.borrow().active_section().map(str::to_owned)
    }

    pub fn snapshot(&self) -> SiteSnapshot {
        self.site.borrow().snapshot()
    }

    /// Re-select the active section and re-measure the pill after the page
    /// layout moved.
    pub fn relayout(&self) {
        let page = self.dom.page_layout();
        let nav = self.dom.nav_layout();
        let mobile = self.dom.mobile_hrefs();
        self.react(|site| site.on_layout_change(&page, &nav, &mobile));
    }

    pub fn close_menu(&self) {
        self.react(Site::close_menu);
    }

    /// Run `f` against the site state, then apply what it produced. The
    /// borrow is released before any DOM work happens.
    fn react(&self, f: impl FnOnce(&mut Site) -> Vec<DomPatch>) {
        let patches = f(&mut self.site.borrow_mut());
        self.dom.apply(&patches);
    }

    fn listen<F>(&self, target: &EventTarget, event: &'static str, callback: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.listeners
            .borrow_mut()
            .push(EventListener::new(target, event, callback));
    }

    fn listen_active<F>(&self, target: &EventTarget, event: &'static str, callback: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.listeners.borrow_mut().push(EventListener::new_with_options(
            target,
            event,
            EventListenerOptions::enable_prevent_default(),
            callback,
        ));
    }

    // --- Scheduling ---

    fn frame_slot(&self, task: FrameTask) -> &FrameSlot {
        match task {
            FrameTask::ScrollSpy => &self.spy_frame,
            FrameTask::Parallax => &self.parallax_frame,
        }
    }

    /// Coalesce repeated triggers into one run on the next animation frame.
    fn schedule_frame(self: &Rc<Self>, task: FrameTask) {
        let slot = self.frame_slot(task);
        if !slot.gate.borrow_mut().request() {
            return;
        }
        let app = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            match task {
                FrameTask::ScrollSpy => app.update_nav(),
                FrameTask::Parallax => app.update_parallax(),
            }
            app.frame_slot(task).gate.borrow_mut().complete();
        });
        *slot.handle.borrow_mut() = Some(handle);
    }

    fn delay_slot(&self, task: DelayedTask) -> (&DelaySlot, u32) {
        match task {
            DelayedTask::LayoutResize => (&self.layout_resize, self.config.resize_debounce_ms),
            DelayedTask::ViewportHeight => (&self.vh_resize, self.config.resize_debounce_ms),
            DelayedTask::ScrollIdle => (&self.scroll_idle, self.config.scroll_idle_ms),
        }
    }

    /// Run `task` once triggers have stopped arriving for its quiet period.
    fn debounce(self: &Rc<Self>, task: DelayedTask) {
        let (slot, delay_ms) = self.delay_slot(task);
        let ticket = slot.debounce.borrow_mut().trigger();
        let app = Rc::clone(self);
        let timeout = Timeout::new(delay_ms, move || {
            if app.delay_slot(task).0.debounce.borrow_mut().fire(ticket) {
                app.run_delayed(task);
            }
        });
        *slot.handle.borrow_mut() = Some(timeout);
    }

    fn run_delayed(&self, task: DelayedTask) {
        match task {
            DelayedTask::LayoutResize => self.relayout(),
            DelayedTask::ViewportHeight => self
                .dom
                .apply(&[page_state::viewport_height_var(self.dom.viewport_height())]),
            DelayedTask::ScrollIdle => self.dom.apply(&[page_state::scrolling(false)]),
        }
    }

    // --- Mobile menu ---

    fn install_menu(self: &Rc<Self>) -> Result<(), JsValue> {
        let (Some(hamburger), Some(overlay)) = (&self.dom.hamburger, &self.dom.overlay) else {
            return Ok(());
        };

        let app = Rc::clone(self);
        self.listen(hamburger, "click", move |_| app.react(Site::toggle_menu));

        for link in &self.dom.mobile_links {
            let app = Rc::clone(self);
            self.listen(link, "click", move |_| app.close_menu());
        }

        let app = Rc::clone(self);
        let background: JsValue = overlay.clone().into();
        self.listen(overlay, "click", move |event| {
            let hit = event
                .target()
                .is_some_and(|target| AsRef::<JsValue>::as_ref(&target) == &background);
            app.react(|site| site.on_overlay_click(hit));
        });
        Ok(())
    }

    fn install_keyboard(self: &Rc<Self>) -> Result<(), JsValue> {
        let app = Rc::clone(self);
        self.listen(&self.dom.document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = event.key();
            app.react(|site| site.on_key(&key));
        });

        let app = Rc::clone(self);
        self.listen(&self.dom.document, "mousedown", move |_| {
            app.dom.apply(&[page_state::on_mouse_down()]);
        });
        Ok(())
    }

    // --- Smooth scroll ---

    fn install_anchors(self: &Rc<Self>) -> Result<(), JsValue> {
        for link in &self.dom.in_page_links {
            let app = Rc::clone(self);
            let anchor = link.clone();
            self.listen_active(link, "click", move |event| {
                if let Some(href) = anchor.get_attribute("href") {
                    app.anchor_click(&href, event);
                }
            });
        }
        Ok(())
    }

    fn anchor_click(&self, href: &str, event: &Event) {
        if anchor::fragment_id(href).is_none() {
            return;
        }
        // An id that is not a valid selector behaves like a missing target.
        let target_top = self
            .dom
            .document
            .query_selector(href)
            .ok()
            .flatten()
            .map(|target| target.get_bounding_client_rect().top());
        let css_height = self.dom.root_var(&self.config.header_var);

        let planned = {
            let site = self.site.borrow();
            let header = site.header_height(self.dom.header_height(), css_height.as_deref());
            site.anchor_click(href, target_top, self.dom.scroll_y(), header)
        };
        if let Some(patches) = planned {
            event.prevent_default();
            self.dom.apply(&patches);
        }
    }

    // --- Scroll spy + pill ---

    fn install_scroll_spy(self: &Rc<Self>) -> Result<(), JsValue> {
        let app = Rc::clone(self);
        self.listen(&self.dom.window, "scroll", move |_| {
            app.schedule_frame(FrameTask::ScrollSpy);
        });

        if self.dom.document.ready_state() == "loading" {
            let app = Rc::clone(self);
            self.listen(&self.dom.document, "DOMContentLoaded", move |_| {
                app.initialize();
            });
        } else {
            self.initialize();
        }

        // Images and web fonts shift the layout after the first measurement.
        let app = Rc::clone(self);
        self.listen(&self.dom.window, "load", move |_| {
            let app = Rc::clone(&app);
            Timeout::new(app.config.load_settle_ms, move || app.relayout()).forget();
        });

        let app = Rc::clone(self);
        self.listen(&self.dom.window, "resize", move |_| {
            app.debounce(DelayedTask::LayoutResize);
        });
        Ok(())
    }

    fn initialize(&self) {
        let page = self.dom.page_layout();
        let nav = self.dom.nav_layout();
        let mobile = self.dom.mobile_hrefs();
        self.react(|site| site.initialize(&page, &nav, &mobile));
    }

    fn update_nav(&self) {
        let page = self.dom.page_layout();
        let nav = self.dom.nav_layout();
        let mobile = self.dom.mobile_hrefs();
        self.react(|site| site.on_scroll(&page, &nav, &mobile));
    }

    fn install_hover(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.dom.nav.is_none() || self.dom.pill.is_none() {
            return Ok(());
        }
        for (index, link) in self.dom.nav_links.iter().enumerate() {
            let app = Rc::clone(self);
            self.listen(link, "mouseenter", move |_| {
                let nav = app.dom.nav_layout();
                app.react(|site| site.hover_enter(index, &nav));
            });

            let app = Rc::clone(self);
            self.listen(link, "mouseleave", move |_| {
                let nav = app.dom.nav_layout();
                app.react(|site| site.hover_leave(&nav));
            });

            let app = Rc::clone(self);
            self.listen(link, "touchstart", move |_| {
                let nav = app.dom.nav_layout();
                app.react(|site| site.link_touch(&nav));
            });
        }
        Ok(())
    }

    // --- Entrance animations ---

    fn install_reveal(self: &Rc<Self>) -> Result<(), JsValue> {
        let settings = &self.config.reveal;

        if !self.dom.cards.is_empty() {
            for index in 0..self.dom.cards.len() {
                self.dom.apply(&reveal::card_hidden(index, settings));
            }
            let app = Rc::clone(self);
            let observer = intersection_observer(
                settings.card_threshold,
                Some(&settings.card_root_margin),
                move |entries, _| {
                    for entry in entries.iter().filter(|e| e.is_intersecting()) {
                        if let Some(index) = dom::index_of(&app.dom.cards, &entry.target()) {
                            app.dom.apply(&reveal::card_shown(index));
                        }
                    }
                },
            )?;
            for card in &self.dom.cards {
                observer.observe(card);
            }
        }

        if !self.dom.contact_items.is_empty() {
            for index in 0..self.dom.contact_items.len() {
                self.dom.apply(&reveal::contact_hidden(index));
            }
            let app = Rc::clone(self);
            let observer =
                intersection_observer(settings.contact_threshold, None, move |entries, _| {
                    for (position, entry) in entries.iter().enumerate() {
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let Some(index) = dom::index_of(&app.dom.contact_items, &entry.target())
                        else {
                            continue;
                        };
                        let delay = reveal::contact_delay_ms(position, &app.config.reveal);
                        let app = Rc::clone(&app);
                        Timeout::new(delay, move || {
                            app.dom.apply(&reveal::contact_shown(index));
                        })
                        .forget();
                    }
                })?;
            for item in &self.dom.contact_items {
                observer.observe(item);
            }
        }
        Ok(())
    }

    // --- Minor effects ---

    fn install_ripple(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.dom.cards.is_empty() {
            return Ok(());
        }
        let style = self.dom.document.create_element("style")?;
        style.set_text_content(Some(ripple::RIPPLE_KEYFRAMES));
        if let Some(head) = self.dom.document.head() {
            head.append_child(&style)?;
        }

        for (index, card) in self.dom.cards.iter().enumerate() {
            let app = Rc::clone(self);
            let bounds = card.clone();
            self.listen(card, "click", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let on_link = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|t| t.closest(&app.config.selectors.card_link).ok().flatten())
                    .is_some();
                if on_link {
                    return;
                }
                let click = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
                app.dom.apply(&ripple::ripple(
                    index,
                    &dom::rect_of(&bounds),
                    click,
                    app.config.ripple_lifetime_ms,
                ));
            });
        }
        Ok(())
    }

    fn install_lazy_images(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.dom.images.is_empty() {
            return Ok(());
        }
        if self.dom.native_lazy {
            for (index, img) in self.dom.images.iter().enumerate() {
                if let Some(patch) = lazy::load_image(index, img.get_attribute("data-src").as_deref()) {
                    self.dom.apply(&[patch]);
                }
            }
            return Ok(());
        }

        let app = Rc::clone(self);
        let observer = intersection_observer(0.0, None, move |entries, observer| {
            for entry in entries.iter().filter(|e| e.is_intersecting()) {
                let img = entry.target();
                if let Some(index) = dom::index_of(&app.dom.images, &img)
                    && let Some(patch) =
                        lazy::load_image(index, img.get_attribute("data-src").as_deref())
                {
                    app.dom.apply(&[patch]);
                }
                observer.unobserve(&img);
            }
        })?;
        for img in &self.dom.images {
            observer.observe(img);
        }
        Ok(())
    }

    fn install_swipe(self: &Rc<Self>) -> Result<(), JsValue> {
        let app = Rc::clone(self);
        self.listen(&self.dom.document, "touchstart", move |event| {
            if let Some(y) = touch_screen_y(event) {
                app.site.borrow_mut().touch_start(y);
            }
        });

        let app = Rc::clone(self);
        self.listen(&self.dom.document, "touchend", move |event| {
            let swipe = touch_screen_y(event).and_then(|y| app.site.borrow().touch_end(y));
            if let Some(swipe) = swipe {
                console::debug(&format!("swipe {swipe:?}"));
            }
        });
        Ok(())
    }

    fn install_viewport_height(self: &Rc<Self>) -> Result<(), JsValue> {
        self.run_delayed(DelayedTask::ViewportHeight);
        let app = Rc::clone(self);
        self.listen(&self.dom.window, "resize", move |_| {
            app.debounce(DelayedTask::ViewportHeight);
        });
        Ok(())
    }

    fn install_scroll_state(self: &Rc<Self>) -> Result<(), JsValue> {
        let app = Rc::clone(self);
        self.listen(&self.dom.window, "scroll", move |_| {
            app.dom.apply(&[page_state::scrolling(true)]);
            app.debounce(DelayedTask::ScrollIdle);
        });
        Ok(())
    }

    fn install_parallax(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.dom.parallax_section.is_none() {
            return Ok(());
        }
        let app = Rc::clone(self);
        self.listen(&self.dom.window, "scroll", move |_| {
            app.schedule_frame(FrameTask::Parallax);
        });
        self.update_parallax();
        Ok(())
    }

    fn update_parallax(&self) {
        let Some(section) = &self.dom.parallax_section else {
            return;
        };
        let bounds = dom::section_box(&section.id(), section);
        let targets = ParallaxTargets {
            footer_name: self.dom.footer_name.is_some(),
            grid: self.dom.parallax_grid.is_some(),
        };
        let patches = self.site.borrow().parallax(
            &bounds,
            self.dom.scroll_y(),
            self.dom.viewport_height(),
            targets,
        );
        self.dom.apply(&patches);
    }

    fn install_counters(self: &Rc<Self>) -> Result<(), JsValue> {
        *self.counter_frames.borrow_mut() = self.dom.counters.iter().map(|_| None).collect();
        for (index, counter) in self.dom.counters.iter().enumerate() {
            let raw = counter.get_attribute("data-target");
            match CounterAnimation::from_attribute(raw.as_deref(), self.config.counter_duration_ms) {
                Some(animation) => self.run_counter(index, animation),
                None => console::warn(&format!("counter {index}: non-numeric data-target")),
            }
        }
        Ok(())
    }

    fn run_counter(self: &Rc<Self>, index: usize, mut animation: CounterAnimation) {
        let frame = animation.tick();
        self.dom
            .apply(&[DomPatch::text(Target::Counter(index), frame.text)]);
        if frame.done {
            return;
        }
        let app = Rc::clone(self);
        let handle = request_animation_frame(move |_| app.run_counter(index, animation));
        if let Some(slot) = self.counter_frames.borrow_mut().get_mut(index) {
            *slot = Some(handle);
        }
    }

    // --- Diagnostics ---

    fn install_diagnostics(self: &Rc<Self>) -> Result<(), JsValue> {
        self.listen(&self.dom.window, "error", |event| {
            let error = event
                .dyn_ref::<ErrorEvent>()
                .map_or(JsValue::UNDEFINED, ErrorEvent::error);
            console::error_with("script error:", &error);
        });

        let host = self.dom.window.location().hostname()?;
        if !diagnostics::is_dev_host(&host) {
            return Ok(());
        }
        let window = self.dom.window.clone();
        self.listen(&self.dom.window, "load", move |_| {
            let window = window.clone();
            // loadEventEnd is filled in only after load listeners return.
            Timeout::new(0, move || {
                let Some(performance) = window.performance() else {
                    return;
                };
                let timing = performance.timing();
                if let Some(ms) =
                    diagnostics::page_load_ms(timing.navigation_start(), timing.load_event_end())
                {
                    console::log(&format!("page load time: {ms}ms"));
                }
            })
            .forget();
        });
        Ok(())
    }
}

/// Wrap `on_entries` in an `IntersectionObserver`. The callback closure is
/// leaked; observers live as long as the page.
fn intersection_observer<F>(
    threshold: f64,
    root_margin: Option<&str>,
    mut on_entries: F,
) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            on_entries(entries, &observer);
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

fn touch_screen_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_y()))
}
