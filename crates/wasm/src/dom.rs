use folio_core::config::SiteConfig;
use folio_core::layout::{NavLayout, NavLink, PageLayout, SectionBox};
use folio_protocol::{DomPatch, Rect, Target};
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions, Window};

use crate::console;

/// Every element the page behaviour touches, looked up once at start-up.
///
/// Anything missing is `None` or an empty list; patches addressed to it are
/// dropped, which is how absent markup degrades to a no-op.
pub struct Dom {
    pub window: Window,
    pub document: Document,
    pub root: Option<HtmlElement>,
    pub body: Option<HtmlElement>,
    pub header: Option<HtmlElement>,

    pub hamburger: Option<HtmlElement>,
    pub overlay: Option<HtmlElement>,
    pub mobile_links: Vec<HtmlElement>,

    pub nav: Option<HtmlElement>,
    pub nav_links: Vec<HtmlElement>,
    pub pill: Option<HtmlElement>,
    pub in_page_links: Vec<HtmlElement>,
    /// Configured sections that exist, in configured order.
    pub sections: Vec<(String, HtmlElement)>,

    pub parallax_section: Option<HtmlElement>,
    pub footer_name: Option<HtmlElement>,
    pub parallax_grid: Option<HtmlElement>,

    pub cards: Vec<HtmlElement>,
    pub contact_items: Vec<HtmlElement>,
    pub counters: Vec<HtmlElement>,
    /// Images handed to lazy loading; see `native_lazy`.
    pub images: Vec<HtmlElement>,
    /// Whether the browser lazy-loads `loading="lazy"` images itself.
    pub native_lazy: bool,
}

impl Dom {
    pub fn discover(window: Window, config: &SiteConfig) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let sel = &config.selectors;

        let root = document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let nav = query(&document, &sel.nav);
        let (nav_links, pill) = match &nav {
            Some(nav) => (collect(nav.query_selector_all("a")), first(nav.query_selector(&sel.pill))),
            None => (Vec::new(), None),
        };
        let sections = config
            .sections
            .iter()
            .filter_map(|id| {
                let el = document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()?;
                Some((id.clone(), el))
            })
            .collect();

        let native_lazy = supports_native_lazy();
        let images = collect(document.query_selector_all(if native_lazy {
            "img[loading=\"lazy\"]"
        } else {
            "img"
        }));

        Ok(Self {
            root,
            body: document.body(),
            header: query(&document, &sel.header),
            hamburger: query(&document, &sel.hamburger),
            overlay: query(&document, &sel.mobile_overlay),
            mobile_links: collect(document.query_selector_all(&sel.mobile_links)),
            nav,
            nav_links,
            pill,
            in_page_links: collect(document.query_selector_all(&sel.in_page_links)),
            sections,
            parallax_section: query(&document, &sel.parallax_section),
            footer_name: query(&document, &sel.footer_name),
            parallax_grid: query(&document, &sel.parallax_grid),
            cards: collect(document.query_selector_all(&sel.cards)),
            contact_items: collect(document.query_selector_all(&sel.contact_items)),
            counters: collect(document.query_selector_all(&sel.counters)),
            images,
            native_lazy,
            window,
            document,
        })
    }

    // --- Measurement ---

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    pub fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    pub fn document_height(&self) -> f64 {
        self.root
            .as_ref()
            .map_or(0.0, |root| f64::from(root.scroll_height()))
    }

    pub fn page_layout(&self) -> PageLayout {
        PageLayout {
            scroll_y: self.scroll_y(),
            viewport_height: self.viewport_height(),
            document_height: self.document_height(),
            sections: self
                .sections
                .iter()
                .map(|(id, el)| section_box(id, el))
                .collect(),
        }
    }

    pub fn nav_layout(&self) -> NavLayout {
        NavLayout {
            container: self
                .nav
                .as_ref()
                .map_or(Rect::new(0.0, 0.0, 0.0, 0.0), |nav| rect_of(nav)),
            links: self
                .nav_links
                .iter()
                .map(|link| NavLink::new(link.get_attribute("href").unwrap_or_default(), rect_of(link)))
                .collect(),
        }
    }

    pub fn mobile_hrefs(&self) -> Vec<String> {
        self.mobile_links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect()
    }

    pub fn header_height(&self) -> Option<f64> {
        self.header.as_ref().map(|h| f64::from(h.offset_height()))
    }

    /// Computed value of a custom property on the root element.
    pub fn root_var(&self, name: &str) -> Option<String> {
        let root = self.root.as_ref()?;
        self.window
            .get_computed_style(root)
            .ok()
            .flatten()?
            .get_property_value(name)
            .ok()
    }

    // --- Mutation ---

    pub fn element(&self, target: Target) -> Option<&HtmlElement> {
        match target {
            Target::Root => self.root.as_ref(),
            Target::Body => self.body.as_ref(),
            Target::Hamburger => self.hamburger.as_ref(),
            Target::MobileOverlay => self.overlay.as_ref(),
            Target::MobileLink(i) => self.mobile_links.get(i),
            Target::NavLink(i) => self.nav_links.get(i),
            Target::Pill => self.pill.as_ref(),
            Target::FooterName => self.footer_name.as_ref(),
            Target::ParallaxGrid => self.parallax_grid.as_ref(),
            Target::Card(i) => self.cards.get(i),
            Target::ContactItem(i) => self.contact_items.get(i),
            Target::Counter(i) => self.counters.get(i),
            Target::Image(i) => self.images.get(i),
        }
    }

    /// Apply patches in order. A failing patch is logged and skipped.
    pub fn apply(&self, patches: &[DomPatch]) {
        for patch in patches {
            if patch.target().is_some_and(|t| self.element(t).is_none()) {
                continue;
            }
            if let Err(err) = self.apply_one(patch) {
                console::warn_with(&format!("could not apply {patch:?}"), &err);
            }
        }
    }

    fn apply_one(&self, patch: &DomPatch) -> Result<(), JsValue> {
        match patch {
            DomPatch::SetStyle {
                target,
                property,
                value,
            } => {
                let Some(el) = self.element(*target) else {
                    return Ok(());
                };
                let style = el.style();
                if value.is_empty() {
                    style.remove_property(property)?;
                } else {
                    style.set_property(property, value)?;
                }
            }
            DomPatch::SetClass { target, class, on } => {
                if let Some(el) = self.element(*target) {
                    el.class_list().toggle_with_force(class, *on)?;
                }
            }
            DomPatch::SetAttribute {
                target,
                name,
                value,
            } => {
                if let Some(el) = self.element(*target) {
                    el.set_attribute(name, value)?;
                }
            }
            DomPatch::SetText { target, text } => {
                if let Some(el) = self.element(*target) {
                    el.set_text_content(Some(text));
                }
            }
            DomPatch::ScrollTo { top, smooth } => {
                let options = ScrollToOptions::new();
                options.set_top(*top);
                options.set_behavior(if *smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Auto
                });
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            DomPatch::PushFragment { fragment } => {
                self.window
                    .history()?
                    .push_state_with_url(&JsValue::NULL, "", Some(fragment))?;
            }
            DomPatch::SpawnTransient {
                parent,
                tag,
                css_text,
                lifetime_ms,
            } => {
                let Some(parent) = self.element(*parent) else {
                    return Ok(());
                };
                let node = self.document.create_element(tag)?.dyn_into::<HtmlElement>()?;
                node.style().set_css_text(css_text);
                parent.append_child(&node)?;
                Timeout::new(*lifetime_ms, move || node.remove()).forget();
            }
        }
        Ok(())
    }
}

pub fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn section_box(id: &str, el: &HtmlElement) -> SectionBox {
    SectionBox::new(id, f64::from(el.offset_top()), f64::from(el.offset_height()))
}

/// Position of `el` in `list`, by identity.
pub fn index_of(list: &[HtmlElement], el: &Element) -> Option<usize> {
    let el: &JsValue = el.as_ref();
    list.iter().position(|item| AsRef::<JsValue>::as_ref(item) == el)
}

fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    first(document.query_selector(selector))
}

fn first(found: Result<Option<Element>, JsValue>) -> Option<HtmlElement> {
    found.ok().flatten()?.dyn_into::<HtmlElement>().ok()
}

fn collect(list: Result<NodeList, JsValue>) -> Vec<HtmlElement> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// `'loading' in HTMLImageElement.prototype`
fn supports_native_lazy() -> bool {
    let global = js_sys::global();
    js_sys::Reflect::get(&global, &"HTMLImageElement".into())
        .and_then(|ctor| js_sys::Reflect::get(&ctor, &"prototype".into()))
        .and_then(|proto| js_sys::Reflect::has(&proto, &"loading".into()))
        .unwrap_or(false)
}
