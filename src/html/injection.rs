/*!
 * Language-switcher and hreflang link injection.
 *
 * Both language versions of a page carry a floating switcher linking to the
 * other version and a `rel=alternate` hreflang hint in the head. Injection is
 * strip-then-add: previously injected markup is recognized by a dedicated
 * marker attribute (and the rel/hreflang pair for head links) and removed
 * first, so repeated runs converge instead of accumulating duplicates.
 */

use std::rc::Rc;

use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::html::dom::{
    append_child, create_element, create_text, get_child_element_by_name, get_node_attr,
    get_node_name, remove_children_where, set_node_attr,
};
use crate::relpath;

/// Marker attribute identifying an injected switcher container
pub const SWITCHER_MARKER: &str = "data-lang-switch";

/// Inline style of the switcher container
const SWITCHER_STYLE: &str = "position:fixed;bottom:12px;right:12px;z-index:9999;\
font-family:inherit;font-size:13px;background:#fff;border:1px solid #ddd;\
border-radius:6px;padding:6px 10px;box-shadow:0 2px 8px rgba(0,0,0,0.08)";

/// Which language version of a page is being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSide {
    /// The source-language original
    Source,
    /// The translated copy under the target subdirectory
    Target,
}

/// Settings shared by both injection directions
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Source language code (hreflang of the original)
    pub source_language: String,
    /// Target language code (hreflang of the mirror)
    pub target_language: String,
    /// Name of the mirror subdirectory below the site root
    pub target_subdir: String,
    /// Switcher label shown on translated pages, linking to the original
    pub source_label: String,
    /// Switcher label shown on source pages, linking to the mirror
    pub target_label: String,
}

/// Remove previously injected language links, then inject fresh ones
pub fn refresh_language_links(
    dom: &RcDom,
    rel_path: &str,
    side: PageSide,
    settings: &LinkSettings,
) {
    strip_language_links(dom, settings);
    inject_language_links(dom, rel_path, side, settings);
}

/// Remove every injected switcher container and alternate link for the
/// configured language pair, anywhere in the document
pub fn strip_language_links(dom: &RcDom, settings: &LinkSettings) {
    strip_below(&dom.document, settings);
}

fn strip_below(node: &Handle, settings: &LinkSettings) {
    remove_children_where(node, |child| {
        is_switcher(child) || is_language_alternate(child, settings)
    });
    for child in node.children.borrow().iter() {
        strip_below(child, settings);
    }
}

fn is_switcher(node: &Handle) -> bool {
    get_node_attr(node, SWITCHER_MARKER).is_some()
}

fn is_language_alternate(node: &Handle, settings: &LinkSettings) -> bool {
    get_node_name(node) == Some("link")
        && get_node_attr(node, "rel")
            .map(|rel| rel.eq_ignore_ascii_case("alternate"))
            .unwrap_or(false)
        && get_node_attr(node, "hreflang")
            .map(|lang| lang == settings.source_language || lang == settings.target_language)
            .unwrap_or(false)
}

/// Inject the hreflang link and the switcher for one side of the pair
pub fn inject_language_links(dom: &RcDom, rel_path: &str, side: PageSide, settings: &LinkSettings) {
    let html = ensure_root(dom);

    match side {
        PageSide::Target => {
            set_node_attr(&html, "lang", Some(settings.target_language.clone()));
        }
        PageSide::Source => {
            if get_node_attr(&html, "lang").is_none() {
                set_node_attr(&html, "lang", Some(settings.source_language.clone()));
            }
        }
    }

    let (href, hreflang, label) = match side {
        PageSide::Target => (
            relpath::href_to_source(rel_path),
            settings.source_language.as_str(),
            settings.source_label.as_str(),
        ),
        PageSide::Source => (
            relpath::href_to_target(rel_path, &settings.target_subdir),
            settings.target_language.as_str(),
            settings.target_label.as_str(),
        ),
    };

    let head = ensure_head(&html);
    append_child(
        &head,
        create_element(
            "link",
            &[
                ("rel", "alternate"),
                ("hreflang", hreflang),
                ("href", href.as_str()),
            ],
        ),
    );

    let body = ensure_body(&html);
    let container = create_element(
        "div",
        &[(SWITCHER_MARKER, hreflang), ("style", SWITCHER_STYLE)],
    );
    let link = create_element("a", &[("href", href.as_str()), ("hreflang", hreflang)]);
    append_child(&link, create_text(label));
    append_child(&container, link);
    append_child(&body, container);
}

/// Return the document's root element, synthesizing `<html><body>` when the
/// document has none.
///
/// Pre-existing top-level content moves into the new body; doctype nodes stay
/// at document level so they keep preceding the root.
pub fn ensure_root(dom: &RcDom) -> Handle {
    if let Some(html) = get_child_element_by_name(&dom.document, "html") {
        return html;
    }

    let html = create_element("html", &[]);
    let body = create_element("body", &[]);

    let orphans: Vec<Handle> = dom.document.children.borrow_mut().drain(..).collect();
    for child in orphans {
        if matches!(child.data, NodeData::Doctype { .. }) {
            append_child(&dom.document, child);
        } else {
            append_child(&body, child);
        }
    }

    append_child(&html, body);
    append_child(&dom.document, html.clone());
    html
}

fn ensure_head(html: &Handle) -> Handle {
    if let Some(head) = get_child_element_by_name(html, "head") {
        return head;
    }
    let head = create_element("head", &[]);
    head.parent.set(Some(Rc::downgrade(html)));
    html.children.borrow_mut().insert(0, head.clone());
    head
}

fn ensure_body(html: &Handle) -> Handle {
    if let Some(body) = get_child_element_by_name(html, "body") {
        return body;
    }
    let body = create_element("body", &[]);
    append_child(html, body.clone());
    body
}
