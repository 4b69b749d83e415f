/*!
 * DOM parsing, node helpers, and serialization.
 *
 * Thin helpers over html5ever / markup5ever_rcdom so the rest of the crate
 * can treat documents as values: parse a string, inspect and mutate nodes,
 * serialize back out. Doctype lines are carried separately as raw text
 * because the round trip through the parser does not preserve their exact
 * original spelling.
 */

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{LocalName, namespace_url, ns};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

/// Parse an HTML string into a DOM
pub fn html_to_dom(html: &str) -> Result<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to parse HTML: {:?}", e))
}

/// Serialize a DOM back to an HTML string
pub fn dom_to_html(dom: &RcDom) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    serialize(
        &mut buf,
        &SerializableHandle::from(dom.document.clone()),
        SerializeOpts::default(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to serialize DOM: {:?}", e))?;

    String::from_utf8(buf).map_err(|e| anyhow::anyhow!("Serialized DOM is not UTF-8: {}", e))
}

/// Get an element's tag name
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Get an element's attribute value
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// Set, replace, or remove (on `None`) an element's attribute
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.clone() {
                    attrs_mut[i].value.clear();
                    attrs_mut[i].value.push_slice(attr_value.as_str());
                } else {
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            if let Some(attr_value) = attr_value {
                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: StrTendril::from(attr_value.as_str()),
                });
            }
        }
    };
}

/// Find the first direct child element with the given tag name
pub fn get_child_element_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    children
        .iter()
        .find(|child| match child.data {
            NodeData::Element { ref name, .. } => &*name.local == node_name,
            _ => false,
        })
        .cloned()
}

/// Create a detached element node
pub fn create_element(tag: &str, attributes: &[(&str, &str)]) -> Handle {
    let attrs = attributes
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*name)),
            value: StrTendril::from(*value),
        })
        .collect();

    Node::new(NodeData::Element {
        name: QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

/// Create a detached text node
pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    })
}

/// Append a child node, fixing up its parent pointer
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Remove every direct child matching the predicate
pub fn remove_children_where<F>(parent: &Handle, predicate: F)
where
    F: Fn(&Handle) -> bool,
{
    parent.children.borrow_mut().retain(|child| {
        if predicate(child) {
            child.parent.set(None);
            false
        } else {
            true
        }
    });
}

/// Capture a doctype declaration from the head of the raw document text
///
/// Only the first few lines are inspected, matching where a doctype can
/// legally appear.
pub fn capture_doctype(html: &str) -> Option<String> {
    html.lines()
        .take(3)
        .find(|line| line.trim_start().to_lowercase().starts_with("<!doctype"))
        .map(|line| line.trim().to_string())
}

/// Post-process serialized output before it is written.
///
/// Strips the stray `html` literal some round trips leave in front of the
/// root tag, and re-prepends the captured doctype when the serializer
/// dropped it.
pub fn finalize_serialized(html: String, doctype: Option<&str>) -> String {
    let mut out = html;

    if out.trim_start().starts_with("html<html") {
        out = out.replacen("html<", "<", 1);
    }

    if let Some(doctype) = doctype {
        if !out.trim_start().to_lowercase().starts_with("<!doctype") {
            out = format!("{}\n{}", doctype, out);
        }
    }

    out
}
