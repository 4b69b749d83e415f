/*!
 * Translatable-unit extraction and replacement.
 *
 * Extraction walks the DOM once in document order and produces three ordered
 * collections: text nodes, translatable attribute values, and
 * meta-description contents. Excluded containers (script, style, code, pre,
 * noscript) are pruned wholesale: nothing inside them is ever extracted, so
 * their content survives the pipeline byte-identical. Replacement writes
 * translated values back into the original node locations.
 */

use std::collections::HashSet;

use anyhow::Result;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;

use crate::html::dom::set_node_attr;

/// Containers whose subtrees are never translated
static EXCLUDED_TAGS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["script", "style", "code", "pre", "noscript"]));

/// Attributes whose values are translated
static TRANSLATABLE_ATTRS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["title", "alt", "aria-label", "placeholder"]));

/// A text node scheduled for replacement
pub struct TextUnit {
    /// The node whose contents will be rewritten
    pub node: Handle,
    /// Current contents
    pub text: String,
}

/// An attribute value scheduled for replacement
pub struct AttrUnit {
    /// The element carrying the attribute
    pub node: Handle,
    /// Attribute name
    pub attr: String,
    /// Current value
    pub text: String,
}

/// A meta-description content value scheduled for replacement
pub struct MetaUnit {
    /// The meta element
    pub node: Handle,
    /// Current content value
    pub text: String,
}

/// Ordered translatable units of one document
#[derive(Default)]
pub struct ExtractedUnits {
    /// Text nodes, in document order
    pub text_nodes: Vec<TextUnit>,
    /// Attribute values, in document order
    pub attributes: Vec<AttrUnit>,
    /// Meta-description values, in document order
    pub metas: Vec<MetaUnit>,
}

impl ExtractedUnits {
    /// All unit values, flattened in collection order
    pub fn all_texts(&self) -> Vec<String> {
        self.text_nodes
            .iter()
            .map(|u| u.text.clone())
            .chain(self.attributes.iter().map(|u| u.text.clone()))
            .chain(self.metas.iter().map(|u| u.text.clone()))
            .collect()
    }

    /// Unit counts as (text nodes, attributes, metas)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.text_nodes.len(),
            self.attributes.len(),
            self.metas.len(),
        )
    }

    /// Total number of units
    pub fn total(&self) -> usize {
        self.text_nodes.len() + self.attributes.len() + self.metas.len()
    }

    /// Whether the document had nothing to translate
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Extract the translatable units of a parsed document
pub fn extract_units(dom: &RcDom) -> ExtractedUnits {
    let mut units = ExtractedUnits::default();
    walk(&dom.document, &mut units);
    units
}

fn walk(node: &Handle, units: &mut ExtractedUnits) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.trim().is_empty() {
                units.text_nodes.push(TextUnit {
                    node: node.clone(),
                    text,
                });
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();
            if EXCLUDED_TAGS.contains(tag) {
                return;
            }

            for attr in attrs.borrow().iter() {
                let attr_name = attr.name.local.as_ref();
                if TRANSLATABLE_ATTRS.contains(attr_name) && !attr.value.trim().is_empty() {
                    units.attributes.push(AttrUnit {
                        node: node.clone(),
                        attr: attr_name.to_string(),
                        text: attr.value.to_string(),
                    });
                }
            }

            if tag == "meta" {
                if let Some(content) = meta_description_content(attrs.borrow().iter()) {
                    units.metas.push(MetaUnit {
                        node: node.clone(),
                        text: content,
                    });
                }
            }

            for child in node.children.borrow().iter() {
                walk(child, units);
            }
        }
        NodeData::Document => {
            for child in node.children.borrow().iter() {
                walk(child, units);
            }
        }
        // Comments, doctypes, and processing instructions carry no units
        _ => {}
    }
}

/// Content value of a `<meta>` element when it is a page description
fn meta_description_content<'a>(
    attrs: impl Iterator<Item = &'a html5ever::interface::Attribute>,
) -> Option<String> {
    let mut is_description = false;
    let mut content = None;

    for attr in attrs {
        match attr.name.local.as_ref() {
            "name" if attr.value.eq_ignore_ascii_case("description") => is_description = true,
            "property" if attr.value.eq_ignore_ascii_case("og:description") => {
                is_description = true
            }
            "content" if !attr.value.trim().is_empty() => content = Some(attr.value.to_string()),
            _ => {}
        }
    }

    if is_description { content } else { None }
}

/// Write translated values back into their original locations.
///
/// `translated` must parallel the flattened unit order (text nodes, then
/// attributes, then metas), the same order `all_texts` produces.
pub fn apply_translations(units: &ExtractedUnits, translated: &[String]) -> Result<()> {
    if translated.len() != units.total() {
        anyhow::bail!(
            "Translation count {} does not match unit count {}",
            translated.len(),
            units.total()
        );
    }

    let mut values = translated.iter();

    for unit in &units.text_nodes {
        let value = values.next().cloned().unwrap_or_default();
        if let NodeData::Text { contents } = &unit.node.data {
            let mut contents = contents.borrow_mut();
            contents.clear();
            contents.push_slice(&value);
        }
    }

    for unit in &units.attributes {
        let value = values.next().cloned().unwrap_or_default();
        set_node_attr(&unit.node, &unit.attr, Some(value));
    }

    for unit in &units.metas {
        let value = values.next().cloned().unwrap_or_default();
        set_node_attr(&unit.node, "content", Some(value));
    }

    Ok(())
}
