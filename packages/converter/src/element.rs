//! Owned XML element tree.
//!
//! Both tree readers produce [`Element`] values: the whole-document reader
//! materializes one from a parsed `roxmltree` node, the streaming reader
//! assembles them directly from parser events. The converter only ever
//! reads them.

use roxmltree::Node;

/// One XML element: local tag name, attributes in document order, the text
/// that precedes the first child (if any), and element children in document
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no text and no children yet.
    pub fn new(tag: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            text: None,
            children: Vec::new(),
        }
    }

    /// Build an element tree from a parsed DOM node.
    ///
    /// Only element children are kept; the stored text is the text run
    /// before the first child element, matching what the converter
    /// consumes. Tag and attribute names come out namespace-stripped.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let children = node
            .children()
            .filter(Node::is_element)
            .map(Self::from_node)
            .collect();

        Self {
            tag: node.tag_name().name().to_string(),
            attributes,
            text: node.text().map(str::to_string),
            children,
        }
    }

    /// Local tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute pairs in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Text before the first child element, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Element children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Append text content.
    ///
    /// Once a child element exists, further text belongs to trailing mixed
    /// content and is dropped, mirroring the "text before first child"
    /// reading used by the converter.
    pub fn append_text(&mut self, text: &str) {
        if !self.children.is_empty() {
            return;
        }
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Attach a completed child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }
}
