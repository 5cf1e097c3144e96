//! Headless document model the renderer mutates.
//!
//! Elements live in a flat arena and are addressed by [`NodeId`]; each node
//! carries its tag, attributes, direct text and parent/child links. Host
//! pages are parsed into the arena with `scraper` using a depth-first walk
//! that preserves document order, and the mutated document serializes back
//! to HTML.
//!
//! Removing a subtree recycles its arena slots: repeated remove-and-create
//! cycles, as in a full-redraw render loop, keep the arena at a fixed size.

use scraper::Html;

/// Handle to one element in a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable element tree with a single root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    free: Vec<usize>,
    root: NodeId,
}

// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "meta", "link", "input"];

impl Document {
    /// An empty document holding only an `html` root element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
        };
        let root = doc.push_node("html");
        doc.root = root;
        doc
    }

    /// Parse host HTML into the arena, preserving document order.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
        };

        let root = parsed.root_element();
        let mut stack: Vec<(scraper::ElementRef, Option<NodeId>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let id = doc.push_node(node.value().name());
            for (name, value) in node.value().attrs() {
                doc.set_attribute(id, name, value);
            }
            // Direct text children only; descendant text belongs to the
            // descendants themselves.
            let text: String = node
                .children()
                .filter_map(|c| c.value().as_text().map(|t| t.text.to_string()))
                .collect();
            doc.nodes[id.0].text = text;

            match parent {
                Some(p) => doc.append_child(p, id),
                None => doc.root = id,
            }

            let children: Vec<_> = node
                .children()
                .filter_map(scraper::ElementRef::wrap)
                .collect();
            for child in children.into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        doc
    }

    fn push_node(&mut self, tag: &str) -> NodeId {
        if let Some(slot) = self.free.pop() {
            let node = &mut self.nodes[slot];
            node.tag.clear();
            node.tag.push_str(tag);
            node.attrs.clear();
            node.text.clear();
            node.parent = None;
            node.children.clear();
            return NodeId(slot);
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            attrs: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    // Return `id` and everything under it to the free list.
    fn release(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.release(child);
        }
        self.nodes[id.0].parent = None;
        self.free.push(id.0);
    }

    /// Document root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of arena slots, recyclable ones included. Stable across
    /// balanced remove-and-create cycles.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(tag)
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove `child` from `parent` and recycle its subtree; a no-op when
    /// it is not a child. The removed ids become invalid and may be handed
    /// out again by `create_element`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[child.0].parent != Some(parent) {
            return;
        }
        self.nodes[parent.0].children.retain(|c| *c != child);
        self.release(child);
    }

    /// Remove all children of `parent`, recycling their subtrees.
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for child in children {
            self.release(child);
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Child elements of `id` with the given tag, in order.
    pub fn children_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes[c.0].tag == tag)
            .collect()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[id.0].attrs;
        if let Some(slot) = attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            attrs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Add a class to the element's space-separated class attribute.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let merged = match self.get_attribute(id, "class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", &merged);
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get_attribute(id, "class")
            .map(|c| c.split_whitespace().any(|part| part == class))
            .unwrap_or(false)
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    /// First element carrying `class`, in document order from the root.
    pub fn element_by_class(&self, class: &str) -> Option<NodeId> {
        self.elements_by_class(class).into_iter().next()
    }

    /// All elements carrying `class`, in document order from the root.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.has_class(id, class) {
                found.push(id);
            }
            for child in self.nodes[id.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        found
    }

    /// Serialize the whole document to HTML.
    pub fn to_html(&self) -> String {
        self.html_of(self.root)
    }

    /// Serialize the subtree rooted at `id` to HTML.
    pub fn html_of(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }
        out.push_str(&escape_text(&node.text));
        for child in &node.children {
            self.write_node(*child, out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_serialize() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.add_class(div, "square");
        doc.add_class(div, "lightSq");
        doc.append_child(doc.root(), div);
        let img = doc.create_element("img");
        doc.set_attribute(img, "src", "./img/wR.svg");
        doc.append_child(div, img);

        let html = doc.to_html();
        assert_eq!(
            html,
            "<html><div class=\"square lightSq\"><img src=\"./img/wR.svg\"></div></html>"
        );
    }

    #[test]
    fn parse_finds_elements_in_document_order() {
        let doc = Document::parse(
            "<html><body><div class=\"x\" id=\"a\"></div><div class=\"x\" id=\"b\"></div></body></html>",
        );
        let found = doc.elements_by_class("x");
        assert_eq!(found.len(), 2);
        assert_eq!(doc.get_attribute(found[0], "id"), Some("a"));
        assert_eq!(doc.get_attribute(found[1], "id"), Some("b"));
    }

    #[test]
    fn parse_keeps_direct_text_only() {
        let doc = Document::parse("<html><body><p>outer<span>inner</span></p></body></html>");
        let body = doc.first_by_tag("body");
        let p = doc.children_by_tag(body, "p")[0];
        assert_eq!(doc.text(p), "outer");
        let span = doc.children_by_tag(p, "span")[0];
        assert_eq!(doc.text(span), "inner");
    }

    #[test]
    fn remove_and_clear_children() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        doc.append_child(doc.root(), parent);
        let a = doc.create_element("span");
        let b = doc.create_element("span");
        doc.append_child(parent, a);
        doc.append_child(parent, b);
        doc.remove_child(parent, a);
        assert_eq!(doc.children(parent), &[b]);
        doc.clear_children(parent);
        assert!(doc.children(parent).is_empty());
    }

    #[test]
    fn removed_nodes_are_recycled() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        doc.append_child(doc.root(), parent);
        let img = doc.create_element("img");
        doc.set_attribute(img, "src", "a.svg");
        doc.append_child(parent, img);

        let len = doc.len();
        for _ in 0..100 {
            let old = doc.children_by_tag(parent, "img")[0];
            doc.remove_child(parent, old);
            let fresh = doc.create_element("img");
            doc.append_child(parent, fresh);
        }
        assert_eq!(doc.len(), len);

        // recycled slots come back clean
        let last = doc.children_by_tag(parent, "img")[0];
        assert_eq!(doc.get_attribute(last, "src"), None);
        assert_eq!(doc.text(last), "");
    }

    #[test]
    fn clear_children_recycles_whole_subtrees() {
        let mut doc = Document::new();
        let container = doc.create_element("div");
        doc.append_child(doc.root(), container);
        let cell = doc.create_element("div");
        doc.append_child(container, cell);
        let img = doc.create_element("img");
        doc.append_child(cell, img);

        let len = doc.len();
        doc.clear_children(container);
        let cell = doc.create_element("div");
        doc.append_child(container, cell);
        let img = doc.create_element("img");
        doc.append_child(cell, img);
        assert_eq!(doc.len(), len);
    }

    #[test]
    fn reappend_moves_between_parents() {
        let mut doc = Document::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        doc.append_child(doc.root(), first);
        doc.append_child(doc.root(), second);
        let img = doc.create_element("img");
        doc.append_child(first, img);
        doc.append_child(second, img);
        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[img]);
    }

    #[test]
    fn attribute_escaping() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attribute(div, "title", "a<\"b\">&c");
        doc.append_child(doc.root(), div);
        assert!(doc.to_html().contains("title=\"a&lt;&quot;b&quot;&gt;&amp;c\""));
    }

    impl Document {
        // test helper: first element with the tag anywhere in the tree
        fn first_by_tag(&self, tag: &str) -> NodeId {
            let mut stack = vec![self.root()];
            while let Some(id) = stack.pop() {
                if self.tag(id) == tag {
                    return id;
                }
                for child in self.children(id).iter().rev() {
                    stack.push(*child);
                }
            }
            panic!("no <{}> in document", tag);
        }
    }
}
