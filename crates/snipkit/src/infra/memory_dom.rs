//! In-memory document
//!
//! [`MemoryDom`] implements [`DomHost`] over a small element tree so the DOM
//! helpers can run without a real UI host. It understands compound selectors
//! (`tag`, `#id`, `.class` and combinations such as `p.special`), inline styles,
//! class lists and raw markup fragments. Inserted markup is stored verbatim,
//! not parsed.

use super::dom::{AdjacentPosition, DomError, DomHost, ScrollBehavior};
use tracing::debug;

/// Handle to a node of a [`MemoryDom`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    /// Inline declarations in insertion order
    style: Vec<(String, String)>,
}

#[derive(Clone, Debug)]
enum NodeKind {
    Element(ElementData),
    Markup(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory document tree
#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    scrolls: Vec<(NodeId, ScrollBehavior)>,
    window: bool,
    document: bool,
    hidden: bool,
}

impl MemoryDom {
    /// Create a visible document with `<html>` and `<body>`
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            scrolls: Vec::new(),
            window: true,
            document: true,
            hidden: false,
        };
        dom.root = dom.create_element("html");
        dom.body = dom.create_element("body");
        dom.attach(dom.root, dom.body, None);
        dom
    }

    /// Create a document reporting no window and no document
    pub fn headless() -> Self {
        Self {
            window: false,
            document: false,
            ..Self::new()
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<body>` element
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            ..ElementData::default()
        }))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    ///
    /// # Errors
    ///
    /// Fails if either handle is not an element or if `child` contains `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?;
        self.element(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Hierarchy(format!(
                "{:?} cannot be appended to its own descendant {:?}",
                child, parent
            )));
        }
        self.detach(child);
        self.attach(parent, child, None);
        Ok(())
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DomError> {
        let el = self.create_element(tag);
        self.append_child(parent, el)?;
        Ok(el)
    }

    pub fn set_id(&mut self, el: NodeId, id: &str) -> Result<(), DomError> {
        self.element_mut(el)?.id = Some(id.to_string());
        Ok(())
    }

    /// Scroll requests received so far, oldest first
    pub fn scroll_log(&self) -> &[(NodeId, ScrollBehavior)] {
        &self.scrolls
    }

    /// Serialize `el` and its subtree
    pub fn outer_html(&self, el: NodeId) -> Result<String, DomError> {
        self.element(el)?;
        let mut out = String::new();
        self.write_node(el, &mut out);
        Ok(out)
    }

    /// Serialize the children of `el`
    pub fn inner_html(&self, el: NodeId) -> Result<String, DomError> {
        self.element(el)?;
        let mut out = String::new();
        for &child in &self.nodes[el.0].children {
            self.write_node(child, &mut out);
        }
        Ok(out)
    }

    // =========================================================================
    // Tree internals
    // =========================================================================

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        let children = &mut self.nodes[parent.0].children;
        match index {
            Some(i) => children.insert(i, child),
            None => children.push(child),
        }
        self.nodes[child.0].parent = Some(parent);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != child);
        }
    }

    fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Element(data)) => Ok(data),
            _ => Err(DomError::NotAnElement(format!("{:?}", id))),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(data)) => Ok(data),
            _ => Err(DomError::NotAnElement(format!("{:?}", id))),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.nodes[n.0].parent;
        }
        false
    }

    /// Elements reachable from the root, in document order
    fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if matches!(self.nodes[id.0].kind, NodeKind::Element(_)) {
                out.push(id);
            }
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Markup(html) => out.push_str(html),
            NodeKind::Element(data) => {
                out.push('<');
                out.push_str(&data.tag);
                if let Some(el_id) = &data.id {
                    out.push_str(&format!(" id=\"{}\"", el_id));
                }
                if !data.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", data.classes.join(" ")));
                }
                if !data.style.is_empty() {
                    out.push_str(&format!(" style=\"{}\"", serialize_style(&data.style)));
                }
                out.push('>');
                for &child in &node.children {
                    self.write_node(child, out);
                }
                out.push_str(&format!("</{}>", data.tag));
            }
        }
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl DomHost for MemoryDom {
    type Element = NodeId;

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        let compound = Compound::parse(selector)?;
        Ok(self.document_order().into_iter().find(|&id| {
            self.element(id)
                .map(|data| compound.matches(data))
                .unwrap_or(false)
        }))
    }

    fn computed_style(&self, el: NodeId, property: &str) -> Result<String, DomError> {
        let data = self.element(el)?;
        let name = css_property_name(property);
        let inline = data
            .style
            .iter()
            .find(|(prop, _)| *prop == name)
            .map(|(_, value)| value.clone());

        Ok(match inline {
            Some(value) => value,
            None if name == "display" => default_display(&data.tag).to_string(),
            None => String::new(),
        })
    }

    fn set_style(&mut self, el: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let name = css_property_name(property);
        let style = &mut self.element_mut(el)?.style;

        if let Some(pos) = style.iter().position(|(prop, _)| *prop == name) {
            if value.is_empty() {
                style.remove(pos);
            } else {
                style[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            style.push((name, value.to_string()));
        }
        Ok(())
    }

    fn class_contains(&self, el: NodeId, class_name: &str) -> Result<bool, DomError> {
        Ok(self.element(el)?.classes.iter().any(|c| c == class_name))
    }

    fn class_add(&mut self, el: NodeId, class_name: &str) -> Result<(), DomError> {
        let classes = &mut self.element_mut(el)?.classes;
        if !classes.iter().any(|c| c == class_name) {
            classes.push(class_name.to_string());
        }
        Ok(())
    }

    fn class_remove(&mut self, el: NodeId, class_name: &str) -> Result<(), DomError> {
        self.element_mut(el)?.classes.retain(|c| c != class_name);
        Ok(())
    }

    fn insert_adjacent_html(
        &mut self,
        el: NodeId,
        position: AdjacentPosition,
        html: &str,
    ) -> Result<(), DomError> {
        self.element(el)?;
        debug!(?el, ?position, len = html.len(), "insert_adjacent_html");

        match position {
            AdjacentPosition::AfterBegin | AdjacentPosition::BeforeEnd => {
                let fragment = self.push_node(NodeKind::Markup(html.to_string()));
                let index = (position == AdjacentPosition::AfterBegin).then_some(0);
                self.attach(el, fragment, index);
            }
            AdjacentPosition::BeforeBegin | AdjacentPosition::AfterEnd => {
                let parent = self.nodes[el.0].parent.ok_or_else(|| {
                    DomError::Hierarchy(format!("{:?} has no parent", el))
                })?;
                let at = self.nodes[parent.0]
                    .children
                    .iter()
                    .position(|&c| c == el)
                    .unwrap_or(0);
                let index = if position == AdjacentPosition::AfterEnd {
                    at + 1
                } else {
                    at
                };
                let fragment = self.push_node(NodeKind::Markup(html.to_string()));
                self.attach(parent, fragment, Some(index));
            }
        }
        Ok(())
    }

    fn scroll_into_view(&mut self, el: NodeId, behavior: ScrollBehavior) -> Result<(), DomError> {
        self.element(el)?;
        self.scrolls.push((el, behavior));
        Ok(())
    }

    fn contains(&self, parent: NodeId, child: NodeId) -> Result<bool, DomError> {
        self.element(parent)?;
        self.element(child)?;
        Ok(self.is_inclusive_ancestor(parent, child))
    }

    fn has_window(&self) -> bool {
        self.window
    }

    fn has_document(&self) -> bool {
        self.document
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

// =============================================================================
// Selectors
// =============================================================================

/// A compound selector: optional tag, optional id, any number of classes
#[derive(Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(selector: &str) -> Result<Self, DomError> {
        let unsupported = || DomError::UnsupportedSelector(selector.to_string());
        let selector_trimmed = selector.trim();
        if selector_trimmed.is_empty() {
            return Err(unsupported());
        }

        let mut compound = Self::default();
        let mut rest = selector_trimmed;

        let tag_len = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !is_ident(tag) {
                return Err(unsupported());
            }
            compound.tag = Some(tag.to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..len];
            if !is_ident(name) {
                return Err(unsupported());
            }
            match marker {
                '#' if compound.id.is_none() => compound.id = Some(name.to_string()),
                '.' => compound.classes.push(name.to_string()),
                _ => return Err(unsupported()),
            }
            rest = &body[len..];
        }

        Ok(compound)
    }

    fn matches(&self, data: &ElementData) -> bool {
        self.tag.as_ref().is_none_or(|tag| *tag == data.tag)
            && self
                .id
                .as_ref()
                .is_none_or(|id| data.id.as_ref() == Some(id))
            && self
                .classes
                .iter()
                .all(|class| data.classes.iter().any(|c| c == class))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

// =============================================================================
// Styles
// =============================================================================

/// Convert a camelCase property name to its CSS spelling (`fontSize` -> `font-size`)
fn css_property_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.trim().chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn default_display(tag: &str) -> &'static str {
    match tag {
        "html" | "body" | "div" | "p" | "ul" | "ol" | "section" | "article" | "header"
        | "footer" | "nav" | "main" | "form" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            "block"
        }
        "li" => "list-item",
        "head" | "script" | "style" | "title" | "template" => "none",
        "table" => "table",
        _ => "inline",
    }
}

fn serialize_style(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dom() -> (MemoryDom, NodeId, NodeId) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let div = dom.append_element(body, "div").unwrap();
        dom.set_id(div, "myId").unwrap();
        let p = dom.append_element(div, "p").unwrap();
        dom.class_add(p, "special").unwrap();
        (dom, div, p)
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    #[test]
    fn test_compound_parse() {
        let c = Compound::parse("p.special.big").unwrap();
        assert_eq!(c.tag.as_deref(), Some("p"));
        assert_eq!(c.classes, vec!["special", "big"]);

        let c = Compound::parse("#myId").unwrap();
        assert_eq!(c.id.as_deref(), Some("myId"));
    }

    #[test]
    fn test_compound_parse_rejects_combinators() {
        for selector in ["div p", "div > p", "a,b", "", "#a#b", "[href]", "p:hover"] {
            assert!(
                matches!(Compound::parse(selector), Err(DomError::UnsupportedSelector(_))),
                "selector {:?} should be rejected",
                selector
            );
        }
    }

    #[test]
    fn test_query_selector() {
        let (dom, div, p) = sample_dom();
        assert_eq!(dom.query_selector("#myId").unwrap(), Some(div));
        assert_eq!(dom.query_selector("p.special").unwrap(), Some(p));
        assert_eq!(dom.query_selector(".special").unwrap(), Some(p));
        assert_eq!(dom.query_selector("span").unwrap(), None);
        assert_eq!(dom.query_selector("body").unwrap(), Some(dom.body()));
    }

    #[test]
    fn test_query_selector_ignores_detached() {
        let mut dom = MemoryDom::new();
        let orphan = dom.create_element("aside");
        dom.set_id(orphan, "lost").unwrap();
        assert_eq!(dom.query_selector("#lost").unwrap(), None);
    }

    // =========================================================================
    // Styles and classes
    // =========================================================================

    #[test]
    fn test_style_roundtrip() {
        let (mut dom, _, p) = sample_dom();
        assert_eq!(dom.computed_style(p, "font-size").unwrap(), "");

        dom.set_style(p, "fontSize", "20px").unwrap();
        assert_eq!(dom.computed_style(p, "font-size").unwrap(), "20px");
        assert_eq!(dom.computed_style(p, "fontSize").unwrap(), "20px");

        dom.set_style(p, "font-size", "").unwrap();
        assert_eq!(dom.computed_style(p, "font-size").unwrap(), "");
    }

    #[test]
    fn test_default_display() {
        let (mut dom, div, _) = sample_dom();
        let span = dom.append_element(div, "span").unwrap();
        assert_eq!(dom.computed_style(div, "display").unwrap(), "block");
        assert_eq!(dom.computed_style(span, "display").unwrap(), "inline");
    }

    #[test]
    fn test_class_toggle() {
        let (mut dom, _, p) = sample_dom();
        assert!(!dom.class_toggle(p, "special").unwrap());
        assert!(!dom.class_contains(p, "special").unwrap());
        assert!(dom.class_toggle(p, "special").unwrap());
        assert!(dom.class_contains(p, "special").unwrap());
    }

    // =========================================================================
    // Tree changes
    // =========================================================================

    #[test]
    fn test_insert_adjacent_html_positions() {
        let (mut dom, div, p) = sample_dom();
        dom.insert_adjacent_html(p, AdjacentPosition::BeforeBegin, "<a>").unwrap();
        dom.insert_adjacent_html(p, AdjacentPosition::AfterEnd, "<b>").unwrap();
        dom.insert_adjacent_html(p, AdjacentPosition::AfterBegin, "1").unwrap();
        dom.insert_adjacent_html(p, AdjacentPosition::BeforeEnd, "2").unwrap();

        assert_eq!(
            dom.inner_html(div).unwrap(),
            "<a><p class=\"special\">12</p><b>"
        );
    }

    #[test]
    fn test_insert_adjacent_html_needs_parent() {
        let mut dom = MemoryDom::new();
        let root = dom.root();
        let result = dom.insert_adjacent_html(root, AdjacentPosition::AfterEnd, "<p>x</p>");
        assert!(matches!(result, Err(DomError::Hierarchy(_))));
    }

    #[test]
    fn test_append_child_rejects_cycle() {
        let (mut dom, div, p) = sample_dom();
        assert!(matches!(dom.append_child(p, div), Err(DomError::Hierarchy(_))));
        assert!(matches!(dom.append_child(div, div), Err(DomError::Hierarchy(_))));
    }

    #[test]
    fn test_append_child_moves_node() {
        let (mut dom, div, p) = sample_dom();
        let body = dom.body();
        dom.append_child(body, p).unwrap();
        assert_eq!(dom.inner_html(div).unwrap(), "");
        assert!(dom.contains(body, p).unwrap());
        assert!(!dom.contains(div, p).unwrap());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let (dom, div, p) = sample_dom();
        assert!(dom.contains(div, p).unwrap());
        assert!(dom.contains(p, p).unwrap());
        assert!(!dom.contains(p, div).unwrap());
    }

    #[test]
    fn test_outer_html() {
        let (mut dom, div, p) = sample_dom();
        dom.set_style(p, "color", "red").unwrap();
        assert_eq!(
            dom.outer_html(div).unwrap(),
            "<div id=\"myId\"><p class=\"special\" style=\"color: red;\"></p></div>"
        );
    }

    #[test]
    fn test_invalid_handle() {
        let dom = MemoryDom::new();
        let bogus = NodeId(999);
        assert!(matches!(
            dom.computed_style(bogus, "display"),
            Err(DomError::NotAnElement(_))
        ));
    }

    #[test]
    fn test_scroll_log() {
        let (mut dom, div, _) = sample_dom();
        dom.scroll_into_view(div, ScrollBehavior::Smooth).unwrap();
        assert_eq!(dom.scroll_log(), &[(div, ScrollBehavior::Smooth)]);
    }
}
