//! Minimal escaping HTML tree.
//!
//! Views build `Node`s; text and attribute values are escaped when rendered,
//! so user-entered fields can never inject markup.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Trusted markup from this crate only (inline scripts and styles).
    Raw(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

const VOID_TAGS: &[&str] = &["br", "img", "input", "meta", "link"];

/// Starts an element, like `document.createElement(tag)`.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn attr_if(self, condition: bool, name: &'static str, value: impl Into<String>) -> Self {
        if condition { self.attr(name, value) } else { self }
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn style(self, value: impl Into<String>) -> Self {
        self.attr("style", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::Text(value.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn tag(&self) -> &str {
        self.tag
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Node::Text(value) => escape_into(out, value),
            Node::Raw(markup) => out.push_str(markup),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(out, value);
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.render_into(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }

    /// Depth-first search for the first element with `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        match self {
            Node::Element(element) if element.get_attr("id") == Some(id) => Some(element),
            Node::Element(element) => element.children.iter().find_map(|c| c.find_by_id(id)),
            _ => None,
        }
    }

    /// All elements carrying `class` among their classes, in document order.
    pub fn find_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if element
                .get_attr("class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class))
            {
                found.push(element);
            }
            for child in &element.children {
                child.find_by_class(class, found);
            }
        }
    }

    /// Concatenated text content.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(value) => value.clone(),
            Node::Raw(_) => String::new(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

/// Wraps `body` in a full document.
pub fn page(title: &str, body: Vec<Node>) -> String {
    let document = el("html").attr("lang", "tr").child(
        el("head")
            .child(el("meta").attr("charset", "utf-8"))
            .child(
                el("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(el("title").text(title))
            .child(Node::Raw(BASE_STYLE)),
    );
    let document = document.child(el("body").children(body));
    format!("<!DOCTYPE html>{}", Node::from(document).render())
}

const BASE_STYLE: &str = "<style>\
body{font-family:system-ui,sans-serif;margin:0;background:#faf7f2;color:#222}\
.kategori{margin:12px auto;max-width:960px}\
.kategori-header{font-size:20px;font-weight:600;padding:10px 14px;background:#fff;border-radius:10px}\
.urunler{grid-template-columns:repeat(auto-fill,minmax(180px,1fr));gap:12px;padding:12px}\
.urun{background:#fff;border-radius:12px;padding:8px;cursor:pointer}\
.urun img{width:100%;height:140px;object-fit:cover;border-radius:8px}\
.alert{background:#fdecea;color:#c62828;padding:12px;margin:12px auto;max-width:960px;border-radius:8px}\
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #ddd;padding:6px;text-align:left}\
.btn{padding:6px 10px;border-radius:8px;border:0;cursor:pointer}.btn.danger{background:#c62828;color:#fff}.btn.muted{background:#eee}\
</style>";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node: Node = el("p")
            .attr("title", "\"x\" & 'y'")
            .text("<script>alert(1)</script>")
            .into();

        assert_eq!(
            node.render(),
            "<p title=\"&quot;x&quot; &amp; &#39;y&#39;\">&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node: Node = el("div")
            .child(el("img").attr("src", "a.png"))
            .child(el("br"))
            .into();
        assert_eq!(node.render(), "<div><img src=\"a.png\"><br></div>");
    }

    #[test]
    fn test_find_helpers() {
        let node: Node = el("div")
            .child(el("span").attr("id", "a").class("ok don").text("▼"))
            .child(el("span").class("ok").text("x"))
            .into();

        assert_eq!(node.find_by_id("a").map(Element::tag), Some("span"));
        let mut found = Vec::new();
        node.find_by_class("ok", &mut found);
        assert_eq!(found.len(), 2);
        assert_eq!(node.text_content(), "▼x");
    }

    #[test]
    fn test_attributes_render_in_insertion_order() {
        let node: Node = el("a")
            .attr("href", "/?q=a&b")
            .attr("data-modal-close", "")
            .text("x")
            .into();
        assert_eq!(
            node.render(),
            "<a href=\"/?q=a&amp;b\" data-modal-close=\"\">x</a>"
        );
    }

    #[test]
    fn test_page_escapes_title() {
        let html = page("<Menü>", vec![]);
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"tr\">"));
        assert!(html.contains("<title>&lt;Menü&gt;</title>"));
    }
}
