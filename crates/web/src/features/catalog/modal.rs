//! Product detail overlay.
//!
//! The overlay owns its open/closed state. Until the first open the root is
//! an empty hidden placeholder; closing clears its content. Dismissal rules are
//! rendered as data attributes on the root and the page script acts on
//! exactly those: backdrop clicks, the keys in `data-dismiss-keys`, and any
//! `[data-modal-close]` element.

use storefront_storage::models::Product;
use url::form_urlencoded;

use crate::html::{Node, el};

pub const MODAL_ROOT_ID: &str = "product-modal-root";

/// Keys that close the overlay, as reported by `KeyboardEvent.key`.
pub const DISMISS_KEYS: [&str; 2] = ["Escape", "Esc"];

#[derive(Debug, Clone, PartialEq)]
struct Opened {
    content: Node,
    image_url: String,
}

#[derive(Debug, Default)]
pub struct ModalOverlay {
    opened: Option<Opened>,
    /// Search text restored by the close link when the script is not running.
    search: String,
}

impl ModalOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn open(&mut self, content: Node, product: &Product) {
        self.opened = Some(Opened {
            content,
            image_url: product.image().unwrap_or_default().to_string(),
        });
    }

    pub fn close(&mut self) {
        self.opened = None;
    }

    /// Catalog URL the close link returns to, keeping the active search.
    pub fn close_href(&self) -> String {
        if self.search.is_empty() {
            return "/".to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.search)
            .finish();
        format!("/?{}", query)
    }

    pub fn render(&self) -> Node {
        let root = el("div")
            .attr("id", MODAL_ROOT_ID)
            .attr("data-dismiss-keys", DISMISS_KEYS.join(" "))
            .attr("data-backdrop-dismiss", "");
        let base = "position:fixed;inset:0;align-items:center;justify-content:center;background:rgba(0,0,0,.55);z-index:9999";

        let Some(Opened { content, image_url }) = &self.opened else {
            return root.style(format!("{base};display:none")).into();
        };

        let image_pane = el("div")
            .style("flex:0 0 45%;width:100%;background:#fff;overflow:hidden")
            .child(
                el("img")
                    .attr("loading", "lazy")
                    .attr("src", image_url.clone())
                    .style("width:100%;height:100%;object-fit:contain;display:block"),
            );

        let detail_pane = el("div")
            .style("flex:1;padding:20px 22px;color:#222;display:flex;flex-direction:column;justify-content:center;gap:6px")
            .child(content.clone());

        let card = el("div")
            .attr("data-modal-content", "")
            .style("width:min(880px,95vw);max-height:90vh;background:#f8f8f8;border-radius:18px;box-shadow:0 12px 36px rgba(0,0,0,.45);overflow:hidden;display:flex;flex-wrap:wrap")
            .child(image_pane)
            .child(detail_pane);

        let close_button = el("a")
            .attr("href", self.close_href())
            .attr("data-modal-close", "")
            .attr("aria-label", "Kapat")
            .style("position:absolute;right:16px;top:12px;font-size:22px;cursor:pointer;color:#111;background:rgba(255,255,255,0.9);border-radius:50%;width:36px;height:36px;display:flex;align-items:center;justify-content:center;z-index:10001;text-decoration:none")
            .text("✖");

        let wrapper = el("div")
            .style("position:relative;width:100%;display:flex;align-items:center;justify-content:center")
            .child(card)
            .child(close_button);

        root.style(format!("{base};display:flex"))
            .child(wrapper)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::view::tests::product;
    use crate::html::{Element, text};

    fn opened() -> ModalOverlay {
        let mut modal = ModalOverlay::new();
        let mut p = product(1, "Çay", Some(1));
        p.image_url = Some("data:image/png;base64,AAAA".to_string());
        modal.open(text("Çay"), &p);
        modal
    }

    fn root(node: &Node) -> &Element {
        node.find_by_id(MODAL_ROOT_ID).unwrap()
    }

    #[test]
    fn test_unopened_overlay_renders_empty_hidden_root() {
        let node = ModalOverlay::new().render();
        let root = root(&node);
        assert!(root.get_attr("style").unwrap().ends_with("display:none"));
        assert_eq!(node.text_content(), "");
    }

    #[test]
    fn test_open_fills_image_and_detail_panes() {
        let html = opened().render().render();
        assert!(html.contains("display:flex"));
        assert!(html.contains("src=\"data:image/png;base64,AAAA\""));
        assert!(html.contains("aria-label=\"Kapat\""));
        assert!(html.contains(">Çay<"));
    }

    #[test]
    fn test_close_hides_and_clears() {
        let mut modal = opened();
        modal.close();

        let html = modal.render().render();
        assert!(html.contains("display:none"));
        assert!(!html.contains("Çay"));
    }

    #[test]
    fn test_root_carries_dismissal_rules() {
        for modal in [ModalOverlay::new(), opened()] {
            let node = modal.render();
            let root = root(&node);
            assert_eq!(root.get_attr("data-dismiss-keys"), Some("Escape Esc"));
            assert_eq!(root.get_attr("data-backdrop-dismiss"), Some(""));
        }
    }

    #[test]
    fn test_clicks_inside_card_are_marked_as_content() {
        let html = opened().render().render();
        assert!(html.contains("data-modal-content=\"\""));
        assert_eq!(html.matches("data-modal-close").count(), 1);
    }

    #[test]
    fn test_close_link_keeps_search() {
        assert_eq!(ModalOverlay::new().close_href(), "/");
        assert_eq!(
            ModalOverlay::new().with_search("şiş kebap").close_href(),
            "/?q=%C5%9Fi%C5%9F+kebap"
        );

        let mut modal = ModalOverlay::new().with_search("çay&su");
        modal.open(text("Çay"), &product(1, "Çay", Some(1)));
        assert!(modal.render().render().contains("href=\"/?q=%C3%A7ay%26su\""));
    }
}
