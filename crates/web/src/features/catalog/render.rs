use crate::html::{Element, Node, el, text};

use super::modal::ModalOverlay;
use super::view::{CatalogView, CategorySection, ProductCard, ProductDetail};

pub const TREE_CONTAINER_ID: &str = "dynamic-content";

/// Tree of collapsible category sections, plus the empty-catalog banner.
pub fn render_tree(view: &CatalogView) -> Node {
    let mut container = el("div").attr("id", TREE_CONTAINER_ID);

    if let Some(warning) = &view.warning {
        container = container.child(
            el("div")
                .class("alert")
                .attr("role", "alert")
                .style("color:red;padding:12px")
                .text(warning.clone()),
        );
    }

    container
        .children(view.sections.iter().map(render_section))
        .into()
}

fn render_section(section: &CategorySection) -> Element {
    let indicator = el("span")
        .class(if section.expanded { "ok don" } else { "ok" })
        .style(format!(
            "margin-left:8px;color:{}",
            section.indicator.color()
        ))
        .text("▼");

    let head = el("div")
        .class("kategori-header")
        .style("cursor:pointer")
        .text(section.name.clone())
        .child(indicator);

    let grid = el("div")
        .class("urunler")
        .style(if section.expanded {
            "display:grid"
        } else {
            "display:none"
        });

    let grid = if section.products.is_empty() {
        grid.child(
            el("div")
                .class("urun")
                .style("opacity:.7;padding:8px")
                .text("Ürün yok"),
        )
    } else {
        grid.children(section.products.iter().map(render_card))
    };

    el("div")
        .class("kategori")
        .attr("data-category-id", section.category_id.to_string())
        .child(head)
        .child(grid)
}

fn render_card(card: &ProductCard) -> Element {
    el("div")
        .class("urun")
        .attr("data-product-id", card.id.to_string())
        .child(
            el("img")
                .attr("src", card.image_url.clone())
                .attr("alt", card.name.clone())
                .attr("loading", "lazy"),
        )
        .child(el("p").text(card.name.clone()))
        .child(
            el("p")
                .style("font-size:13px;color:#555;")
                .text(card.subtitle.clone()),
        )
        .child(
            el("p")
                .style("font-weight:600;color:#2e7d32;")
                .text(card.price_label.clone()),
        )
}

/// Detail pane content handed to the modal.
pub fn render_detail(detail: &ProductDetail) -> Node {
    let mut description = el("p").style("font-size:14px;line-height:1.5;margin-top:10px;white-space:normal");
    for (i, line) in detail.description_lines.iter().enumerate() {
        if i > 0 {
            description = description.child(el("br"));
        }
        description = description.child(text(line.clone()));
    }

    el("div")
        .child(
            el("h2")
                .style("margin-bottom:4px;font-size:22px")
                .text(detail.name.clone()),
        )
        .child(
            el("h4")
                .style("color:#555;margin-top:0;font-size:15px")
                .text(detail.subtitle.clone()),
        )
        .child(description)
        .child(
            el("p")
                .style("font-weight:700;font-size:18px;margin-top:10px;color:#2e7d32")
                .text(detail.price_label.clone()),
        )
        .into()
}

fn search_bar(search: &str) -> Node {
    el("div")
        .style("text-align:center;margin:20px 0")
        .child(
            el("form").attr("method", "get").attr("action", "/").child(
                el("input")
                    .attr("id", "search")
                    .attr("name", "q")
                    .attr("type", "text")
                    .attr("autocomplete", "off")
                    .attr("placeholder", "Ürün veya kategori ara...")
                    .attr("value", search.to_string())
                    .style("width:80%;max-width:420px;padding:10px 14px;border:1px solid #ccc;border-radius:10px;font-size:15px"),
            ),
        )
        .into()
}

pub const ALERT_ID: &str = "catalog-alert";

/// Alert banner slot. Always present so the page script can fill it.
fn alert_slot(alert: Option<&str>) -> Node {
    el("div")
        .attr("id", ALERT_ID)
        .class("alert")
        .attr("role", "alert")
        .attr_if(alert.is_none(), "hidden", "")
        .text(alert.unwrap_or_default().to_string())
        .into()
}

/// Full catalog document: search box, alert slot, tree, modal root and the
/// page script.
pub fn render_catalog_page(view: &CatalogView, modal: &ModalOverlay, alert: Option<&str>) -> String {
    let body = vec![
        search_bar(&view.search),
        alert_slot(alert),
        render_tree(view),
        modal.render(),
        Node::Raw(CATALOG_SCRIPT),
    ];

    crate::html::page("Menü", body)
}

/// Browser glue: live search, category toggles and modal wiring. Only the
/// response to the latest keystroke is applied; failures fill the alert slot.
/// Modal dismissal follows the `data-*` rules on the overlay root. A page may
/// define `window.__customOpenModal(html, productId)` to take over opening.
const CATALOG_SCRIPT: &str = r#"<script>
(function(){
  const tree = () => document.getElementById('dynamic-content');
  const modalRoot = () => document.getElementById('product-modal-root');
  const alertBox = document.getElementById('catalog-alert');
  const input = document.getElementById('search');
  function showAlert(message){ alertBox.textContent = message; alertBox.hidden = false; }
  function clearAlert(){ alertBox.textContent = ''; alertBox.hidden = true; }
  async function failure(res){
    try { const body = await res.json(); if(body && body.error) return body.error; } catch(_) {}
    return 'İstek başarısız: ' + res.status;
  }
  function bindTree(){
    tree().querySelectorAll('.kategori-header').forEach(h => h.addEventListener('click', () => {
      const grid = h.nextElementSibling;
      grid.style.display = grid.style.display === 'none' ? 'grid' : 'none';
    }));
    tree().querySelectorAll('.urun[data-product-id]').forEach(c => c.addEventListener('click', () => openProduct(c.dataset.productId)));
  }
  function closeModal(){ const r = modalRoot(); if(r){ r.style.display = 'none'; r.innerHTML = ''; } }
  function bindModal(){
    const r = modalRoot(); if(!r) return;
    if('backdropDismiss' in r.dataset) r.addEventListener('click', e => { if(e.target === r) closeModal(); });
    r.querySelectorAll('[data-modal-close]').forEach(b => b.addEventListener('click', e => { e.preventDefault(); e.stopPropagation(); closeModal(); }));
  }
  async function openProduct(id){
    try {
      const res = await fetch('/catalog/products/' + encodeURIComponent(id) + '?q=' + encodeURIComponent(input.value.trim()));
      if(!res.ok){ showAlert(await failure(res)); return; }
      const html = await res.text();
      if(window.__customOpenModal) return window.__customOpenModal(html, id);
      modalRoot().outerHTML = html;
      bindModal();
    } catch(err) { showAlert(String(err)); }
  }
  document.addEventListener('keydown', e => {
    const r = modalRoot();
    if(r && (r.dataset.dismissKeys || '').split(' ').includes(e.key)) closeModal();
  });
  input.form.addEventListener('submit', e => e.preventDefault());
  let latest = 0;
  input.addEventListener('input', async () => {
    const seq = ++latest;
    try {
      const res = await fetch('/catalog/tree?q=' + encodeURIComponent(input.value.trim()));
      if(seq !== latest) return;
      if(!res.ok){ const message = await failure(res); if(seq === latest) showAlert(message); return; }
      const html = await res.text();
      if(seq !== latest) return;
      tree().outerHTML = html;
      clearAlert();
      bindTree();
    } catch(err) { if(seq === latest) showAlert(String(err)); }
  });
  bindTree();
  bindModal();
})();
</script>"#;
