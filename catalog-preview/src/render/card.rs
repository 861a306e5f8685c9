//! Element construction for product cards and loading skeletons.

use crate::catalog::DisplayItem;
use crate::view::{ElementSpec, NodeId, ViewError, ViewTree};

/// Class carried by every product card and skeleton card.
pub const CARD_CLASS: &str = "product-card";

/// Builds a detached product card for one item.
///
/// ```text
/// article.product-card[role=listitem][aria-label=name]
///   div.product-media > img[src][alt][loading=lazy]
///   div.product-body  > h3.product-title, p.product-price
/// ```
pub fn build_card(tree: &dyn ViewTree, item: &DisplayItem) -> Result<NodeId, ViewError> {
    let card = tree.create_element(
        ElementSpec::new("article")
            .class(CARD_CLASS)
            .attr("role", "listitem")
            .attr("aria-label", item.name.as_str()),
    );

    let media = tree.create_element(ElementSpec::new("div").class("product-media"));
    let img = tree.create_element(
        ElementSpec::new("img")
            .attr("src", item.image_url.as_str())
            .attr("alt", item.name.as_str())
            .attr("loading", "lazy"),
    );
    tree.append_child(media, img)?;

    let body = tree.create_element(ElementSpec::new("div").class("product-body"));
    let title = tree.create_element(
        ElementSpec::new("h3")
            .class("product-title")
            .attr("title", item.name.as_str())
            .text(item.name.as_str()),
    );
    let price = tree.create_element(
        ElementSpec::new("p")
            .class("product-price")
            .text(item.formatted_price()),
    );
    tree.append_child(body, title)?;
    tree.append_child(body, price)?;

    tree.append_child(card, media)?;
    tree.append_child(card, body)?;
    Ok(card)
}

/// Builds a detached placeholder card shown while loading.
pub fn build_skeleton(tree: &dyn ViewTree) -> Result<NodeId, ViewError> {
    let card = tree.create_element(ElementSpec::new("div").class(CARD_CLASS));
    let media = tree.create_element(ElementSpec::new("div").class("product-media skeleton"));
    let body = tree.create_element(ElementSpec::new("div").class("product-body"));
    let title_line = tree.create_element(
        ElementSpec::new("div")
            .class("skeleton")
            .attr("style", "height:18px;border-radius:8px"),
    );
    let price_line = tree.create_element(
        ElementSpec::new("div")
            .class("skeleton")
            .attr("style", "height:14px;width:40%;border-radius:8px"),
    );

    tree.append_child(body, title_line)?;
    tree.append_child(body, price_line)?;
    tree.append_child(card, media)?;
    tree.append_child(card, body)?;
    Ok(card)
}
