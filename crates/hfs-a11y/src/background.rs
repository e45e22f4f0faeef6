//! Effective background
//!
//! Text rarely sits on its own background; the painted color behind it
//! usually comes from an ancestor.

use hfs_css::{ColorRgba, CssError, StyleResolver, try_parse_color};
use hfs_dom::{DomTree, NodeId};

/// The opaque color painted behind `id`.
///
/// Backgrounds on `id` and its ancestor elements are stacked until an
/// opaque one is found, then composited bottom-up. Opaque white (the
/// canvas) sits under everything.
///
/// Fails if a background on the way up cannot be parsed: guessing past
/// it could report a contrast the user never sees.
pub fn effective_background(
    tree: &DomTree,
    id: NodeId,
    styles: &StyleResolver,
) -> Result<ColorRgba, CssError> {
    let chain = std::iter::once(id)
        .chain(tree.ancestors(id))
        .filter(|&node| tree.is_element(node));

    let mut layers = Vec::new();
    let mut base = ColorRgba::WHITE;
    for node in chain {
        let value = styles.computed_value(tree, node, "background-color");
        if value.eq_ignore_ascii_case("transparent") {
            continue;
        }
        let color = try_parse_color(value)?;
        if color.is_opaque() {
            base = color;
            break;
        }
        if !color.is_transparent() {
            layers.push(color);
        }
    }

    Ok(layers.into_iter().rev().fold(base, |below, layer| layer.composite_over(below)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfs_css::MediaEnvironment;

    fn styles() -> StyleResolver {
        StyleResolver::new(MediaEnvironment::new(1280.0, 800.0))
    }

    #[test]
    fn test_walks_to_first_painted_ancestor() {
        let mut tree = DomTree::new();
        let section = tree.create_element("section");
        let card = tree.create_element("div");
        let p = tree.create_element("p");
        tree.append_child(tree.root(), section);
        tree.append_child(section, card);
        tree.append_child(card, p);
        tree.set_style(section, "background-color", "rgb(30, 27, 75)");
        tree.set_style(card, "background-color", "transparent");

        assert_eq!(effective_background(&tree, p, &styles()), Ok(ColorRgba::rgb(30, 27, 75)));
    }

    #[test]
    fn test_defaults_to_white() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        tree.append_child(tree.root(), p);
        tree.set_style(p, "background-color", "rgba(10, 10, 10, 0)");

        assert_eq!(effective_background(&tree, p, &styles()), Ok(ColorRgba::WHITE));
    }

    #[test]
    fn test_translucent_layers_stack_on_painted_ancestor() {
        let mut tree = DomTree::new();
        let section = tree.create_element("section");
        let card = tree.create_element("div");
        let p = tree.create_element("p");
        tree.append_child(tree.root(), section);
        tree.append_child(section, card);
        tree.append_child(card, p);
        tree.set_style(section, "background-color", "#1e1b4b");
        tree.set_style(card, "background-color", "rgba(255, 255, 255, 0.1)");

        let bg = effective_background(&tree, p, &styles()).unwrap();
        assert!(bg.is_opaque());
        assert_eq!(bg, ColorRgba::rgba(255, 255, 255, 0.1).composite_over(ColorRgba::rgb(30, 27, 75)));
    }

    #[test]
    fn test_translucent_without_painted_ancestor_sits_on_white() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div);
        tree.set_style(div, "background-color", "rgba(0, 0, 0, 0.5)");

        let bg = effective_background(&tree, div, &styles()).unwrap();
        assert_eq!(bg, ColorRgba::rgb(128, 128, 128));
    }

    #[test]
    fn test_unparsable_background_is_an_error() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div);
        tree.set_style(div, "background-color", "var(--brand)");

        assert!(effective_background(&tree, div, &styles()).is_err());
    }
}
