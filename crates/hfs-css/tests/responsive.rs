use hfs_css::{ColorRgba, MediaEnvironment, StyleResolver, parse_color, try_parse_color};
use hfs_dom::{Document, Window};

#[test]
fn computed_styles_follow_the_window() {
    let mut doc = Document::default();
    let body = doc.body();
    let grid = doc.create_element_in(body, "div");
    let tree = doc.tree_mut();
    tree.set_style(grid, "display", "grid");
    tree.set_style_in_media(grid, "@media (max-width: 767px)", "display", "block");
    tree.set_style_in_media(grid, "screen and (min-width: 768px) and (max-width: 1023px)", "display", "flex");

    let display = |window: &Window| {
        StyleResolver::new(MediaEnvironment::from_window(window))
            .computed_value(doc.tree(), grid, "display")
            .to_string()
    };

    assert_eq!(display(&Window::new(375, 667)), "block");
    assert_eq!(display(&Window::new(768, 1024)), "flex");
    assert_eq!(display(&Window::new(1280, 800)), "grid");
}

#[test]
fn reduced_motion_preference_reaches_media_queries() {
    let mut doc = Document::default();
    let body = doc.body();
    let wave = doc.create_element_in(body, "div");
    let tree = doc.tree_mut();
    tree.set_style(wave, "animation-duration", "8s");
    tree.set_style_in_media(wave, "(prefers-reduced-motion: reduce)", "animation-duration", "0s");

    let window = Window::default();
    let duration = |window: &Window| {
        StyleResolver::new(MediaEnvironment::from_window(window))
            .computed_value(doc.tree(), wave, "animation-duration")
            .to_string()
    };
    assert_eq!(duration(&window), "8s");
    window.set_prefers_reduced_motion(true);
    assert_eq!(duration(&window), "0s");
}

#[test]
fn soft_color_parse_defaults_to_black_but_strict_parse_fails() {
    assert_eq!(parse_color("rgb(255,255,255)"), ColorRgba::WHITE);
    assert_eq!(parse_color("linear-gradient(red, blue)"), ColorRgba::BLACK);
    assert!(try_parse_color("linear-gradient(red, blue)").is_err());
    assert_eq!(try_parse_color("#000"), Ok(ColorRgba::BLACK));
}
