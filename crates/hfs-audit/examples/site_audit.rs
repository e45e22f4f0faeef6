//! Example: audit a synthetic Healing Frequency Space landing page
//!
//! Run with `RUST_LOG=debug` to see every rule and resize event.

use hfs_audit::{AuditConfig, AuditRunner, MemoryStorage, load_report, persist_report};
use hfs_devtools::{DeviceProfile, TimerFrameSource};
use hfs_dom::{DOMRect, Document, NodeId, Window};
use tracing_subscriber::EnvFilter;

fn section(doc: &mut Document, parent: NodeId, heading_tag: &str, heading: &str, background: &str) -> NodeId {
    let section = doc.create_element_in(parent, "section");
    let h = doc.create_element_in(section, heading_tag);
    doc.append_text(h, heading);
    doc.tree_mut().set_style(section, "background-color", background);
    section
}

fn build_page() -> Document {
    let mut doc = Document::new("https://healingfrequency.space/");
    doc.set_title("The Healing Frequency Space");
    let body = doc.body();

    let header = doc.create_element_in(body, "header");
    let nav = doc.create_element_in(header, "nav");
    let links = doc.create_element_in(nav, "div");
    for (label, href) in [("About", "#about"), ("Services", "#services"), ("Contact", "#contact")] {
        let a = doc.create_element_in(links, "a");
        doc.append_text(a, label);
        doc.tree_mut().set_attribute(a, "href", href);
        doc.tree_mut().set_bounding_rect(a, DOMRect::from_xywh(800.0, 20.0, 90.0, 32.0));
    }
    doc.tree_mut().set_style_in_media(links, "(max-width: 767px)", "display", "none");
    let burger = doc.create_element_in(nav, "button");
    doc.tree_mut().set_bounding_rect(burger, DOMRect::from_xywh(1220.0, 16.0, 40.0, 40.0));

    let main = doc.create_element_in(body, "main");
    let hero = section(&mut doc, main, "h1", "Find your frequency", "#1e1b4b");
    let tagline = doc.create_element_in(hero, "p");
    doc.append_text(tagline, "Sound baths, reiki and breathwork in the heart of the city.");
    let orb = doc.create_element_in(hero, "div");
    let cta = doc.create_element_in(hero, "a");
    doc.append_text(cta, "Book a session");

    let services = section(&mut doc, main, "h3", "Services", "#faf5ff");
    let card = doc.create_element_in(services, "div");
    doc.append_text(card, "Crystal bowl sound bath");

    let footer = doc.create_element_in(body, "footer");
    doc.append_text(footer, "© The Healing Frequency Space");

    let tree = doc.tree_mut();
    tree.set_style(hero, "color", "#e9d5ff");
    tree.set_style(tagline, "color", "rgba(233, 213, 255, 0.6)");
    tree.set_attribute(orb, "class", "orb");
    tree.set_style(orb, "animation-name", "float, glow");
    tree.set_style(orb, "animation-duration", "6s, 3s");
    tree.set_attribute(cta, "href", "/book");
    tree.set_style(cta, "color", "#ffffff");
    tree.set_style(cta, "background-color", "#a78bfa");
    tree.set_bounding_rect(hero, DOMRect::from_xywh(0.0, 72.0, 1280.0, 640.0));
    tree.set_bounding_rect(cta, DOMRect::from_xywh(40.0, 520.0, 200.0, 48.0));
    tree.set_bounding_rect(card, DOMRect::from_xywh(40.0, 760.0, 420.0, 240.0));
    tree.set_style(card, "color", "#9ca3af");
    doc
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let doc = build_page();
    let window = Window::default();
    let config = AuditConfig::default()
        .with_viewports(vec![
            DeviceProfile::find("iPhone SE").ok_or_else(|| anyhow::anyhow!("unknown device"))?,
            DeviceProfile::find("iPad Mini").ok_or_else(|| anyhow::anyhow!("unknown device"))?,
        ])
        .with_sampling(500);

    let mut frames = TimerFrameSource::new();
    let report = smol::block_on(AuditRunner::new(config).run(&doc, &window, Some(&mut frames)))?;
    report.log_report();

    let mut storage = MemoryStorage::new();
    persist_report(&mut storage, &report)?;
    let stored = load_report(&storage)?.ok_or_else(|| anyhow::anyhow!("report was not stored"))?;

    println!("{}", stored.to_json_pretty()?);
    println!("Score: {}/100 ({} issues, {} skipped)", stored.summary.score, stored.summary.total_issues, stored.summary.skipped);
    Ok(())
}
