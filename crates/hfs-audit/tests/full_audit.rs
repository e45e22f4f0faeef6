use hfs_a11y::RuleId;
use hfs_audit::{
    AuditConfig, AuditRunner, MemoryStorage, REPORT_STORAGE_KEY, ReportStore, RunStatus, aggregate_at,
    load_report, persist_report,
};
use hfs_devtools::{DeviceProfile, SyntheticClock};
use hfs_dom::{DOMRect, Document, NodeId, Window};

/// Minimal landing page: header with nav, a hero with a call to action, a footer
fn landing_page() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new("https://healingfrequency.space/");
    let body = doc.body();

    let header = doc.create_element_in(body, "header");
    let nav = doc.create_element_in(header, "nav");
    let menu = doc.create_element_in(nav, "button");
    doc.tree_mut().set_attribute(menu, "aria-label", "Open menu");

    let main = doc.create_element_in(body, "main");
    let hero = doc.create_element_in(main, "section");
    let h1 = doc.create_element_in(hero, "h1");
    doc.append_text(h1, "Find your frequency");
    let cta = doc.create_element_in(hero, "button");
    doc.append_text(cta, "Book now");

    let footer = doc.create_element_in(body, "footer");
    doc.append_text(footer, "Made with care");

    let tree = doc.tree_mut();
    tree.set_style(hero, "background-color", "#1e1b4b");
    tree.set_style(h1, "color", "#ffffff");
    tree.set_style(cta, "color", "#ffffff");
    tree.set_style(cta, "background-color", "#7c3aed");
    tree.set_bounding_rect(menu, DOMRect::from_xywh(1200.0, 10.0, 48.0, 48.0));
    tree.set_bounding_rect(cta, DOMRect::from_xywh(40.0, 400.0, 180.0, 52.0));
    tree.set_bounding_rect(hero, DOMRect::from_xywh(0.0, 80.0, 1280.0, 600.0));

    (doc, hero, cta)
}

#[test]
fn clean_page_scores_full_marks() {
    let (doc, _, _) = landing_page();
    let window = Window::default();
    let report = smol::block_on(AuditRunner::default().run(&doc, &window, None::<&mut SyntheticClock>)).unwrap();

    assert_eq!(report.summary.total_issues, 0, "{:#?}", report.issues().collect::<Vec<_>>());
    assert_eq!(report.summary.score, 100);
    assert!(report.recommendations.is_empty());
}

#[test]
fn device_scan_finds_overflow_only_on_phone() {
    let (mut doc, hero, _) = landing_page();
    // The hero keeps a fixed desktop width on every breakpoint
    doc.tree_mut().set_bounding_rect(hero, DOMRect::from_xywh(0.0, 80.0, 1024.0, 600.0));

    let config = AuditConfig::default()
        .with_rules(&[RuleId::ViewportOverflow])
        .with_viewports(vec![
            DeviceProfile::find("iPhone SE").unwrap(),
            DeviceProfile::find("Desktop").unwrap(),
        ]);
    let window = Window::default();
    let report = smol::block_on(AuditRunner::new(config).run(&doc, &window, None::<&mut SyntheticClock>)).unwrap();

    let contexts: Vec<Option<&str>> = report.issues().map(|f| f.context.as_deref()).collect();
    assert!(!contexts.is_empty());
    assert!(contexts.iter().all(|c| *c == Some("iPhone SE")));
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].rule, RuleId::ViewportOverflow);
    assert_eq!(window.inner_width(), 1280);
}

#[test]
fn mobile_only_button_overlaps_logo_on_phone() {
    let (mut doc, _, _) = landing_page();
    let header = doc.tree().elements_by_tag_name(doc.tree().root(), "header")[0];
    let logo = doc.create_element_in(header, "span");
    doc.append_text(logo, "The Healing Frequency Space");
    let burger = doc.create_element_in(header, "button");
    doc.tree_mut().set_attribute(burger, "aria-label", "Menu");
    doc.tree_mut().set_bounding_rect(logo, DOMRect::from_xywh(16.0, 16.0, 320.0, 32.0));
    doc.tree_mut().set_bounding_rect(burger, DOMRect::from_xywh(300.0, 10.0, 44.0, 44.0));
    doc.tree_mut().set_style_in_media(burger, "(min-width: 768px)", "display", "none");

    let config = AuditConfig::default()
        .with_rules(&[RuleId::ElementOverlap])
        .with_viewports(vec![
            DeviceProfile::find("iPhone SE").unwrap(),
            DeviceProfile::find("iPad Pro").unwrap(),
        ]);
    let window = Window::default();
    let report = smol::block_on(AuditRunner::new(config).run(&doc, &window, None::<&mut SyntheticClock>)).unwrap();

    let issues: Vec<(&str, Option<&str>)> =
        report.issues().map(|f| (f.target.tag.as_str(), f.context.as_deref())).collect();
    assert_eq!(issues, vec![("span", Some("iPhone SE")), ("button", Some("iPhone SE"))]);
    assert_eq!(report.recommendations[0].rule, RuleId::ElementOverlap);
    assert_eq!(report.recommendations[0].occurrences, 2);
}

#[test]
fn frozen_window_aborts_device_scans_but_keeps_live_results() {
    let (doc, _, _) = landing_page();
    let window = Window::default();
    window.freeze_dimensions();

    let config = AuditConfig::default().with_viewports(DeviceProfile::catalog());
    let report = smol::block_on(AuditRunner::new(config).run(&doc, &window, None::<&mut SyntheticClock>)).unwrap();

    assert_eq!(report.viewports.len(), 7);
    assert!(report.viewports.iter().all(|run| matches!(run.status, RunStatus::Aborted { .. })));
    assert!(!report.findings.is_empty());
    assert!(report.findings.iter().all(|f| f.context.is_none()));
}

#[test]
fn unparsable_color_is_reported_as_skipped() {
    let (mut doc, _, cta) = landing_page();
    doc.tree_mut().set_style(cta, "color", "color-mix(in srgb, white, violet)");

    let config = AuditConfig::default().with_rules(&[RuleId::ColorContrast]);
    let window = Window::default();
    let report = smol::block_on(AuditRunner::new(config).run(&doc, &window, None::<&mut SyntheticClock>)).unwrap();

    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.skipped[0].target.tag, "button");
    assert!(report.findings.iter().all(|f| f.target.tag != "button"));
}

#[test]
fn sampled_report_survives_storage() {
    let (doc, _, _) = landing_page();
    let window = Window::default();
    let mut clock = SyntheticClock::new(16.667);
    let config = AuditConfig::default().with_sampling(1000);
    let report = smol::block_on(AuditRunner::new(config).run(&doc, &window, Some(&mut clock))).unwrap();

    let perf = report.performance.expect("performance summary");
    assert!((perf.avg_fps - 60.0).abs() < 0.01);

    let mut store = MemoryStorage::new();
    persist_report(&mut store, &report).unwrap();
    let stored = store.get_item(REPORT_STORAGE_KEY).unwrap();
    assert!(stored.contains("\"avgFPS\""));
    assert_eq!(load_report(&store).unwrap(), Some(report));
}

#[test]
fn aggregation_ignores_run_order_of_identical_input() {
    let (doc, _, _) = landing_page();
    let window = Window::default();
    let outcome = AuditRunner::default().audit_static(&doc, &window);

    let first = aggregate_at(&outcome.findings, 0);
    let second = aggregate_at(&outcome.findings, 0);
    assert_eq!(first, second);
    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
}
