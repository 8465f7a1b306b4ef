//! End-to-end navigation scenarios: the full signal sequences a real page
//! framework delivers, driven through Navigator + LifecycleCoordinator, with
//! residue inspection on the documents left behind.

use spark_fx::page::{Document, ElementProps};
use spark_fx::{
    LifecycleCoordinator, LifecyclePhase, Navigator, RegionOptions, RegionSpec, Timeline,
};

/// A page with the hero region and a title inside it.
fn page_with_hero() -> Document {
    let doc = Document::new();
    let hero = doc.append(
        doc.body(),
        ElementProps {
            tag: "section".into(),
            id: Some("hero".into()),
            ..Default::default()
        },
    );
    doc.append(
        hero,
        ElementProps {
            tag: "h1".into(),
            classes: vec!["title".into()],
            style: vec![("color".into(), "white".into())],
            ..Default::default()
        },
    );
    doc
}

/// A page without the hero region.
fn page_without_hero() -> Document {
    let doc = Document::new();
    doc.append(
        doc.body(),
        ElementProps {
            tag: "main".into(),
            id: Some("contact".into()),
            ..Default::default()
        },
    );
    doc
}

/// Hero region: title starts hidden inside the scope, revealed by scroll.
fn hero_region() -> RegionSpec {
    RegionSpec::new("#hero", |ctx| {
        let title = ctx.document().query(".title").expect("title inside hero");
        ctx.set_style(title, "opacity", "0");
        ctx.on_scroll_progress(move |progress, styles| {
            if progress > 0.1 {
                styles.set_style(title, "opacity", "1");
            }
        });
    })
}

#[test]
fn navigate_away_and_back_ends_with_one_live_scope() {
    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    let region = coordinator.add_region(hero_region());
    let _handle = coordinator.attach(&navigator);

    let first_page = page_with_hero();
    navigator.present(first_page.clone()); // complete
    navigator.begin_swap(); // about-to-start
    let second_page = page_with_hero();
    navigator.present(second_page.clone()); // complete

    assert_eq!(coordinator.phase(region), LifecyclePhase::Active);
    assert_eq!(coordinator.live_scopes(), 1);
    assert_eq!(coordinator.open_count(), 2);
    assert_eq!(coordinator.release_count(), 1);

    // The abandoned page carries no residue
    let old_title = first_page.query(".title").unwrap();
    assert_eq!(first_page.inline_style_count(old_title), 0);

    // The live page carries the fresh scope's initial state
    let new_title = second_page.query(".title").unwrap();
    assert_eq!(
        second_page.inline_style(new_title, "opacity"),
        Some("0".to_string())
    );
}

#[test]
fn navigate_away_without_return_leaves_zero_scopes() {
    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    let region = coordinator.add_region(hero_region());
    let _handle = coordinator.attach(&navigator);

    let page = page_with_hero();
    navigator.present(page.clone());
    navigator.begin_swap();

    assert_eq!(coordinator.phase(region), LifecyclePhase::Idle);
    assert_eq!(coordinator.live_scopes(), 0);

    let title = page.query(".title").unwrap();
    assert_eq!(page.inline_style_count(title), 0);
}

#[test]
fn complete_on_page_without_region_stays_idle() {
    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    let region = coordinator.add_region(hero_region());
    let _handle = coordinator.attach(&navigator);

    navigator.present(page_without_hero());

    assert_eq!(coordinator.phase(region), LifecyclePhase::Idle);
    assert_eq!(coordinator.open_count(), 0);
    assert_eq!(coordinator.live_scopes(), 0);
}

#[test]
fn long_mixed_sequence_never_exceeds_one_scope() {
    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    let _region = coordinator.add_region(hero_region());
    let _handle = coordinator.attach(&navigator);

    // hero page -> contact page -> hero page -> hero page -> contact page
    navigator.present(page_with_hero());
    assert!(coordinator.live_scopes() <= 1);
    navigator.begin_swap();
    navigator.present(page_without_hero());
    assert!(coordinator.live_scopes() <= 1);
    navigator.begin_swap();
    navigator.present(page_with_hero());
    assert!(coordinator.live_scopes() <= 1);
    navigator.begin_swap();
    navigator.present(page_with_hero());
    assert!(coordinator.live_scopes() <= 1);
    navigator.begin_swap();
    navigator.present(page_without_hero());

    assert_eq!(coordinator.live_scopes(), 0);
    assert_eq!(coordinator.open_count(), 3);
    assert_eq!(coordinator.release_count(), 3);
}

#[test]
fn content_is_visible_when_the_subsystem_never_runs() {
    // No navigator, no coordinator, no scopes: the static page stands alone.
    let page = page_with_hero();
    for node in page.descendants(page.body()) {
        assert!(page.is_visible(node));
    }
}

#[test]
fn scroll_reveal_works_and_dies_with_its_page() {
    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    let _region = coordinator.add_region(hero_region());
    let _handle = coordinator.attach(&navigator);

    let page = page_with_hero();
    navigator.present(page.clone());
    let title = page.query(".title").unwrap();

    // Hidden by the scope's initial state
    assert_eq!(page.inline_style(title, "opacity"), Some("0".to_string()));
    assert!(!page.is_visible(title));

    // Revealed by the scroll trigger
    page.set_scroll_progress(0.5);
    assert_eq!(page.inline_style(title, "opacity"), Some("1".to_string()));
    assert!(page.is_visible(title));

    // Swap away: everything restored, trigger dead
    navigator.begin_swap();
    assert_eq!(page.inline_style_count(title), 0);
    page.set_scroll_progress(0.0);
    page.set_scroll_progress(0.9);
    assert_eq!(page.inline_style_count(title), 0);
}

#[test]
fn timeline_region_scrubs_forward_and_backward() {
    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    let _region = coordinator.add_region(RegionSpec::new("#hero", |ctx| {
        let title = ctx.document().query(".title").unwrap();
        let mut reveal = Timeline::new();
        reveal.keyframe(title, "transform", 0.2, "translateY(12px)");
        reveal.keyframe(title, "transform", 0.6, "translateY(0)");
        ctx.drive(reveal);
    }));
    let _handle = coordinator.attach(&navigator);

    let page = page_with_hero();
    navigator.present(page.clone());
    let title = page.query(".title").unwrap();

    assert_eq!(page.inline_style(title, "transform"), None);

    page.set_scroll_progress(0.3);
    assert_eq!(
        page.inline_style(title, "transform"),
        Some("translateY(12px)".to_string())
    );

    page.set_scroll_progress(0.8);
    assert_eq!(
        page.inline_style(title, "transform"),
        Some("translateY(0)".to_string())
    );

    // Scrub back before the first keyframe: pre-scope state returns
    page.set_scroll_progress(0.0);
    assert_eq!(page.inline_style(title, "transform"), None);

    navigator.begin_swap();
    assert_eq!(page.inline_style_count(title), 0);
}

#[test]
fn hidden_start_region_requires_opt_in_and_still_reverts_cleanly() {
    let doc = Document::new();
    doc.append(
        doc.body(),
        ElementProps {
            tag: "section".into(),
            id: Some("showcase".into()),
            style: vec![("opacity".into(), "0".into())],
            ..Default::default()
        },
    );

    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    let region = coordinator.add_region(
        RegionSpec::new("#showcase", |ctx| {
            ctx.on_scroll_progress({
                let root = ctx.root();
                move |progress, styles| {
                    if progress > 0.5 {
                        styles.set_style(root, "opacity", "1");
                    }
                }
            });
        })
        .with_options(RegionOptions::ALLOW_HIDDEN_START),
    );
    let _handle = coordinator.attach(&navigator);

    navigator.present(doc.clone());
    assert_eq!(coordinator.phase(region), LifecyclePhase::Active);

    let showcase = doc.query("#showcase").unwrap();
    assert!(!doc.is_visible(showcase));

    doc.set_scroll_progress(0.7);
    assert!(doc.is_visible(showcase));

    navigator.begin_swap();
    // Back to the authored (hidden) state; the scope left nothing behind
    assert_eq!(doc.inline_style_count(showcase), 0);
    assert!(!doc.is_visible(showcase));
}
