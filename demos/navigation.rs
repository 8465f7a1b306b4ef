//! Navigation Example - scope lifecycle across page swaps
//!
//! This example demonstrates the full protocol:
//! - Declaring a region with initial state and a scroll trigger
//! - Scopes opening on navigation-complete, reverting on about-to-start
//! - Pages without the region staying untouched
//! - No residue on abandoned pages
//!
//! Run with: cargo run --example navigation
//! Set RUST_LOG=spark_fx=debug to watch the lifecycle transitions.

use spark_fx::page::{Document, ElementProps};
use spark_fx::{LifecycleCoordinator, LifecyclePhase, Navigator, RegionSpec};
use tracing_subscriber::EnvFilter;

fn home_page() -> Document {
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

fn contact_page() -> Document {
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

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-fx Navigation Example ===\n");

    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();

    // The hero region: title hidden inside the scope, revealed by scroll
    let hero = coordinator.add_region(RegionSpec::new("#hero", |ctx| {
        let title = ctx.document().query(".title").expect("title inside hero");
        ctx.set_style(title, "opacity", "0");
        ctx.on_scroll_progress(move |progress, styles| {
            if progress > 0.2 {
                styles.set_style(title, "opacity", "1");
            }
        });
    }));

    let handle = coordinator.attach(&navigator);

    // Initial render
    let home = home_page();
    navigator.present(home.clone());
    let title = home.query(".title").unwrap();
    println!("Home rendered:");
    println!("  phase: {:?}", coordinator.phase(hero));
    println!("  title opacity: {:?}", home.inline_style(title, "opacity"));

    // Scroll down - the trigger reveals the title
    home.set_scroll_progress(0.5);
    println!("\nAfter scrolling to 50%:");
    println!("  title opacity: {:?}", home.inline_style(title, "opacity"));

    // Navigate to a page without the region
    navigator.begin_swap();
    navigator.present(contact_page());
    println!("\nNavigated to contact:");
    println!("  phase: {:?}", coordinator.phase(hero));
    println!("  old title residue: {} inline styles", home.inline_style_count(title));

    // Navigate back - a fresh scope opens on the fresh page
    navigator.begin_swap();
    let home_again = home_page();
    navigator.present(home_again.clone());
    println!("\nNavigated back home:");
    println!("  phase: {:?}", coordinator.phase(hero));
    println!(
        "  scopes opened: {}, released: {}, live: {}",
        coordinator.open_count(),
        coordinator.release_count(),
        coordinator.live_scopes()
    );

    handle.detach();
    println!("\nDetached:");
    println!("  phase: {:?}", coordinator.phase(hero));
    let title_again = home_again.query(".title").unwrap();
    println!(
        "  residue on current page: {} inline styles",
        home_again.inline_style_count(title_again)
    );
    assert_eq!(coordinator.phase(hero), LifecyclePhase::Idle);

    println!("\n=== Every navigation opened exactly one scope and cleaned up ===");
}
