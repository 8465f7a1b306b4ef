//! Scroll Reveal Example - timeline driven by scroll progress
//!
//! Demonstrates a staged timeline: properties step through keyframes as the
//! page scrolls, scrub back to earlier values on the way up, and vanish
//! entirely when the scope reverts.
//!
//! Run with: cargo run --example scroll_reveal

use spark_fx::page::{Document, ElementProps};
use spark_fx::{LifecycleCoordinator, Navigator, RegionSpec, Timeline};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-fx Scroll Reveal Example ===\n");

    let doc = Document::new();
    let gallery = doc.append(
        doc.body(),
        ElementProps {
            tag: "section".into(),
            id: Some("gallery".into()),
            ..Default::default()
        },
    );
    let card = doc.append(
        gallery,
        ElementProps {
            tag: "article".into(),
            classes: vec!["card".into()],
            ..Default::default()
        },
    );

    let navigator = Navigator::new();
    let coordinator = LifecycleCoordinator::new();
    coordinator.add_region(RegionSpec::new("#gallery", move |ctx| {
        let mut reveal = Timeline::new();
        reveal.keyframe(card, "transform", 0.1, "translateY(24px)");
        reveal.keyframe(card, "transform", 0.4, "translateY(8px)");
        reveal.keyframe(card, "transform", 0.7, "translateY(0)");
        ctx.drive(reveal);
    }));
    let _handle = coordinator.attach(&navigator);

    navigator.present(doc.clone());

    for progress in [0.0, 0.2, 0.5, 0.8, 0.3, 0.0] {
        doc.set_scroll_progress(progress);
        println!(
            "scroll {:>4.0}%  transform: {:?}",
            progress * 100.0,
            doc.inline_style(card, "transform")
        );
    }

    navigator.begin_swap();
    println!(
        "\nAfter swap: {} inline styles left on the card",
        doc.inline_style_count(card)
    );

    println!("\n=== Timeline stepped, scrubbed, and reverted ===");
}
