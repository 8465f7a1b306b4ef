//! Visibility Fallback Contract - executable audit.
//!
//! Content must be visible before any scope opens: if the effect system
//! never runs (script disabled, library failed to load), every region must
//! degrade to "visible, unanimated" - never to a blank page. Any
//! hidden-until-animated state therefore belongs inside an open scope, where
//! revert is guaranteed to undo it.
//!
//! The audit checks the *static* style maps only; inline styles are by
//! definition effect-applied and already governed by scope undo. Regions
//! that intentionally start hidden opt out per region with
//! [`crate::RegionOptions::ALLOW_HIDDEN_START`].

use thiserror::Error;

use crate::page::Document;

/// A region whose static presentation breaks the fallback guarantee.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// An element inside the region is hidden by authored styling.
    #[error("<{tag}> in region {selector:?} is statically hidden ({property}: {value})")]
    HiddenByDefault {
        selector: String,
        tag: String,
        property: String,
        value: String,
    },
}

/// Verify that the region `selector` resolves to is fully visible under
/// static styling alone.
///
/// A region absent from the page passes vacuously (nothing can be hidden).
/// Returns the first violation found, in document order.
pub fn audit_region(document: &Document, selector: &str) -> Result<(), ContractViolation> {
    let Some(root) = document.query(selector) else {
        return Ok(());
    };

    for node in document.descendants(root) {
        for (property, hiding) in [("display", "none"), ("visibility", "hidden")] {
            if let Some(value) = document.static_style(node, property) {
                if value.trim() == hiding {
                    return Err(ContractViolation::HiddenByDefault {
                        selector: selector.to_string(),
                        tag: document.tag(node),
                        property: property.to_string(),
                        value,
                    });
                }
            }
        }
        if let Some(value) = document.static_style(node, "opacity") {
            if value.trim().parse::<f64>().is_ok_and(|n| n == 0.0) {
                return Err(ContractViolation::HiddenByDefault {
                    selector: selector.to_string(),
                    tag: document.tag(node),
                    property: "opacity".to_string(),
                    value,
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ElementProps;

    #[test]
    fn test_visible_region_passes() {
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
                style: vec![("color".into(), "white".into())],
                ..Default::default()
            },
        );

        assert_eq!(audit_region(&doc, "#hero"), Ok(()));
    }

    #[test]
    fn test_statically_hidden_descendant_fails() {
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
                style: vec![("opacity".into(), "0".into())],
                ..Default::default()
            },
        );

        let violation = audit_region(&doc, "#hero").unwrap_err();
        assert_eq!(
            violation,
            ContractViolation::HiddenByDefault {
                selector: "#hero".into(),
                tag: "h1".into(),
                property: "opacity".into(),
                value: "0".into(),
            }
        );
    }

    #[test]
    fn test_display_none_fails() {
        let doc = Document::new();
        doc.append(
            doc.body(),
            ElementProps {
                tag: "aside".into(),
                id: Some("promo".into()),
                style: vec![("display".into(), "none".into())],
                ..Default::default()
            },
        );

        assert!(audit_region(&doc, "#promo").is_err());
    }

    #[test]
    fn test_absent_region_passes_vacuously() {
        let doc = Document::new();
        assert_eq!(audit_region(&doc, "#missing"), Ok(()));
    }

    #[test]
    fn test_inline_styles_do_not_trip_the_audit() {
        // Inline = effect-applied; only authored styling is audited.
        let doc = Document::new();
        let hero = doc.append(
            doc.body(),
            ElementProps {
                tag: "section".into(),
                id: Some("hero".into()),
                ..Default::default()
            },
        );
        doc.set_inline_style(hero, "opacity", "0");

        assert_eq!(audit_region(&doc, "#hero"), Ok(()));
    }
}
