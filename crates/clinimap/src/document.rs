//! Host-document probing and rewriting.
//!
//! Both passes stream the page through `lol_html`: one scan to learn which
//! marker elements exist under the parent element, one rewrite to replace
//! slot content and append the stylesheet. A page that fails to rewrite is
//! returned unchanged; a selector that fails to parse degrades to "slot
//! absent".

use clinimap_core::SlotSet;
use clinimap_core::model::{DETAILS_MARKER, MAP_MARKER, TITLE_MARKER};
use lol_html::html_content::ContentType;
use lol_html::{ElementContentHandlers, RewriteStrSettings, Selector, rewrite_str};
use std::borrow::Cow;
use std::cell::Cell;
use tracing::warn;

/// Rendered markup destined for each marked slot; `None` leaves the slot
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotContent<'a> {
    pub title: Option<&'a str>,
    pub map: Option<&'a str>,
    pub details: Option<&'a str>,
}

fn marker_selector(parent_selector: &str, marker: &str) -> Option<Selector> {
    let raw = format!("{parent_selector} [{marker}]");
    match raw.parse::<Selector>() {
        Ok(selector) => Some(selector),
        Err(err) => {
            warn!(selector = %raw, error = %err, "marker selector rejected; slot treated as absent");
            None
        }
    }
}

/// Scans the host page once and records which marker elements exist under the
/// parent element. The returned flags are computed here and never again.
pub fn probe_slots(html: &str, parent_selector: &str) -> SlotSet {
    let title = Cell::new(false);
    let map = Cell::new(false);
    let details = Cell::new(false);

    let mut handlers: Vec<(Cow<'_, Selector>, ElementContentHandlers<'_>)> = Vec::new();
    for (marker, flag) in [
        (TITLE_MARKER, &title),
        (MAP_MARKER, &map),
        (DETAILS_MARKER, &details),
    ] {
        let Some(selector) = marker_selector(parent_selector, marker) else {
            continue;
        };
        handlers.push((
            Cow::Owned(selector),
            ElementContentHandlers::default().element(move |_el| {
                flag.set(true);
                Ok(())
            }),
        ));
    }

    let scan = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    );
    if let Err(err) = scan {
        warn!(error = %err, "host page scan failed; treating every slot as absent");
        return SlotSet::default();
    }

    SlotSet {
        title: title.get(),
        map: map.get(),
        details: details.get(),
    }
}

/// Rewrites the host page: replaces the inner content of each marked slot
/// that has markup, then appends `style_element` at the end of `<head>`. On a
/// rewrite failure the input page is returned unchanged.
pub fn inject(
    html: &str,
    parent_selector: &str,
    content: &SlotContent<'_>,
    style_element: &str,
) -> String {
    let mut handlers: Vec<(Cow<'_, Selector>, ElementContentHandlers<'_>)> = Vec::new();
    for (marker, markup) in [
        (TITLE_MARKER, content.title),
        (MAP_MARKER, content.map),
        (DETAILS_MARKER, content.details),
    ] {
        let Some(markup) = markup else { continue };
        let Some(selector) = marker_selector(parent_selector, marker) else {
            continue;
        };
        handlers.push((
            Cow::Owned(selector),
            ElementContentHandlers::default().element(move |el| {
                el.set_inner_content(markup, ContentType::Html);
                Ok(())
            }),
        ));
    }

    let head = "head".parse::<Selector>().expect("static selector");
    handlers.push((
        Cow::Owned(head),
        ElementContentHandlers::default().element(move |el| {
            el.append(style_element, ContentType::Html);
            Ok(())
        }),
    ));

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .unwrap_or_else(|err| {
        warn!(error = %err, "host page rewrite failed; returning the page unchanged");
        html.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Clinics</title></head><body><div id="m"><p data-clinic-title></p><p data-clinic-details></p></div><div data-clinic-map></div></body></html>"#;

    #[test]
    fn probe_only_sees_markers_under_the_parent() {
        let slots = probe_slots(PAGE, "#m");
        assert!(slots.title);
        assert!(!slots.map); // that marker sits outside the parent
        assert!(slots.details);
    }

    #[test]
    fn probe_with_an_unmatched_parent_finds_nothing() {
        assert!(probe_slots(PAGE, "#elsewhere").is_empty());
    }

    #[test]
    fn a_malformed_parent_selector_degrades_to_no_slots() {
        assert!(probe_slots(PAGE, "#m[").is_empty());
    }

    #[test]
    fn inject_replaces_slot_content_and_appends_the_style() {
        let content = SlotContent {
            title: Some("<svg>t</svg>"),
            ..Default::default()
        };
        let page = inject(PAGE, "#m", &content, "<style>#m{color:red}</style>");

        assert!(page.contains(r#"<p data-clinic-title><svg>t</svg></p>"#));
        assert!(page.contains("<style>#m{color:red}</style></head>"));
        // Slots without markup keep their existing content.
        assert!(page.contains(r#"<p data-clinic-details></p>"#));
    }

    #[test]
    fn inject_replaces_prior_slot_content() {
        let page = r##"<html><head></head><body><div id="m"><p data-clinic-title>old</p></div></body></html>"##;
        let content = SlotContent {
            title: Some("new"),
            ..Default::default()
        };
        let out = inject(page, "#m", &content, "<style></style>");
        assert!(out.contains(r#"<p data-clinic-title>new</p>"#));
        assert!(!out.contains("old"));
    }
}
