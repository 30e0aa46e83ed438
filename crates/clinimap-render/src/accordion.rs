use clinimap_core::AreaDetail;
use htmlize::{escape_attribute, escape_text};
use std::fmt::Write;

/// Renders the two-level clinic accordion: one outer item per area, one inner
/// item per clinic. Open/closed state lives entirely in a hidden checkbox per
/// item; the stylesheet keys everything on `:checked`, so no script runs.
///
/// Checkbox ids are namespaced by `parent_id` so several embeds can share a
/// page without `for`/`id` collisions. An empty area list renders nothing.
pub fn render_details(parent_id: &str, areas: &[AreaDetail]) -> String {
    if areas.is_empty() {
        return String::new();
    }

    let id = escape_attribute(parent_id);
    let mut out = String::new();
    out.push_str(r#"<div class="clinimap-accordion">"#);
    for (area_index, area) in areas.iter().enumerate() {
        let area_toggle = format!("{id}-area-{area_index}");
        let _ = write!(
            &mut out,
            r#"<div class="clinimap-area"><input type="checkbox" id="{area_toggle}" class="clinimap-toggle"><label class="clinimap-area-header" for="{area_toggle}"><span class="clinimap-icon"></span>{}</label><div class="clinimap-area-body">"#,
            escape_text(area.area.as_str()),
        );
        for (clinic_index, clinic) in area.clinics.iter().enumerate() {
            let clinic_toggle = format!("{id}-clinic-{area_index}-{clinic_index}");
            let _ = write!(
                &mut out,
                r#"<div class="clinimap-clinic"><input type="checkbox" id="{clinic_toggle}" class="clinimap-toggle"><label class="clinimap-clinic-header" for="{clinic_toggle}"><span class="clinimap-icon"></span>{}</label><div class="clinimap-clinic-body">"#,
                escape_text(clinic.name.as_str()),
            );
            out.push_str(r#"<table class="clinimap-facts"><tbody>"#);
            for (label, value) in [
                ("Hours", &clinic.hours),
                ("Closed", &clinic.closed),
                ("Address", &clinic.address),
                ("Stations", &clinic.stations),
            ] {
                let _ = write!(
                    &mut out,
                    r#"<tr><th scope="row">{label}</th><td>{}</td></tr>"#,
                    escape_text(value.as_str()),
                );
            }
            out.push_str("</tbody></table>");
            if let Some(src) = clinic.map_url.as_deref().filter(|u| is_embeddable_map_url(u)) {
                let _ = write!(
                    &mut out,
                    r#"<iframe class="clinimap-clinic-map" src="{}" loading="lazy"></iframe>"#,
                    escape_attribute(src),
                );
            }
            out.push_str("</div></div>");
        }
        out.push_str("</div></div>");
    }
    out.push_str("</div>");
    out
}

/// Only http(s) targets are embedded; anything else renders no iframe.
fn is_embeddable_map_url(url: &str) -> bool {
    let url = url.trim();
    url.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("http://"))
        || url.get(..8).is_some_and(|p| p.eq_ignore_ascii_case("https://"))
}
