use clinimap_core::EmbedColors;
use clinimap_core::model::{DETAILS_MARKER, MAP_MARKER, TITLE_MARKER};
use std::fmt::Write;

// Plus/minus glyphs for the accordion icon, inlined as data URIs so the
// stylesheet stays self-contained.
const CLOSED_GLYPH_PATH: &str = "M7 2h2v5h5v2H9v5H7V9H2V7h5z";
const OPEN_GLYPH_PATH: &str = "M2 7h12v2H2z";

fn glyph_data_uri(path: &str, color: &str) -> String {
    let color = color.replace('#', "%23");
    format!(
        "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'><path fill='{color}' d='{path}'/></svg>"
    )
}

/// Emits the embed's stylesheet. Every selector is prefixed with the parent
/// ID selector, so several embeds can style themselves independently on one
/// page. `main_color` fills the title/map SVG shapes and the accordion icon;
/// `sub_color` paints the accordion surfaces.
///
/// The icon flips between the two glyphs purely on the hidden checkbox's
/// `:checked` state, and the body collapse animates `padding-top`,
/// `padding-bottom` and `max-height` (the height-sync reporter re-measures on
/// the `padding-top` transition end).
pub fn embed_css(parent_selector: &str, colors: &EmbedColors) -> String {
    let p = parent_selector;
    let main = colors.main_color.css();
    let sub = colors.sub_color.css();
    let closed_icon = glyph_data_uri(CLOSED_GLYPH_PATH, main);
    let open_icon = glyph_data_uri(OPEN_GLYPH_PATH, main);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        "{p} [{TITLE_MARKER}] svg,{p} [{MAP_MARKER}] svg{{display:block;width:100%;height:auto;}}"
    );
    let _ = write!(
        &mut out,
        "{p} [{TITLE_MARKER}] svg path,{p} [{TITLE_MARKER}] svg rect,{p} [{TITLE_MARKER}] svg circle,{p} [{TITLE_MARKER}] svg polygon,{p} [{MAP_MARKER}] svg path,{p} [{MAP_MARKER}] svg rect,{p} [{MAP_MARKER}] svg circle,{p} [{MAP_MARKER}] svg polygon{{fill:{main};}}"
    );
    let _ = write!(
        &mut out,
        "{p} [{DETAILS_MARKER}]{{margin:0;padding:0;}}{p} .clinimap-accordion{{margin:0;padding:0;font-size:14px;line-height:1.5;color:{main};}}"
    );
    let _ = write!(
        &mut out,
        "{p} .clinimap-toggle{{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);}}"
    );
    let _ = write!(
        &mut out,
        "{p} .clinimap-area-header,{p} .clinimap-clinic-header{{display:flex;align-items:center;gap:8px;padding:12px 16px;cursor:pointer;background:{sub};}}{p} .clinimap-clinic-header{{padding-left:32px;}}"
    );
    let _ = write!(
        &mut out,
        r#"{p} .clinimap-icon{{flex:none;width:16px;height:16px;background:url("{closed_icon}") center/contain no-repeat;}}{p} .clinimap-toggle:checked+label .clinimap-icon{{background-image:url("{open_icon}");}}"#
    );
    let _ = write!(
        &mut out,
        "{p} .clinimap-area-body,{p} .clinimap-clinic-body{{max-height:0;padding-top:0;padding-bottom:0;overflow:hidden;transition:padding-top 0.25s ease,padding-bottom 0.25s ease,max-height 0.25s ease;}}"
    );
    let _ = write!(
        &mut out,
        "{p} .clinimap-toggle:checked~.clinimap-area-body,{p} .clinimap-toggle:checked~.clinimap-clinic-body{{max-height:100vh;padding-top:8px;padding-bottom:8px;}}"
    );
    let _ = write!(
        &mut out,
        "{p} .clinimap-facts{{width:100%;border-collapse:collapse;}}{p} .clinimap-facts th{{text-align:left;white-space:nowrap;font-weight:600;}}{p} .clinimap-facts th,{p} .clinimap-facts td{{padding:4px 8px;border-bottom:1px solid {sub};}}"
    );
    let _ = write!(
        &mut out,
        "{p} .clinimap-clinic-map{{display:block;width:100%;height:320px;margin-top:8px;border:0;}}"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinimap_core::{EmbedConfig, RawEmbedConfig};
    use serde_json::json;

    #[test]
    fn every_selector_is_scoped_under_the_parent() {
        let css = embed_css("#clinic-map", &EmbedColors::default());
        for rule in css.split('}').filter(|r| !r.trim().is_empty()) {
            let Some(brace) = rule.find('{') else { continue };
            for selector in rule[..brace].split(',') {
                assert!(
                    selector.trim_start().starts_with("#clinic-map"),
                    "unscoped selector: {selector:?}"
                );
            }
        }
    }

    #[test]
    fn colors_are_spliced_into_the_rules() {
        let raw: RawEmbedConfig = serde_json::from_value(json!({
            "parentSelector": "#m",
            "clinicType": "a",
            "colors": { "mainColor": "1a2b3c", "subColor": "f0c" }
        }))
        .unwrap();
        let config = EmbedConfig::from_raw(raw).unwrap();
        let css = embed_css(config.parent_selector(), config.colors());

        assert!(css.contains("fill:#1a2b3c;"));
        assert!(css.contains("background:#ff00cc;"));
        // The icon glyphs carry the percent-encoded main color.
        assert!(css.contains("fill='%231a2b3c'"));
    }

    #[test]
    fn invalid_main_color_falls_back_to_the_default() {
        let raw: RawEmbedConfig = serde_json::from_value(json!({
            "parentSelector": "#m",
            "clinicType": "a",
            "colors": { "mainColor": "zzz" }
        }))
        .unwrap();
        let config = EmbedConfig::from_raw(raw).unwrap();
        let css = embed_css(config.parent_selector(), config.colors());

        assert!(css.contains("fill:#000000;"));
        assert!(!css.contains("zzz"));
    }

    #[test]
    fn body_collapse_transitions_the_properties_the_reporter_watches() {
        let css = embed_css("#m", &EmbedColors::default());
        assert!(css.contains("transition:padding-top 0.25s ease,padding-bottom 0.25s ease"));
        assert!(css.contains(":checked~.clinimap-area-body"));
        assert!(css.contains(":checked+label .clinimap-icon"));
    }
}
