use crate::error::{Error, Result};
use serde::Deserialize;

/// Tag that namespaces the map image and the clinic-details data. The title
/// image is shared across all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClinicType {
    A,
    B,
    C,
}

impl ClinicType {
    /// Stable lowercase tag used in resource paths (`map_a.svg`, ...).
    pub fn slug(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }
}

impl std::str::FromStr for ClinicType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            _ => Err(Error::UnknownClinicType {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ClinicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// A validated 3- or 6-digit hex color. Inputs carry no leading `#`; the
/// normalized CSS form is always `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    /// Parses a raw color value. `None` for anything that is not pure
    /// 3- or 6-digit hex; callers keep their default instead of failing.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid_len = raw.len() == 3 || raw.len() == 6;
        if !valid_len || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let mut css = String::with_capacity(7);
        css.push('#');
        if raw.len() == 3 {
            for ch in raw.chars() {
                let ch = ch.to_ascii_lowercase();
                css.push(ch);
                css.push(ch);
            }
        } else {
            css.extend(raw.chars().map(|c| c.to_ascii_lowercase()));
        }
        Some(Self(css))
    }

    /// The normalized `#rrggbb` form, safe to splice into CSS.
    pub fn css(&self) -> &str {
        &self.0
    }
}

/// Color configuration merged over documented defaults: `main_color` is
/// applied to title/map SVG shapes, `sub_color` to accordion surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedColors {
    pub main_color: HexColor,
    pub sub_color: HexColor,
}

impl Default for EmbedColors {
    fn default() -> Self {
        Self {
            main_color: HexColor("#000000".to_string()),
            sub_color: HexColor("#ffffff".to_string()),
        }
    }
}

impl EmbedColors {
    /// Merges raw values over the defaults. Missing or invalid values keep
    /// the default silently.
    pub fn from_raw(raw: &RawEmbedColors) -> Self {
        let mut colors = Self::default();
        if let Some(c) = raw.main_color.as_deref().and_then(HexColor::parse) {
            colors.main_color = c;
        }
        if let Some(c) = raw.sub_color.as_deref().and_then(HexColor::parse) {
            colors.sub_color = c;
        }
        colors
    }
}

/// Raw color fields as supplied by an embedding host (camelCase JSON).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEmbedColors {
    pub main_color: Option<String>,
    pub sub_color: Option<String>,
}

/// Unvalidated embed configuration, the shape hosts pass in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEmbedConfig {
    pub parent_selector: Option<String>,
    pub clinic_type: Option<String>,
    pub colors: RawEmbedColors,
}

/// Validated, immutable embed configuration.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    parent_selector: String,
    clinic_type: ClinicType,
    colors: EmbedColors,
}

impl EmbedConfig {
    /// Hard-validates the parent selector: it must be an ID selector with a
    /// non-empty id token. This is the only hard failure in the component.
    pub fn new(parent_selector: impl Into<String>, clinic_type: ClinicType) -> Result<Self> {
        let parent_selector = parent_selector.into().trim().to_string();
        if parent_selector.is_empty() {
            return Err(Error::MissingParentSelector);
        }
        if !parent_selector.starts_with('#') || parent_selector.len() == 1 {
            return Err(Error::InvalidParentSelector {
                selector: parent_selector,
            });
        }
        Ok(Self {
            parent_selector,
            clinic_type,
            colors: EmbedColors::default(),
        })
    }

    pub fn with_colors(mut self, colors: EmbedColors) -> Self {
        self.colors = colors;
        self
    }

    /// Validates a raw host-supplied configuration. Color problems degrade to
    /// defaults; a missing selector or clinic type is a hard failure.
    pub fn from_raw(raw: RawEmbedConfig) -> Result<Self> {
        let parent_selector = raw
            .parent_selector
            .filter(|s| !s.trim().is_empty())
            .ok_or(Error::MissingParentSelector)?;
        let clinic_type = raw
            .clinic_type
            .filter(|s| !s.trim().is_empty())
            .ok_or(Error::MissingClinicType)?
            .parse::<ClinicType>()?;
        Ok(Self::new(parent_selector, clinic_type)?.with_colors(EmbedColors::from_raw(&raw.colors)))
    }

    pub fn parent_selector(&self) -> &str {
        &self.parent_selector
    }

    /// The selector's id token (selector minus the `#`), used to namespace
    /// generated checkbox ids so multiple embeds on one page cannot collide.
    pub fn parent_id(&self) -> &str {
        &self.parent_selector[1..]
    }

    pub fn clinic_type(&self) -> ClinicType {
        self.clinic_type
    }

    pub fn colors(&self) -> &EmbedColors {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selector_must_be_an_id_selector() {
        assert!(matches!(
            EmbedConfig::new(".clinic-map", ClinicType::A),
            Err(Error::InvalidParentSelector { .. })
        ));
        assert!(matches!(
            EmbedConfig::new("clinic-map", ClinicType::A),
            Err(Error::InvalidParentSelector { .. })
        ));
        assert!(matches!(
            EmbedConfig::new("#", ClinicType::A),
            Err(Error::InvalidParentSelector { .. })
        ));
        assert!(matches!(
            EmbedConfig::new("", ClinicType::A),
            Err(Error::MissingParentSelector)
        ));
    }

    #[test]
    fn parent_id_strips_the_hash() {
        let config = EmbedConfig::new("#clinic-map", ClinicType::B).unwrap();
        assert_eq!(config.parent_id(), "clinic-map");
        assert_eq!(config.clinic_type().slug(), "b");
    }

    #[test]
    fn from_raw_requires_selector_and_clinic_type() {
        let raw: RawEmbedConfig = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            EmbedConfig::from_raw(raw),
            Err(Error::MissingParentSelector)
        ));

        let raw: RawEmbedConfig =
            serde_json::from_value(json!({ "parentSelector": "#m" })).unwrap();
        assert!(matches!(
            EmbedConfig::from_raw(raw),
            Err(Error::MissingClinicType)
        ));

        let raw: RawEmbedConfig =
            serde_json::from_value(json!({ "parentSelector": "#m", "clinicType": "x" })).unwrap();
        assert!(matches!(
            EmbedConfig::from_raw(raw),
            Err(Error::UnknownClinicType { .. })
        ));
    }

    #[test]
    fn hex_color_accepts_3_and_6_digit_values() {
        assert_eq!(HexColor::parse("1A2b3C").unwrap().css(), "#1a2b3c");
        assert_eq!(HexColor::parse("f0c").unwrap().css(), "#ff00cc");
    }

    #[test]
    fn hex_color_rejects_everything_else() {
        for raw in ["zzz", "12345", "#fff", "ff00", "", "ff 00a"] {
            assert!(HexColor::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn invalid_colors_keep_defaults_silently() {
        let raw: RawEmbedConfig = serde_json::from_value(json!({
            "parentSelector": "#m",
            "clinicType": "c",
            "colors": { "mainColor": "zzz", "subColor": "dee" }
        }))
        .unwrap();
        let config = EmbedConfig::from_raw(raw).unwrap();
        assert_eq!(config.colors().main_color.css(), "#000000");
        assert_eq!(config.colors().sub_color.css(), "#ddeeee");
    }
}
