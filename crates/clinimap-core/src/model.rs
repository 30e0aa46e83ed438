use serde::Deserialize;

/// Marker attributes a host page sets to request the optional sections. They
/// are pure presence signals; attribute values are ignored.
pub const TITLE_MARKER: &str = "data-clinic-title";
pub const MAP_MARKER: &str = "data-clinic-map";
pub const DETAILS_MARKER: &str = "data-clinic-details";

/// One clinic's contact facts, as supplied by the details resource. Fields
/// the data source omits render as empty text rather than failing the decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicDetail {
    pub name: String,
    pub hours: String,
    pub closed: String,
    pub address: String,
    pub stations: String,
    pub map_url: Option<String>,
}

/// One geographic grouping of clinics. Order is the data source's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AreaDetail {
    pub area: String,
    pub clinics: Vec<ClinicDetail>,
}

/// Which optional sections the host page requested, derived from marker
/// attributes exactly once per embed instance. The flags never change
/// afterwards even if the host DOM does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSet {
    pub title: bool,
    pub map: bool,
    pub details: bool,
}

impl SlotSet {
    pub fn is_empty(self) -> bool {
        !(self.title || self.map || self.details)
    }
}

/// Per-instance mutable state: written by the fetch phase, read-only during
/// render, discarded with the instance. A slot whose flag is false keeps its
/// empty default no matter what was fetched.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub slots: SlotSet,
    pub title_markup: String,
    pub map_markup: String,
    pub clinic_details: Vec<AreaDetail>,
}

impl RenderState {
    pub fn new(slots: SlotSet) -> Self {
        Self {
            slots,
            ..Default::default()
        }
    }
}
