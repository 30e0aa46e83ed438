use crate::config::ClinicType;
use crate::model::AreaDetail;

/// The three optional resources an embed can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Title,
    Map,
    Details,
}

impl ResourceKind {
    /// Path relative to the resource base. The title image is shared across
    /// clinic types; the map image and the details data are namespaced by tag.
    pub fn path(self, clinic_type: ClinicType) -> String {
        match self {
            Self::Title => "img/title.svg".to_string(),
            Self::Map => format!("img/map_{}.svg", clinic_type.slug()),
            Self::Details => format!("json/clinic_{}.json", clinic_type.slug()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Map => "map",
            Self::Details => "details",
        }
    }
}

/// A raw fetch outcome: the transport succeeded, nothing is validated yet.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Why a fetched resource was not committed. Rejections are values, not
/// errors: the affected section renders nothing and the pipeline moves on.
#[derive(Debug, thiserror::Error)]
pub enum ResourceRejection {
    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("unexpected content type {content_type:?}")]
    ContentType { content_type: Option<String> },

    #[error("payload rejected: {message}")]
    Payload { message: String },
}

/// A fully validated payload, ready to commit into the render state.
#[derive(Debug, Clone)]
pub enum ResourcePayload {
    TitleMarkup(String),
    MapMarkup(String),
    Details(Vec<AreaDetail>),
}

fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// SVG markup arrives as `image/svg+xml` in practice; the plain XML media
/// types (and any `+xml` suffix) are accepted too. Parameters are ignored.
pub fn is_svg_media_type(content_type: &str) -> bool {
    let mt = media_type(content_type);
    matches!(mt.as_str(), "image/svg+xml" | "text/xml" | "application/xml") || mt.ends_with("+xml")
}

/// `application/json` or any `+json` suffix; parameters are ignored.
pub fn is_json_media_type(content_type: &str) -> bool {
    let mt = media_type(content_type);
    mt == "application/json" || mt.ends_with("+json")
}

/// Validates one fetch outcome: success status, then content-type family,
/// then payload shape (well-formed XML with an `svg` root for markup, the
/// area/clinic sequence for details).
pub fn accept(
    kind: ResourceKind,
    resource: &FetchedResource,
) -> std::result::Result<ResourcePayload, ResourceRejection> {
    if !(200..300).contains(&resource.status) {
        return Err(ResourceRejection::Status {
            status: resource.status,
        });
    }

    let content_type = resource.content_type.as_deref().unwrap_or("");
    match kind {
        ResourceKind::Title | ResourceKind::Map => {
            if !is_svg_media_type(content_type) {
                return Err(ResourceRejection::ContentType {
                    content_type: resource.content_type.clone(),
                });
            }
            let markup = accept_svg_markup(&resource.body)?;
            Ok(match kind {
                ResourceKind::Title => ResourcePayload::TitleMarkup(markup),
                _ => ResourcePayload::MapMarkup(markup),
            })
        }
        ResourceKind::Details => {
            if !is_json_media_type(content_type) {
                return Err(ResourceRejection::ContentType {
                    content_type: resource.content_type.clone(),
                });
            }
            let details: Vec<AreaDetail> =
                serde_json::from_slice(&resource.body).map_err(|err| {
                    ResourceRejection::Payload {
                        message: err.to_string(),
                    }
                })?;
            Ok(ResourcePayload::Details(details))
        }
    }
}

fn accept_svg_markup(body: &[u8]) -> std::result::Result<String, ResourceRejection> {
    let text = std::str::from_utf8(body).map_err(|err| ResourceRejection::Payload {
        message: err.to_string(),
    })?;
    let doc = roxmltree::Document::parse(text).map_err(|err| ResourceRejection::Payload {
        message: err.to_string(),
    })?;
    if doc.root_element().tag_name().name() != "svg" {
        return Err(ResourceRejection::Payload {
            message: format!(
                "root element is <{}>, not <svg>",
                doc.root_element().tag_name().name()
            ),
        });
    }
    Ok(text.to_string())
}
