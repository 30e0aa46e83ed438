//! The embed pipeline: probe once, fetch in parallel, validate, commit,
//! render.

use crate::document::{self, SlotContent};
use crate::fetch::ResourceFetcher;
use clinimap_core::resource::{self, ResourceKind, ResourcePayload};
use clinimap_core::{EmbedConfig, RenderState, SlotSet};
use clinimap_render::{embed_css, render_details};
use futures::future::join_all;
use tracing::{debug, warn};

/// One embed instance: a validated configuration, the host page text, and the
/// per-instance render state. Instances are independent; several can target
/// different parents on the same page.
pub struct Embedder {
    config: EmbedConfig,
    state: RenderState,
    document: String,
}

impl Embedder {
    /// Probes the host page for marker elements exactly once. The resulting
    /// slot flags never change, even if `init` is called repeatedly.
    pub fn new(config: EmbedConfig, host_html: impl Into<String>) -> Self {
        let document = host_html.into();
        let slots = document::probe_slots(&document, config.parent_selector());
        debug!(parent = config.parent_selector(), ?slots, "probed embed slots");
        Self {
            config,
            state: RenderState::new(slots),
            document,
        }
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    pub fn slots(&self) -> SlotSet {
        self.state.slots
    }

    /// The host page, rewritten in place by [`Embedder::init`].
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Runs the pipeline once: fetch every requested slot concurrently, wait
    /// for all outcomes, commit the ones that validate, then rewrite the
    /// page. Never fails; each recovered problem is logged and leaves the
    /// affected section empty. Calling it again appends another stylesheet
    /// (documented accumulation).
    pub async fn init<F: ResourceFetcher>(&mut self, fetcher: &F) {
        let slots = self.state.slots;
        let mut requested = Vec::new();
        if slots.title {
            requested.push(ResourceKind::Title);
        }
        if slots.map {
            requested.push(ResourceKind::Map);
        }
        if slots.details {
            requested.push(ResourceKind::Details);
        }

        let clinic_type = self.config.clinic_type();
        let outcomes = join_all(requested.iter().map(|&kind| async move {
            let path = kind.path(clinic_type);
            (kind, fetcher.fetch(&path).await)
        }))
        .await;

        for (kind, outcome) in outcomes {
            let fetched = match outcome {
                Ok(fetched) => fetched,
                Err(err) => {
                    warn!(resource = kind.label(), error = %err, "fetch failed; section stays empty");
                    continue;
                }
            };
            match resource::accept(kind, &fetched) {
                Ok(ResourcePayload::TitleMarkup(markup)) => self.state.title_markup = markup,
                Ok(ResourcePayload::MapMarkup(markup)) => self.state.map_markup = markup,
                Ok(ResourcePayload::Details(areas)) => self.state.clinic_details = areas,
                Err(rejection) => {
                    warn!(resource = kind.label(), reason = %rejection, "resource rejected; section stays empty");
                }
            }
        }

        self.render();
    }

    /// Rewrites the page from the committed state. Sections render
    /// independently; the stylesheet is appended unconditionally.
    fn render(&mut self) {
        let slots = self.state.slots;
        let details_markup = (slots.details && !self.state.clinic_details.is_empty())
            .then(|| render_details(self.config.parent_id(), &self.state.clinic_details));

        let content = SlotContent {
            title: (slots.title && !self.state.title_markup.is_empty())
                .then_some(self.state.title_markup.as_str()),
            map: (slots.map && !self.state.map_markup.is_empty())
                .then_some(self.state.map_markup.as_str()),
            details: details_markup.as_deref(),
        };

        let style_element = format!(
            "<style>{}</style>",
            embed_css(self.config.parent_selector(), self.config.colors())
        );
        let rewritten = document::inject(
            &self.document,
            self.config.parent_selector(),
            &content,
            &style_element,
        );
        self.document = rewritten;
        debug!(
            parent = self.config.parent_selector(),
            title = content.title.is_some(),
            map = content.map.is_some(),
            details = content.details.is_some(),
            "rendered embed sections"
        );
    }
}
