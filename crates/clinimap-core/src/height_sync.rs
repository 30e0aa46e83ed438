//! Iframe height-sync reporter.
//!
//! Runs inside the embedded document and keeps the containing page informed
//! of the rendered content height, so the parent can size the iframe. The
//! machine owns no clock: callers pass the current instant into the resize
//! path and poll for the debounced report, which keeps every transition
//! testable as data.
//!
//! Neither direction of the message protocol validates origins; hosts that
//! care must filter on their side.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How long a width-changing resize is held before re-reporting. A newer
/// width change within the window replaces the pending report.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// The accordion body animates both vertical paddings; keying the re-measure
/// on this one property keeps a toggle from firing twice.
pub const REMEASURE_TRANSITION_PROPERTY: &str = "padding-top";

/// Message posted to the parent frame:
/// `{"action":"sendIframeHeight","iframeHeight":<number>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum OutboundMessage {
    #[serde(rename = "sendIframeHeight", rename_all = "camelCase")]
    SendIframeHeight { iframe_height: f64 },
}

/// Message accepted from the parent frame. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum InboundMessage {
    #[serde(rename = "getHeight")]
    GetHeight,
}

impl InboundMessage {
    /// Decodes a raw inbound message; unknown actions and malformed payloads
    /// are ignored rather than surfaced.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Measures the rendered height of the document's content wrapper.
pub trait HeightSource {
    fn content_height(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    deadline: Instant,
}

/// Keeps a containing page informed of this document's rendered height.
#[derive(Debug)]
pub struct HeightReporter<S> {
    source: S,
    last_width: Option<f64>,
    pending: Option<PendingResize>,
}

impl<S: HeightSource> HeightReporter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_width: None,
            pending: None,
        }
    }

    fn report(&self) -> OutboundMessage {
        OutboundMessage::SendIframeHeight {
            iframe_height: self.source.content_height(),
        }
    }

    /// Initial report. Also seeds the width used to filter height-only
    /// resizes (mobile browser chrome showing and hiding).
    pub fn on_load(&mut self, viewport: Viewport) -> OutboundMessage {
        self.last_width = Some(viewport.width);
        self.report()
    }

    /// Arms the single-slot debounce timer when the viewport width actually
    /// changed; height-only resizes do nothing. A newer width change replaces
    /// the pending deadline.
    pub fn on_resize(&mut self, viewport: Viewport, now: Instant) {
        if self.last_width == Some(viewport.width) {
            return;
        }
        self.last_width = Some(viewport.width);
        self.pending = Some(PendingResize {
            deadline: now + RESIZE_DEBOUNCE,
        });
    }

    /// Fires the pending debounced report once its deadline has passed. The
    /// height is measured at fire time, not at resize time.
    pub fn poll(&mut self, now: Instant) -> Option<OutboundMessage> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        Some(self.report())
    }

    /// An explicit parent request is answered immediately, no debounce.
    pub fn on_message(&mut self, message: InboundMessage) -> OutboundMessage {
        match message {
            InboundMessage::GetHeight => self.report(),
        }
    }

    /// Accordion open/close changes the document height.
    pub fn on_accordion_toggle(&mut self) -> OutboundMessage {
        self.report()
    }

    /// Re-measures when the accordion body's `padding-top` transition
    /// settles; the paired `padding-bottom` transition is ignored.
    pub fn on_transition_end(&mut self, property: &str) -> Option<OutboundMessage> {
        (property == REMEASURE_TRANSITION_PROPERTY).then(|| self.report())
    }
}
