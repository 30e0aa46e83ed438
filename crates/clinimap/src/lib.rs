#![forbid(unsafe_code)]

//! Headless clinic-location widget embedder.
//!
//! Given a host HTML page, a validated [`EmbedConfig`] and a
//! [`ResourceFetcher`], the [`Embedder`] fetches the optional title/map/details
//! resources in parallel, validates them, and rewrites the page: marked slot
//! elements receive rendered fragments and one scoped `<style>` element is
//! appended to `<head>`.
//!
//! The only hard failure is configuration; everything after construction
//! degrades per section (a failed fetch or rejected payload just leaves that
//! section empty).

pub mod document;
pub mod embedder;
pub mod fetch;

pub use clinimap_core::{
    AreaDetail, ClinicDetail, ClinicType, EmbedColors, EmbedConfig, Error, HexColor,
    RawEmbedColors, RawEmbedConfig, RenderState, Result, SlotSet,
};
pub use clinimap_core::{height_sync, model, resource};
pub use clinimap_render as render;

pub use embedder::Embedder;
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{DirFetcher, FetchError, ResourceFetcher};
