#![forbid(unsafe_code)]

//! Clinic-location widget core: configuration, data model, resource
//! validation, and the iframe height-sync state machine.
//!
//! Design goals:
//! - deterministic, testable outputs (no I/O, no internal clocks)
//! - hard failures only at configuration time; everything after that is a
//!   recoverable present/absent outcome

pub mod config;
pub mod error;
pub mod height_sync;
pub mod model;
pub mod resource;

pub use config::{ClinicType, EmbedColors, EmbedConfig, HexColor, RawEmbedColors, RawEmbedConfig};
pub use error::{Error, Result};
pub use model::{AreaDetail, ClinicDetail, RenderState, SlotSet};
