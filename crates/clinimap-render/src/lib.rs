#![forbid(unsafe_code)]

//! HTML fragment and scoped stylesheet emitters for the clinic-location
//! widget. Pure string building: no I/O, no DOM, deterministic output.

pub mod accordion;
pub mod stylesheet;

pub use accordion::render_details;
pub use stylesheet::embed_css;
