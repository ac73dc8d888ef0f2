//! The library code for the `guidegen` training guide generator. A guide is
//! built in a single pass:
//!
//! 1. Reading the JSON race data ([`crate::build`])
//! 2. Rendering it to one self-contained HTML document
//! 3. Writing the document to disk ([`crate::write`])
//!
//! The second step comes in two flavors. Structured documents (with `meta`
//! and `sections` keys) are rendered section by section ([`crate::section`])
//! through a dispatch table that maps each recognized JSON key to an HTML
//! fragment ([`crate::content`]), then placed into the page shell
//! ([`crate::guide`]). Flat race profiles instead fill the `{{PLACEHOLDER}}`s
//! of the race template ([`crate::race`]) with values, prose
//! ([`crate::narrative`], [`crate::tier`]) and generated tables
//! ([`crate::infographic`]); the altitude section is dropped for races below
//! 3000 ft.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod chart;
pub mod config;
pub mod content;
pub mod guide;
pub mod infographic;
pub mod lookup;
pub mod narrative;
pub mod race;
pub mod section;
pub mod substitute;
pub mod theme;
pub mod tier;
pub mod util;
pub mod write;
