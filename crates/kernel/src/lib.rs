//! Site Counts kernel library.
//!
//! Block registry, host backends, theme rendering and the HTTP surface.
//! The `site-counts` binary wires these together.

pub mod block;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod locale;
pub mod routes;
pub mod state;
pub mod theme;
