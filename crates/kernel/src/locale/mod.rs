//! Interface translation.
//!
//! Gettext `.po` catalogs feed a [`Catalog`], which blocks consult through
//! the SDK's `Translator` trait.

mod catalog;
pub mod po_parser;

pub use catalog::Catalog;
