//! Core binary search tree visualization library.
//!
//! Main components:
//! - [`generate`] - randomized midpoint tree generation.
//! - [`layout`] - geometric layout into drawable primitives.
//! - [`search`] - traced binary search and its step animation.
//! - [`session`] - tree-and-search lifecycle driven by a caller clock.
//! - [`render`] - sink trait for display mediums.
//! - [`primitives`] - drawable circle, connector and label records.
//! - [`config`] - tunable generation and layout settings.
//! - [`tree`] - key tree nodes.
//! - [`types`] - shared type aliases.

pub mod config;
pub mod generate;
pub mod layout;
pub mod primitives;
pub mod render;
pub mod search;
pub mod session;
pub mod tree;
pub mod types;
