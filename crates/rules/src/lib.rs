#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rules` loads `default_config.yaml` (spec §6.2) and resolves its
//! `filters:` table into a per-path [`engine::ActionPlan`] (spec §4.2): the
//! ordered transform list, compressor choice, and cache/discard flags a
//! single [`image::Entry`] should carry before preprocessing.
//!
//! # Design
//!
//! Declaration order is the one property this crate must never lose:
//! filters are evaluated in the order they appear in the YAML document, and
//! later matching rules can override earlier ones for the same entry. The
//! YAML `filters` mapping is walked directly via `serde_yaml::Value` rather
//! than deserialized into a `BTreeMap`, specifically to keep that order —
//! a sorted map would silently scramble filter declaration order.
//!
//! # Errors
//!
//! Every [`error::ConfigError`] variant is a configuration error per spec
//! §7: malformed YAML, an unrecognized verb, or an unknown compressor name.
//! All are fatal and raised while loading the config, before any build
//! output is produced.

/// Raw action parsing: verb/disable/args normalization.
pub mod action;
/// YAML config loading and the ordered [`config::FilterTable`].
pub mod config;
/// Errors raised while loading config or resolving rules.
pub mod error;
/// Per-path action plan resolution.
pub mod engine;
/// Transform-name existence validation, fatal at config-resolution time.
pub mod validate;

pub use config::{FilterRule, FilterTable};
pub use engine::{apply_to_entries, resolve, ActionPlan};
pub use error::ConfigError;
pub use validate::validate_transforms;
