//! Output generation for search results.
//!
//! # Submodules
//!
//! - [`terminal`]: renders the session (error banner and article list) as text
//! - [`json`]: writes the merged results to a JSON file for other tools
//!
//! # JSON Output
//!
//! ```text
//! results.json
//! {
//!   "query": "tesla",
//!   "from": "2025-01-28",
//!   "selector": "all",
//!   "articles": [ { "id": "...", "title": "...", ... } ]
//! }
//! ```

pub mod json;
pub mod terminal;
