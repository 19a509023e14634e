//! Remote font repositories for font-fetcher.
//!
//! This crate provides:
//! - `repo`: the [`Font`] search result and the [`FontRepo`] capability trait
//! - `similarity`: the shared string-closeness metric used for all fuzzy matching
//! - `rank`: ordering of raw search results by closeness to the requested name
//! - `style`: picking the extracted font file that best matches a style
//! - `archive` / `download`: fetching and unpacking whole-family archives
//! - `fonts1001`: the 1001fonts.com repository
//!
//! # Architecture
//!
//! A repository only has to answer two questions: "which fonts look like this
//! name?" and "give me the file for this style of that font". Everything that
//! is not specific to a remote site (ranking, style matching, archive handling)
//! lives in shared helpers so every repository behaves the same way.

pub mod archive;
pub mod download;
pub mod error;
pub mod fonts1001;
pub mod fsops;
pub mod http;
pub mod rank;
pub mod repo;
pub mod similarity;
pub mod style;

// Re-export main types for convenience
pub use error::{FetchError, Result};
pub use fonts1001::Fonts1001Repo;
pub use rank::sort_fonts_by_name;
pub use repo::{Font, FontRepo};
pub use similarity::{rank_by_similarity, similarity};
pub use style::{closest_style_match, find_font_files, is_font_file};
