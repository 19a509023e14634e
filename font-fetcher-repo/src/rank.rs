//! Relevance ordering of raw search results.
//!
//! Some repositories sort results by popularity, which can bury an exact-name
//! match several entries down. Every repository passes its results through
//! [`sort_fonts_by_name`] before returning them.

use crate::repo::Font;
use crate::similarity::rank_by_similarity;

/// Sort `fonts` by closeness of their names to `wanted_name`.
///
/// Case-insensitive. Fonts with an empty name are dropped. Equal scores keep
/// the repository's original order, so a name identical to the request (score
/// `1.0`) always comes first.
pub fn sort_fonts_by_name(wanted_name: &str, fonts: Vec<Font>) -> Vec<Font> {
    let named: Vec<Font> = fonts
        .into_iter()
        .filter(|font| !font.name.trim().is_empty())
        .collect();
    let sorted = rank_by_similarity(wanted_name, named, |font| font.name.clone());
    log::debug!(
        "Sorted retrieved fonts by name: {:?}",
        sorted.iter().map(|f| f.name.as_str()).collect::<Vec<_>>()
    );
    sorted
}
