//! New-theater filename substitution.
//!
//! Objects flagged `NewTheater` share one art entry across climates; the
//! second letter of the file name selects the variant (`GTCITY` temperate,
//! `GACITY` snow, `GUCITY` urban, `GGCITY` generic). Which names take part
//! depends on the engine.

use isomap_shared::{EngineType, TheaterType};
use tracing::trace;

use crate::assets::AssetCache;

/// Theater character of the climate-independent variant.
pub const GENERIC_THEATER_CHAR: char = 'G';

/// Whether `art_name` follows the engine's new-theater naming scheme.
/// Letters are compared case-sensitively, as the game does.
#[must_use]
pub fn uses_new_theater(engine: EngineType, art_name: &str) -> bool {
    let mut chars = art_name.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return false;
    };
    match engine {
        EngineType::TiberianSun | EngineType::Firestorm => {
            matches!(first, 'G' | 'N' | 'C') && matches!(second, 'A' | 'T')
        }
        EngineType::RedAlert2 => matches!(first, 'G' | 'N' | 'C') && matches!(second, 'A' | 'T' | 'U'),
        // any first letter: Ares lifts the G/N/C/Y restriction
        EngineType::YurisRevenge => matches!(second, 'A' | 'T' | 'U' | 'D' | 'L' | 'N'),
    }
}

/// Rewrites the second character of `filename` for `theater` when
/// `art_name` qualifies.
///
/// Tries the theater's own character, then the generic one, and keeps the
/// original name if neither file exists.
#[must_use]
pub fn apply_new_theater_if_needed(
    engine: EngineType,
    theater: TheaterType,
    assets: &AssetCache,
    art_name: &str,
    filename: &str,
) -> String {
    if !uses_new_theater(engine, art_name) || !filename.is_ascii() || filename.len() < 2 {
        return filename.to_string();
    }
    for candidate in [theater.new_theater_char(), GENERIC_THEATER_CHAR] {
        let substituted = with_second_char(filename, candidate);
        if assets.exists(&substituted) {
            trace!("New theater: {} -> {}", filename, substituted);
            return substituted;
        }
    }
    filename.to_string()
}

/// `name` with its second character replaced. `name` must be ASCII.
fn with_second_char(name: &str, c: char) -> String {
    let mut out = String::with_capacity(name.len());
    out.push_str(&name[..1]);
    out.push(c);
    out.push_str(&name[2..]);
    out
}
