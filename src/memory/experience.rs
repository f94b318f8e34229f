//! Experience cards: a view derived from profile search.
//!
//! The remote service has no experience-card endpoint. Cards are built by
//! re-reading the dynamic facets of a profile lookup, so when a dedicated
//! capability appears only this module has to change.

use super::result::OperationResult;
use super::types::{ExperienceCard, GetProfile, ProfileView, SearchExperienceCards};

pub const EXPERIENCE_CARD_ID_PREFIX: &str = "experience_card_";

/// Profile facts carry no relevance score, so every card is a full match.
pub const EXPERIENCE_CARD_SIMILARITY: f64 = 1.0;

pub fn experience_cards_from_profile(profile: &ProfileView) -> Vec<ExperienceCard> {
    profile
        .dynamic
        .iter()
        .enumerate()
        .map(|(index, entry)| ExperienceCard {
            id: format!("{EXPERIENCE_CARD_ID_PREFIX}{index}"),
            memory: entry.clone(),
            chunk: entry.clone(),
            similarity: EXPERIENCE_CARD_SIMILARITY,
        })
        .collect()
}

/// Re-map a profile result; a failed profile lookup stays failed with the
/// same error and no cards.
pub fn search_result_from_profile(
    profile: OperationResult<GetProfile>,
) -> OperationResult<SearchExperienceCards> {
    if !profile.success {
        return OperationResult::failure(profile.error.unwrap_or_default());
    }

    let results = experience_cards_from_profile(&profile.data.profile);
    OperationResult::success(SearchExperienceCards {
        total: results.len() as u64,
        results,
        timing: 0,
    })
}
