//! Player profile page → flat profile record

use scraper::Html;

use super::{element_text, labelled_value, selector, strip_label};
use crate::error::{Result, ScrapeError};
use crate::layout::ProfileLayout;
use crate::types::PlayerProfileRecord;

/// Read a profile page, reporting which section is missing
///
/// Callers degrade an error to [`PlayerProfileRecord::partial`].
pub fn extract_profile(
    html: &str,
    player: &str,
    layout: &ProfileLayout,
) -> Result<PlayerProfileRecord> {
    let document = Html::parse_document(html);
    let primary_selector = selector(layout.primary_selector)?;
    let secondary_selector = selector(layout.secondary_selector)?;

    let primary: Vec<String> =
        document.select(&primary_selector).map(|el| element_text(&el)).collect();
    let secondary: Vec<String> =
        document.select(&secondary_selector).map(|el| element_text(&el)).collect();

    let missing = |section| ScrapeError::PlayerNotResolved { player: player.to_string(), section };
    let layout_err = |detail: String| ScrapeError::layout(format!("profile {player}"), detail);

    // Gender and location
    let identity = primary.first().ok_or_else(|| missing("identity"))?;
    let (gender_part, _) = identity
        .split_once(layout.gender_delimiter)
        .ok_or_else(|| layout_err(format!("no gender delimiter in '{identity}'")))?;
    let gender = strip_label(gender_part, layout.gender_label).to_string();
    let location = labelled_value(identity, layout.location_label)
        .ok_or_else(|| layout_err(format!("no '{}' label", layout.location_label)))?
        .to_string();

    // College, then referral in whichever block carries it
    let education = secondary.first().ok_or_else(|| missing("college/referral"))?;
    let (college, referral_block) = if education.contains(layout.college_label) {
        let college = labelled_value(education, layout.college_label).map(str::to_string);
        (college, secondary.get(1))
    } else {
        (None, Some(education))
    };
    let referral = referral_block
        .filter(|text| text.contains(layout.referral_label))
        .and_then(|text| labelled_value(text, layout.referral_label))
        .map(str::to_string);

    // League and branch
    let membership = primary.get(1).ok_or_else(|| missing("league/branch"))?.replace('\t', "");
    let league_head = membership
        .find(layout.league_terminator)
        .map(|end| &membership[..end])
        .ok_or_else(|| layout_err("league line not terminated".to_string()))?;
    let league = strip_label(league_head, layout.league_label).to_string();
    let branch = labelled_value(&membership, layout.branch_label)
        .ok_or_else(|| layout_err(format!("no '{}' label", layout.branch_label)))?
        .to_string();

    Ok(PlayerProfileRecord {
        player: player.to_string(),
        gender: Some(gender),
        location: Some(location),
        college,
        league: Some(league),
        branch: Some(branch),
        referral,
    })
}
