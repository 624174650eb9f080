//! One match-day page → responses, questions and matchups

use scraper::Html;

use super::responses::find_standings;
use super::{extract_matchups, extract_questions, extract_responses};
use crate::coordinate::PageCoordinate;
use crate::error::{Result, ScrapeError};
use crate::layout::SiteLayout;
use crate::types::DayExtract;

/// Extract everything a match-day page holds.
///
/// A page without a standings table is an [`ScrapeError::InvalidCoordinate`];
/// that check runs before any other table is read.
pub fn extract_day(
    html: &str,
    coordinate: &PageCoordinate,
    num_qs: usize,
    layout: &SiteLayout,
) -> Result<DayExtract> {
    let document = Html::parse_document(html);

    if find_standings(&document, &layout.standings)?.is_none() {
        return Err(ScrapeError::InvalidCoordinate { coordinate: coordinate.clone() });
    }

    Ok(DayExtract {
        responses: extract_responses(&document, coordinate, num_qs, &layout.standings)?,
        questions: extract_questions(&document, coordinate, &layout.questions)?,
        matchups: extract_matchups(&document, coordinate, &layout.results)?,
    })
}
