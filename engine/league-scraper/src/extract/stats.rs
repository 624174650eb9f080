//! Player stats page → one row per question category

use scraper::Html;

use super::{element_text, selector};
use crate::error::{Result, ScrapeError};
use crate::layout::StatsLayout;
use crate::types::PlayerStatRecord;

/// Read the four aligned category columns of a stats page
pub fn extract_stats(
    html: &str,
    player: &str,
    layout: &StatsLayout,
) -> Result<Vec<PlayerStatRecord>> {
    let document = Html::parse_document(html);
    let column = |css: &str| -> Result<Vec<String>> {
        let sel = selector(css)?;
        Ok(document.select(&sel).map(|el| element_text(&el)).collect())
    };

    let categories = column(layout.category_selector)?;
    if categories.is_empty() {
        return Err(ScrapeError::PlayerNotResolved { player: player.to_string(), section: "category" });
    }
    let records = column(layout.record_selector)?;
    let pcts = column(layout.pct_selector)?;
    let lgpcts = column(layout.lgpct_selector)?;

    let context = format!("stats {player}");
    if records.len() != categories.len()
        || pcts.len() != categories.len()
        || lgpcts.len() != categories.len()
    {
        return Err(ScrapeError::layout(
            context,
            format!(
                "column lengths differ: {} categories, {} records, {} pct, {} lgpct",
                categories.len(),
                records.len(),
                pcts.len(),
                lgpcts.len()
            ),
        ));
    }

    categories
        .into_iter()
        .zip(records)
        .zip(pcts.into_iter().zip(lgpcts))
        .map(|((category, record), (pct, lgpct))| {
            let (correct, questions) = split_record(&record, layout.record_separator)
                .ok_or_else(|| {
                    ScrapeError::layout(&context, format!("record '{record}' for {category} is malformed"))
                })?;
            Ok(PlayerStatRecord {
                player: player.to_string(),
                category: Some(category),
                correct: Some(correct),
                questions: Some(questions),
                pct: Some(pct),
                lgpct: Some(lgpct),
            })
        })
        .collect()
}

/// `"3-5"` → `(3, 5)`
fn split_record(record: &str, separator: char) -> Option<(u32, u32)> {
    let (correct, questions) = record.split_once(separator)?;
    Some((correct.trim().parse().ok()?, questions.trim().parse().ok()?))
}
