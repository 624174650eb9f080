//! Results table → symmetric player/opponent pairings

use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::coordinate::PageCoordinate;
use crate::error::{Result, ScrapeError};
use crate::layout::ResultsLayout;
use crate::types::MatchupEdge;

/// Read the day's pairings; each pairing is emitted in both directions
pub fn extract_matchups(
    document: &Html,
    coordinate: &PageCoordinate,
    layout: &ResultsLayout,
) -> Result<Vec<MatchupEdge>> {
    let table_selector = selector(layout.table_selector)?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ScrapeError::layout(coordinate.to_string(), "results table not found"))?;

    let needed = layout.player_col.max(layout.opponent_col) + 1;
    let mut pairs = Vec::new();

    for (row_index, row) in table.select(&row_selector).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        // Header rows carry only <th> cells
        if cells.is_empty() {
            continue;
        }
        if cells.len() < needed {
            return Err(ScrapeError::layout(
                format!("{coordinate} results row {}", row_index + 1),
                format!("{} cells, expected at least {}", cells.len(), needed),
            ));
        }
        pairs.push((element_text(&cells[layout.player_col]), element_text(&cells[layout.opponent_col])));
    }

    let edge = |player: &str, opponent: &str| MatchupEdge {
        season: coordinate.season,
        day: coordinate.day,
        player: player.to_string(),
        opponent: opponent.to_string(),
    };

    let mut edges: Vec<MatchupEdge> = pairs.iter().map(|(p, o)| edge(p, o)).collect();
    edges.extend(pairs.iter().map(|(p, o)| edge(o, p)));
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::RundleKey;
    use crate::fixtures::results_page;
    use std::collections::HashSet;

    fn coordinate() -> PageCoordinate {
        RundleKey::new("Alpine", "C", "_Div_1").at(78, 2)
    }

    #[test]
    fn test_matchups_are_symmetric() {
        let html = results_page(&[("Alice", "Bob"), ("Carol", "Dave")]);
        let document = Html::parse_document(&html);

        let edges = extract_matchups(&document, &coordinate(), &ResultsLayout::default()).unwrap();
        assert_eq!(edges.len(), 4);

        let set: HashSet<(String, String)> =
            edges.iter().map(|e| (e.player.clone(), e.opponent.clone())).collect();
        for edge in &edges {
            assert!(set.contains(&(edge.opponent.clone(), edge.player.clone())));
            assert_eq!(edge.season, 78);
            assert_eq!(edge.day, 2);
        }
        assert!(set.contains(&("Bob".to_string(), "Alice".to_string())));
    }

    #[test]
    fn test_missing_results_table_is_a_layout_mismatch() {
        let document = Html::parse_document("<html><body></body></html>");
        let err =
            extract_matchups(&document, &coordinate(), &ResultsLayout::default()).unwrap_err();
        assert!(matches!(err, ScrapeError::LayoutMismatch { .. }));
    }

    #[test]
    fn test_short_row_is_a_layout_mismatch() {
        let html = r#"<html><body><table class="tblResults">
            <tr><td>1</td><td>Alice</td></tr>
        </table></body></html>"#;
        let document = Html::parse_document(html);
        let err =
            extract_matchups(&document, &coordinate(), &ResultsLayout::default()).unwrap_err();
        assert!(matches!(err, ScrapeError::LayoutMismatch { .. }));
    }
}
