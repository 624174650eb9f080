//! Standings table → one response per player per question

use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::coordinate::PageCoordinate;
use crate::error::{Result, ScrapeError};
use crate::layout::StandingsLayout;
use crate::types::ResponseRecord;

/// Locate the standings table, if the page has one
pub fn find_standings<'a>(
    document: &'a Html,
    layout: &StandingsLayout,
) -> Result<Option<ElementRef<'a>>> {
    let table_selector = selector(layout.table_selector)?;
    Ok(document.select(&table_selector).next())
}

/// Read every player row of the standings table.
///
/// Rows between the header and the trailing summary rows are player rows. For
/// each of the first `num_qs` cells the class marker gives correctness and the
/// cell text gives the raw defense points. An empty cell (a forfeit) reads as
/// null defense.
pub fn extract_responses(
    document: &Html,
    coordinate: &PageCoordinate,
    num_qs: usize,
    layout: &StandingsLayout,
) -> Result<Vec<ResponseRecord>> {
    let table = find_standings(document, layout)?
        .ok_or_else(|| ScrapeError::InvalidCoordinate { coordinate: coordinate.clone() })?;

    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let rows: Vec<ElementRef> = table.select(&row_selector).collect();
    let fixed_rows = layout.header_rows + layout.trailing_rows;
    if rows.len() < fixed_rows {
        return Err(ScrapeError::layout(
            coordinate.to_string(),
            format!("standings table has {} rows, expected at least {}", rows.len(), fixed_rows),
        ));
    }

    let player_rows = &rows[layout.header_rows..rows.len() - layout.trailing_rows];
    let mut responses = Vec::with_capacity(player_rows.len() * num_qs);

    for (row_index, row) in player_rows.iter().enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let needed = num_qs.max(layout.player_col + 1);
        if cells.len() < needed {
            return Err(ScrapeError::layout(
                format!("{coordinate} standings row {}", row_index + 1),
                format!("{} cells, expected at least {}", cells.len(), needed),
            ));
        }

        let player = element_text(&cells[layout.player_col]);

        for (q, cell) in cells.iter().take(num_qs).enumerate() {
            let context = format!("{coordinate} player {player} question {}", q + 1);
            let correct = read_marker(cell, layout, &context)?;
            let defense = read_defense(cell, &context)?;
            responses.push(ResponseRecord::new(coordinate, (q + 1) as u32, &player, correct, defense));
        }
    }

    Ok(responses)
}

/// First class of the cell must be one of the two recognised markers
fn read_marker(cell: &ElementRef, layout: &StandingsLayout, context: &str) -> Result<u8> {
    match cell.value().attr("class").and_then(|classes| classes.split_whitespace().next()) {
        Some(class) if class == layout.correct_marker => Ok(1),
        Some(class) if class == layout.incorrect_marker => Ok(0),
        Some(class) => Err(ScrapeError::layout(context, format!("unrecognised marker '{class}'"))),
        None => Err(ScrapeError::layout(context, "response cell has no marker")),
    }
}

fn read_defense(cell: &ElementRef, context: &str) -> Result<Option<i32>> {
    let text = element_text(cell);
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| ScrapeError::layout(context, format!("defense value '{text}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::RundleKey;
    use crate::fixtures::{standings_page, StandingsRow};

    fn coordinate() -> PageCoordinate {
        RundleKey::new("Pacific", "A", "").at(77, 4)
    }

    #[test]
    fn test_extract_responses_reads_markers_and_defense() {
        let html = standings_page(&[
            StandingsRow::new("Alice", &[("c1", "0"), ("c0", "2"), ("c1", "1")]),
            StandingsRow::new("Bob", &[("c0", "3"), ("c0", "1"), ("c1", "0")]),
        ]);
        let document = Html::parse_document(&html);

        let responses =
            extract_responses(&document, &coordinate(), 3, &StandingsLayout::default()).unwrap();

        assert_eq!(responses.len(), 6);
        assert_eq!(responses[0].player, "Alice");
        assert_eq!(responses[0].q_num, 1);
        assert_eq!(responses[0].correct, 1);
        assert_eq!(responses[1].correct, 0);
        assert_eq!(responses[1].defense, Some(2));
        assert_eq!(responses[3].player, "Bob");
        assert_eq!(responses[3].defense, Some(3));
        assert!(responses.iter().all(|r| r.correct <= 1));
        assert!(responses.iter().all(|r| r.league == "Pacific" && r.day == 4 && r.season == 77));
    }

    #[test]
    fn test_header_and_summary_rows_are_skipped() {
        let html = standings_page(&[StandingsRow::new("Alice", &[("c1", "1")])]);
        let document = Html::parse_document(&html);

        let responses =
            extract_responses(&document, &coordinate(), 1, &StandingsLayout::default()).unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].player, "Alice");
    }

    #[test]
    fn test_missing_markers_are_a_layout_mismatch() {
        let html = standings_page(&[StandingsRow::new(
            "Alice",
            &[("c1", "1"), ("c1", "0"), ("", "1"), ("", "2"), ("", "0"), ("", "1")],
        )]);
        let document = Html::parse_document(&html);

        let err = extract_responses(&document, &coordinate(), 6, &StandingsLayout::default())
            .unwrap_err();

        match err {
            ScrapeError::LayoutMismatch { context, .. } => {
                assert!(context.contains("Alice"));
                assert!(context.contains("question 3"));
            }
            other => panic!("expected layout mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_marker_is_a_layout_mismatch() {
        let html = standings_page(&[StandingsRow::new("Alice", &[("c2", "1")])]);
        let document = Html::parse_document(&html);

        let err = extract_responses(&document, &coordinate(), 1, &StandingsLayout::default())
            .unwrap_err();
        assert!(matches!(err, ScrapeError::LayoutMismatch { .. }));
    }

    #[test]
    fn test_non_numeric_defense_is_a_layout_mismatch() {
        let html = standings_page(&[StandingsRow::new("Alice", &[("c1", "F")])]);
        let document = Html::parse_document(&html);

        let err = extract_responses(&document, &coordinate(), 1, &StandingsLayout::default())
            .unwrap_err();
        assert!(matches!(err, ScrapeError::LayoutMismatch { .. }));
    }

    #[test]
    fn test_empty_defense_cells_read_as_null() {
        let html = standings_page(&[
            StandingsRow::new("P", &[("c1", ""), ("c0", "")]),
            StandingsRow::new("O", &[("c0", "2"), ("c1", "1")]),
        ]);
        let document = Html::parse_document(&html);

        let responses =
            extract_responses(&document, &coordinate(), 2, &StandingsLayout::default()).unwrap();

        assert_eq!(responses.len(), 4);
        let defense: Vec<Option<i32>> = responses.iter().map(|r| r.defense).collect();
        assert_eq!(defense, vec![None, None, Some(2), Some(1)]);
        assert_eq!(responses[0].correct, 1);
    }

    #[test]
    fn test_missing_table_is_invalid_coordinate() {
        let document = Html::parse_document("<html><body><p>No such rundle</p></body></html>");

        let err = extract_responses(&document, &coordinate(), 6, &StandingsLayout::default())
            .unwrap_err();
        assert!(err.is_invalid_coordinate());
    }
}
