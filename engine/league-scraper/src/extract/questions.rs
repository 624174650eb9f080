//! Question blocks → one record per question

use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::coordinate::PageCoordinate;
use crate::error::{Result, ScrapeError};
use crate::layout::QuestionLayout;
use crate::types::QuestionRecord;

/// Read the day's question list in page order; `q_num` is the 1-based block position
pub fn extract_questions(
    document: &Html,
    coordinate: &PageCoordinate,
    layout: &QuestionLayout,
) -> Result<Vec<QuestionRecord>> {
    let block_selector = selector(layout.block_selector)?;

    document
        .select(&block_selector)
        .enumerate()
        .map(|(index, block)| {
            let q_num = (index + 1) as u32;
            let context = format!("{coordinate} question {q_num}");
            let (category, q_text, a_text) = parse_block(block, layout, &context)?;
            Ok(QuestionRecord {
                category,
                q_text,
                a_text,
                season: coordinate.season,
                day: coordinate.day,
                q_num,
            })
        })
        .collect()
}

/// Split one block into (category, question text, answer text).
///
/// The text between the label span and the answer span reads
/// `"CATEGORY - question text"`; the answer span holds the answer.
fn parse_block(
    block: ElementRef,
    layout: &QuestionLayout,
    context: &str,
) -> Result<(String, String, String)> {
    let spans: Vec<usize> = block
        .children()
        .enumerate()
        .filter(|(_, node)| {
            ElementRef::wrap(*node).map(|el| el.value().name() == "span").unwrap_or(false)
        })
        .map(|(position, _)| position)
        .collect();

    let label_at = *spans
        .get(layout.label_span)
        .ok_or_else(|| ScrapeError::layout(context, "question label not found"))?;
    let answer_at = *spans
        .get(layout.answer_span)
        .ok_or_else(|| ScrapeError::layout(context, "answer marker not found"))?;

    let mut body = String::new();
    let mut answer = None;
    for (position, node) in block.children().enumerate() {
        if position <= label_at {
            continue;
        }
        if position == answer_at {
            answer = ElementRef::wrap(node).map(|el| element_text(&el));
            break;
        }
        if let Some(text) = node.value().as_text() {
            body.push_str(text);
        } else if let Some(element) = ElementRef::wrap(node) {
            body.extend(element.text());
        }
    }

    let a_text = answer.ok_or_else(|| ScrapeError::layout(context, "answer marker not found"))?;
    let body = body.trim();
    let (category, q_text) = body.split_once(layout.category_separator).ok_or_else(|| {
        ScrapeError::layout(
            context,
            format!("no '{}' separator in '{}'", layout.category_separator, body),
        )
    })?;

    Ok((category.trim().to_string(), q_text.trim().to_string(), a_text))
}
