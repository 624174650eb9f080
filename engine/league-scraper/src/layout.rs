//! Page layouts: where each field lives in the site's markup.
//!
//! Every selector, column index, class marker and label the extractors rely on
//! is declared here, so a change to the site's markup is a one-place edit.

/// Standings table on a match-day page
#[derive(Debug, Clone)]
pub struct StandingsLayout {
    pub table_selector: &'static str,
    /// Rows before the first player row
    pub header_rows: usize,
    /// Summary rows after the last player row
    pub trailing_rows: usize,
    /// Cell holding the player name (0-based, across `td` cells)
    pub player_col: usize,
    /// Cell class for a correct answer
    pub correct_marker: &'static str,
    /// Cell class for an incorrect answer
    pub incorrect_marker: &'static str,
}

/// Results table on a match-day page
#[derive(Debug, Clone)]
pub struct ResultsLayout {
    pub table_selector: &'static str,
    pub player_col: usize,
    pub opponent_col: usize,
}

/// Question list on a match-day page
#[derive(Debug, Clone)]
pub struct QuestionLayout {
    pub block_selector: &'static str,
    /// Position of the label `span` (question number) among the block's spans
    pub label_span: usize,
    /// Position of the answer `span` among the block's spans
    pub answer_span: usize,
    /// Separator between category and question text
    pub category_separator: &'static str,
}

/// Free-text blocks on a player profile page
#[derive(Debug, Clone)]
pub struct ProfileLayout {
    /// Blocks holding gender/location (first) and league/branch (second)
    pub primary_selector: &'static str,
    /// Blocks holding college and referral
    pub secondary_selector: &'static str,
    pub gender_label: &'static str,
    pub gender_delimiter: char,
    pub location_label: &'static str,
    pub college_label: &'static str,
    pub referral_label: &'static str,
    pub league_label: &'static str,
    pub league_terminator: &'static str,
    pub branch_label: &'static str,
}

/// Category columns on a player stats page
#[derive(Debug, Clone)]
pub struct StatsLayout {
    pub category_selector: &'static str,
    pub record_selector: &'static str,
    pub pct_selector: &'static str,
    pub lgpct_selector: &'static str,
    /// Separator inside a "correct-questions" record
    pub record_separator: char,
}

/// Complete set of layouts for the site
#[derive(Debug, Clone, Default)]
pub struct SiteLayout {
    pub standings: StandingsLayout,
    pub results: ResultsLayout,
    pub questions: QuestionLayout,
    pub profile: ProfileLayout,
    pub stats: StatsLayout,
}

impl Default for StandingsLayout {
    fn default() -> Self {
        Self {
            table_selector: r#"table[summary="Data table for current LL standings"]"#,
            header_rows: 1,
            trailing_rows: 3,
            player_col: 7,
            correct_marker: "c1",
            incorrect_marker: "c0",
        }
    }
}

impl Default for ResultsLayout {
    fn default() -> Self {
        Self { table_selector: "table.tblResults", player_col: 1, opponent_col: 3 }
    }
}

impl Default for QuestionLayout {
    fn default() -> Self {
        Self {
            block_selector: "div.ind-Q20",
            label_span: 0,
            answer_span: 1,
            category_separator: " - ",
        }
    }
}

impl Default for ProfileLayout {
    fn default() -> Self {
        Self {
            primary_selector: "p.close",
            secondary_selector: "p.close2",
            gender_label: "Gender",
            gender_delimiter: '\u{a0}',
            location_label: "Location",
            college_label: "College",
            referral_label: "Referral",
            league_label: "League",
            league_terminator: "\n\n",
            branch_label: "Branch",
        }
    }
}

impl Default for StatsLayout {
    fn default() -> Self {
        Self {
            category_selector: "td.std-left.one",
            record_selector: "td.std-mid.two",
            pct_selector: "td.std-mid.three",
            lgpct_selector: "td.std-mid.four",
            record_separator: '-',
        }
    }
}
