//! HTML builders shaped like the league site's pages, for tests

/// One player row of a standings table: `(class, defense)` per question
pub struct StandingsRow {
    pub player: String,
    pub cells: Vec<(String, String)>,
}

impl StandingsRow {
    pub fn new(player: &str, cells: &[(&str, &str)]) -> Self {
        Self {
            player: player.to_string(),
            cells: cells.iter().map(|(c, d)| (c.to_string(), d.to_string())).collect(),
        }
    }
}

fn wrap(body: &str) -> String {
    format!("<html><head><title>LL</title></head><body>{body}</body></html>")
}

fn standings_table(rows: &[StandingsRow]) -> String {
    let mut table = String::from(
        r#"<table summary="Data table for current LL standings"><tr><th>1</th><th>2</th><th>3</th><th>4</th><th>5</th><th>6</th><th>Rank</th><th>Player</th></tr>"#,
    );
    for row in rows {
        table.push_str("<tr>");
        for (class, defense) in &row.cells {
            if class.is_empty() {
                table.push_str(&format!("<td>{defense}</td>"));
            } else {
                table.push_str(&format!(r#"<td class="{class}">{defense}</td>"#));
            }
        }
        // Pad to the player-name column
        for _ in row.cells.len()..7 {
            table.push_str("<td></td>");
        }
        table.push_str(&format!("<td>{}</td></tr>", row.player));
    }
    for label in ["Avg", "Total", "Pct"] {
        table.push_str(&format!("<tr><td>{label}</td></tr>"));
    }
    table.push_str("</table>");
    table
}

fn question_blocks(questions: &[(&str, &str, &str)]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, (category, text, answer))| {
            format!(
                r#"<div class="ind-Q20"><span>Q{}.</span> {category} - {text} <span class="answer">{answer}</span></div>"#,
                i + 1
            )
        })
        .collect()
}

fn results_table(pairs: &[(&str, &str)]) -> String {
    let mut table = String::from(r#"<table class="tblResults">"#);
    for (i, (player, opponent)) in pairs.iter().enumerate() {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{player}</td><td>vs</td><td>{opponent}</td></tr>",
            i + 1
        ));
    }
    table.push_str("</table>");
    table
}

pub fn standings_page(rows: &[StandingsRow]) -> String {
    wrap(&standings_table(rows))
}

pub fn questions_page(questions: &[(&str, &str, &str)]) -> String {
    wrap(&question_blocks(questions))
}

pub fn results_page(pairs: &[(&str, &str)]) -> String {
    wrap(&results_table(pairs))
}

/// Full match-day page: standings, question list and results
pub fn match_day_page(
    rows: &[StandingsRow],
    questions: &[(&str, &str, &str)],
    pairs: &[(&str, &str)],
) -> String {
    wrap(&format!(
        "{}{}{}",
        standings_table(rows),
        question_blocks(questions),
        results_table(pairs)
    ))
}

/// Profile page contents; `None` leaves the block out
pub struct ProfileFixture {
    pub gender: &'static str,
    pub location: &'static str,
    pub college: Option<&'static str>,
    pub referral: Option<&'static str>,
    pub league: &'static str,
    pub branch: &'static str,
}

impl Default for ProfileFixture {
    fn default() -> Self {
        Self {
            gender: "Female",
            location: "Duluth, MN, USA",
            college: None,
            referral: None,
            league: "Pacific",
            branch: "Lakeside",
        }
    }
}

pub fn profile_page(profile: &ProfileFixture) -> String {
    let mut body = format!(
        r#"<p class="close">Gender: {}&nbsp;&nbsp;Location: {}</p>"#,
        profile.gender, profile.location
    );
    if let Some(college) = profile.college {
        body.push_str(&format!(r#"<p class="close2">College: {college}</p>"#));
    }
    match profile.referral {
        Some(referral) => body.push_str(&format!(r#"<p class="close2">Referral: {referral}</p>"#)),
        None if profile.college.is_none() => body.push_str(r#"<p class="close2">Member</p>"#),
        None => {}
    }
    body.push_str(&format!(
        "<p class=\"close\">League: {}\n\n\tBranch: {}</p>",
        profile.league, profile.branch
    ));
    wrap(&body)
}

/// Stats page: `(category, record, pct, lgpct)` per row
pub fn stats_page(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut table = String::from("<table>");
    for (category, record, pct, lgpct) in rows {
        table.push_str(&format!(
            r#"<tr><td class="std-left one">{category}</td><td class="std-mid two">{record}</td><td class="std-mid three">{pct}</td><td class="std-mid four">{lgpct}</td></tr>"#
        ));
    }
    table.push_str("</table>");
    wrap(&table)
}
