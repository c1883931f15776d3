//! Skills: `<name> [<CODE>] [<level>] [(<days>)]`.

use turnreport_foundation::Skill;
use turnreport_lexer::Scanner;

/// Reads one skill at the scanner position.
pub fn scan_skill(s: &mut Scanner<'_>) -> Option<Skill> {
    s.attempt(|s| {
        s.skip_whitespace();
        let name = s.before(" [")?.trim();
        if name.is_empty() || name.contains([',', ';']) {
            return None;
        }
        let code = s.before("]")?;
        if code.is_empty() {
            return None;
        }
        let level = s.attempt(|s| {
            s.skip_whitespace();
            s.number()
        });
        let days = s.attempt(|s| {
            s.skip_whitespace();
            s.between('(', ')')?.trim().parse::<u32>().ok()
        });
        Some(Skill {
            name: name.to_string(),
            code: code.to_string(),
            level,
            days,
        })
    })
}

/// Parses a single skill clause.
#[must_use]
pub fn parse_skill(text: &str) -> Option<Skill> {
    let mut s = Scanner::new(text.trim());
    let skill = scan_skill(&mut s)?;
    s.match_char('.');
    s.is_at_end().then_some(skill)
}

/// Parses a comma-separated skill list. `none` is the empty list.
#[must_use]
pub fn parse_skill_list(text: &str) -> Option<Vec<Skill>> {
    let text = text.trim().trim_end_matches('.');
    if text.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    let mut s = Scanner::new(text);
    let skills = s.list(",", |s| {
        let clause = s.clause()?;
        parse_skill(clause)
    });
    (s.is_at_end() && !skills.is_empty()).then_some(skills)
}
