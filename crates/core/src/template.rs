//! Persona template parsing and substitution.
//!
//! Templates may only reference `{nationality}` and `{age_group}`; anything
//! else is rejected when the template is parsed, so rendering cannot fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Regex pattern matching `{placeholder}` tokens in persona templates.
pub const PLACEHOLDER_PATTERN: &str = r"\{[a-zA-Z_][a-zA-Z0-9_]*\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Values substituted into a persona template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaSubstitution<'a> {
    pub nationality: &'a str,
    pub age_group: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Nationality,
    AgeGroup,
}

/// A parsed persona template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaTemplate {
    segments: Vec<Segment>,
}

impl PersonaTemplate {
    pub fn parse(template: &str) -> Result<Self, CoreError> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for m in PLACEHOLDER_RE.find_iter(template) {
            if m.start() > cursor {
                segments.push(Segment::Literal(template[cursor..m.start()].to_string()));
            }
            let name = &template[m.start() + 1..m.end() - 1];
            segments.push(match name {
                "nationality" => Segment::Nationality,
                "age_group" => Segment::AgeGroup,
                other => {
                    return Err(CoreError::Validation(format!(
                        "Unknown persona placeholder '{{{other}}}'. Allowed: {{nationality}}, {{age_group}}"
                    )))
                }
            });
            cursor = m.end();
        }
        if cursor < template.len() {
            segments.push(Segment::Literal(template[cursor..].to_string()));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, values: &PersonaSubstitution<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Nationality => out.push_str(values.nationality),
                Segment::AgeGroup => out.push_str(values.age_group),
            }
        }
        out
    }
}
