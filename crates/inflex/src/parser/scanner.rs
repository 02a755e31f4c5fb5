//! Pattern scanner using winnow.
//!
//! Finds inflection patterns in arbitrary text. Handles:
//! - Loose (`@{...}`), named (`@kind{...}`) and complex (`@a+b{...}`) patterns
//! - Multi-body patterns sharing one kind segment: `@kind{...}{...}`
//! - Escapes: `@@{...}` and `\@{...}` leave the pattern as text minus one character
//! - Text that only resembles a pattern (`user@example.com`) passes through

use winnow::combinator::{alt, delimited, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::ast::*;
use crate::syntax::{
    CLOSE, ESCAPE, LOUD, MARKER, OPEN, OPERATOR_ASSIGN, OPERATOR_COMPLEX, OPERATOR_GROUP,
    OPERATOR_NOT, OPERATOR_OR,
};

/// Scan a string into literal and pattern segments.
///
/// Scanning never fails: anything that is not a well-formed pattern is
/// literal text.
pub fn scan(input: &str) -> ScannedText {
    let mut remaining = input;
    let pieces: Vec<Vec<Segment>> = repeat(0.., segment)
        .parse_next(&mut remaining)
        .unwrap_or_default();
    let mut segments = merge_literals(pieces.into_iter().flatten());
    if !remaining.is_empty() {
        segments.push(Segment::Literal(remaining.to_string()));
    }
    ScannedText { segments }
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: impl Iterator<Item = Segment>) -> Vec<Segment> {
    let mut result: Vec<Segment> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse one piece of input: an escaped pattern, a pattern, or literal text.
fn segment(input: &mut &str) -> ModalResult<Vec<Segment>> {
    alt((escaped_pattern, pattern, literal)).parse_next(input)
}

/// Parse `@@{...}` or `\@{...}`, keeping the pattern text without the escape.
fn escaped_pattern(input: &mut &str) -> ModalResult<Vec<Segment>> {
    preceded(one_of([MARKER, ESCAPE]), raw_pattern.take())
        .map(|raw: &str| vec![Segment::Literal(raw.to_string())])
        .parse_next(input)
}

/// Parse a pattern and split it into one segment per body.
fn pattern(input: &mut &str) -> ModalResult<Vec<Segment>> {
    let (kinds, bodies) = raw_pattern(input)?;
    let target = PatternTarget::parse(kinds);
    Ok(bodies
        .into_iter()
        .map(|body| Segment::Pattern(parse_body(kinds, target.clone(), body)))
        .collect())
}

/// Parse literal text up to the next character that may start a pattern.
fn literal(input: &mut &str) -> ModalResult<Vec<Segment>> {
    alt((
        take_while(1.., |c: char| c != MARKER && c != ESCAPE),
        any.take(),
    ))
    .map(|text: &str| vec![Segment::Literal(text.to_string())])
    .parse_next(input)
}

/// Parse `@kinds{body}{body}...` into the kind segment and the bodies.
fn raw_pattern<'i>(input: &mut &'i str) -> ModalResult<(&'i str, Vec<&'i str>)> {
    MARKER.parse_next(input)?;
    let kinds = kind_segment(input)?;
    let bodies: Vec<&str> = repeat(1.., body).parse_next(input)?;
    Ok((kinds, bodies))
}

/// Parse the kind segment: anything up to the opening brace that cannot end
/// or start another pattern.
fn kind_segment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., |c: char| {
        !matches!(c, OPEN | CLOSE | MARKER | OPERATOR_OR) && !c.is_whitespace()
    })
    .parse_next(input)
}

/// Parse a braced body: `{content}`.
fn body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited(OPEN, take_while(1.., |c: char| c != CLOSE), CLOSE).parse_next(input)
}

/// Split a body into clauses and the optional free text.
fn parse_body(kinds: &str, target: PatternTarget, content: &str) -> Pattern {
    let parts: Vec<&str> = content.split(OPERATOR_OR).collect();
    let last = parts.len().saturating_sub(1);
    let mut clauses = Vec::with_capacity(parts.len());
    let mut free_text = None;

    for (i, part) in parts.into_iter().enumerate() {
        match part.split_once(OPERATOR_ASSIGN) {
            Some((tokens, value)) => clauses.push(Clause {
                tokens: tokens.to_string(),
                groups: parse_token_set(tokens),
                value: parse_value(value),
            }),
            None if i == last => free_text = Some(part.to_string()),
            None => clauses.push(Clause {
                tokens: part.to_string(),
                groups: Vec::new(),
                value: ClauseValue::Text(String::new()),
            }),
        }
    }

    Pattern {
        source: format!("{MARKER}{kinds}{OPEN}{content}{CLOSE}"),
        target,
        clauses,
        free_text,
    }
}

/// Split `a,!b+c` into positional groups of members.
fn parse_token_set(tokens: &str) -> Vec<Group> {
    tokens
        .split(OPERATOR_COMPLEX)
        .map(|group| Group {
            members: group.split(OPERATOR_GROUP).map(parse_member).collect(),
        })
        .collect()
}

fn parse_member(member: &str) -> Member {
    match member.strip_prefix(OPERATOR_NOT) {
        Some(name) => Member {
            name: name.to_string(),
            negated: true,
        },
        None => Member {
            name: member.to_string(),
            negated: false,
        },
    }
}

/// Classify a clause value: loud marker, escaped text, or plain text.
fn parse_value(value: &str) -> ClauseValue {
    let mut chars = value.chars();
    if chars.next() == Some(LOUD) && chars.next().is_none() {
        return ClauseValue::Loud;
    }
    ClauseValue::Text(value.strip_prefix(ESCAPE).unwrap_or(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_detects_loud() {
        assert_eq!(parse_value("~"), ClauseValue::Loud);
        assert_eq!(parse_value("~~"), ClauseValue::Text("~~".into()));
    }

    #[test]
    fn parse_value_strips_one_escape() {
        assert_eq!(parse_value("\\~"), ClauseValue::Text("~".into()));
        assert_eq!(parse_value("\\\\x"), ClauseValue::Text("\\x".into()));
    }

    #[test]
    fn parse_member_reads_negation() {
        assert_eq!(
            parse_member("!m"),
            Member {
                name: "m".into(),
                negated: true
            }
        );
        assert_eq!(
            parse_member("!"),
            Member {
                name: String::new(),
                negated: true
            }
        );
    }

    #[test]
    fn merge_literals_joins_neighbours() {
        let merged = merge_literals(
            vec![
                Segment::Literal("a".into()),
                Segment::Literal("b".into()),
            ]
            .into_iter(),
        );
        assert_eq!(merged, vec![Segment::Literal("ab".into())]);
    }
}
