//! Public AST types for scanned inflection patterns.
//!
//! These types are public to enable external tooling (linters, extractors).

use std::fmt;

use crate::syntax::{OPERATOR_COMPLEX, OPERATOR_GROUP, OPERATOR_NOT, is_valid_name};

/// A scanned string: literal text interleaved with patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedText {
    pub segments: Vec<Segment>,
}

impl ScannedText {
    /// Iterate over the patterns found in the text.
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Pattern(pattern) => Some(pattern),
            Segment::Literal(_) => None,
        })
    }
}

/// A segment of a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output as-is, including escaped patterns.
    Literal(String),
    /// A pattern to interpolate.
    Pattern(Pattern),
}

/// One pattern occurrence: `@kinds{clauses|free text}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Pattern text as written, used in error messages.
    pub source: String,
    pub target: PatternTarget,
    pub clauses: Vec<Clause>,
    /// Trailing clause without a token set.
    pub free_text: Option<String>,
}

/// Which store and kinds a pattern reads, decided once at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTarget {
    /// `@{...}`: kind inferred from the first token, loose store.
    Loose,
    /// `@gender{...}`: one strict kind.
    Named(String),
    /// `@gender+number{...}`: several strict kinds matched positionally.
    Complex(Vec<String>),
    /// Kind segment that is not a valid kind list.
    Invalid(String),
}

impl PatternTarget {
    /// Classify the kind segment between the marker and the opening brace.
    pub fn parse(kinds: &str) -> Self {
        if kinds.is_empty() {
            return PatternTarget::Loose;
        }
        let names: Vec<&str> = kinds.split(OPERATOR_COMPLEX).collect();
        let distinct = names
            .iter()
            .enumerate()
            .all(|(i, name)| !names[..i].contains(name));
        if !distinct || !names.iter().all(|name| is_valid_name(name)) {
            return PatternTarget::Invalid(kinds.to_string());
        }
        match names.as_slice() {
            [name] => PatternTarget::Named((*name).to_string()),
            _ => PatternTarget::Complex(names.into_iter().map(str::to_string).collect()),
        }
    }
}

/// A `tokens:value` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Token set as written, used in error messages.
    pub tokens: String,
    /// Positional groups; exactly one outside complex patterns. Empty when
    /// the clause has no token set at all.
    pub groups: Vec<Group>,
    pub value: ClauseValue,
}

/// Alternative tokens separated by commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub members: Vec<Member>,
}

/// A token reference, possibly negated with `!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub negated: bool,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, "{OPERATOR_GROUP}")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{OPERATOR_NOT}")?;
        }
        write!(f, "{}", self.name)
    }
}

/// The value emitted when a clause matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    /// Literal text, with a leading escape character already stripped.
    Text(String),
    /// `~`: replaced by the matched token's description.
    Loud,
}
