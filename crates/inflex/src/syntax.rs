//! Reserved characters and names of the inflection pattern syntax.

/// Starts a pattern: `@{f:Lady|m:Sir}`, `@gender{f:Lady|m:Sir}`.
pub const MARKER: char = '@';

/// Placed right before the marker, suppresses interpolation of one pattern.
pub const ESCAPE: char = '\\';

/// A clause value consisting of only this character is replaced by the
/// description of the matched token.
pub const LOUD: char = '~';

/// Separates clauses inside a pattern.
pub const OPERATOR_OR: char = '|';

/// Separates a token set from its value.
pub const OPERATOR_ASSIGN: char = ':';

/// Joins alternative tokens into a group.
pub const OPERATOR_GROUP: char = ',';

/// Joins kinds in a complex pattern and positional groups in its token sets.
pub const OPERATOR_COMPLEX: char = '+';

/// Negates a token inside a group.
pub const OPERATOR_NOT: char = '!';

pub const OPEN: char = '{';
pub const CLOSE: char = '}';

/// Characters that can never be part of a kind or token name.
pub const RESERVED_CHARS: &[char] = &[
    OPERATOR_COMPLEX,
    OPERATOR_OR,
    OPERATOR_ASSIGN,
    OPERATOR_NOT,
    MARKER,
    OPEN,
    CLOSE,
    OPERATOR_GROUP,
    ESCAPE,
    LOUD,
];

/// Token name that holds a kind's default in configuration trees.
pub const DEFAULT_TOKEN: &str = "default";

/// Upper bound on alias indirections followed while loading.
pub const MAX_ALIAS_HOPS: usize = 64;

/// Check whether a kind or token name is non-empty and free of reserved
/// characters and whitespace.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || RESERVED_CHARS.contains(&c))
}
