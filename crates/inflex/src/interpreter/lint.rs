//! Static lint rules for inflection patterns.
//!
//! Checks every pattern of a text against a locale's stores without
//! rendering it, so problems show up regardless of the options a caller
//! would pass.

use crate::interpreter::LintWarning;
use crate::interpreter::engine::Scope;
use crate::parser::{Member, Pattern, PatternTarget, scan};
use crate::types::{LocaleInflections, Token};

/// Run the lint rules over every pattern found in `text`.
///
/// Warnings come back in pattern order.
pub fn lint_text(text: &str, inflections: &LocaleInflections) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for pattern in scan(text).patterns() {
        lint_pattern(pattern, inflections, &mut warnings);
    }
    warnings
}

fn lint_pattern(pattern: &Pattern, inflections: &LocaleInflections, warnings: &mut Vec<LintWarning>) {
    let store = inflections.strict();
    match &pattern.target {
        PatternTarget::Loose => lint_single(pattern, Scope::Loose(inflections.loose()), warnings),
        PatternTarget::Named(kind) if store.has_kind(kind) => lint_single(
            pattern,
            Scope::Strict {
                store,
                kind: kind.as_str(),
            },
            warnings,
        ),
        PatternTarget::Named(kind) | PatternTarget::Invalid(kind) => {
            warnings.push(LintWarning::UnknownKind {
                pattern: pattern.source.clone(),
                kind: kind.clone(),
            });
        }
        PatternTarget::Complex(kinds) => {
            let mut known = true;
            for kind in kinds.iter().filter(|kind| !store.has_kind(kind)) {
                known = false;
                warnings.push(LintWarning::UnknownKind {
                    pattern: pattern.source.clone(),
                    kind: kind.clone(),
                });
            }
            if known {
                lint_complex(pattern, inflections, kinds, warnings);
            }
        }
    }
}

/// Lint a loose or named pattern.
fn lint_single(pattern: &Pattern, scope: Scope<'_>, warnings: &mut Vec<LintWarning>) {
    let mut expected = match scope {
        Scope::Strict { kind, .. } => Some(kind),
        Scope::Loose(_) => None,
    };
    let mut listed: Vec<&str> = Vec::new();
    let mut repeated: Vec<&str> = Vec::new();
    let mut negated = false;

    for clause in &pattern.clauses {
        let [group] = clause.groups.as_slice() else {
            warnings.push(LintWarning::UnknownToken {
                pattern: pattern.source.clone(),
                token: clause.tokens.clone(),
            });
            continue;
        };
        for member in &group.members {
            let Some(token) = lint_member(pattern, scope, member, warnings) else {
                continue;
            };
            match expected {
                None => expected = Some(token.kind()),
                Some(kind) if kind != token.kind() => {
                    warnings.push(LintWarning::MisplacedToken {
                        pattern: pattern.source.clone(),
                        token: member.name.clone(),
                        kind: token.kind().to_string(),
                        expected: kind.to_string(),
                    });
                    continue;
                }
                Some(_) => {}
            }
            if member.negated {
                negated = true;
            } else if !listed.iter().any(|name| *name == token.name()) {
                listed.push(token.name());
            } else if !repeated.iter().any(|name| *name == token.name()) {
                repeated.push(token.name());
                warnings.push(LintWarning::RepeatedToken {
                    pattern: pattern.source.clone(),
                    token: token.name().to_string(),
                });
            }
        }
    }

    if pattern.free_text.is_some() || negated {
        return;
    }
    let Some(kind) = expected else {
        return;
    };
    let covered = scope
        .default_token(kind)
        .is_some_and(|default| listed.iter().any(|name| *name == default));
    if !covered {
        warnings.push(LintWarning::MayRenderEmpty {
            pattern: pattern.source.clone(),
            kind: kind.to_string(),
        });
    }
}

fn lint_complex(
    pattern: &Pattern,
    inflections: &LocaleInflections,
    kinds: &[String],
    warnings: &mut Vec<LintWarning>,
) {
    let store = inflections.strict();
    for clause in &pattern.clauses {
        if clause.groups.len() != kinds.len() {
            warnings.push(LintWarning::ComplexArity {
                pattern: pattern.source.clone(),
                tokens: clause.tokens.clone(),
                expected: kinds.len(),
                got: clause.groups.len(),
            });
            continue;
        }
        for (kind, group) in kinds.iter().zip(&clause.groups) {
            let scope = Scope::Strict {
                store,
                kind: kind.as_str(),
            };
            for member in &group.members {
                lint_member(pattern, scope, member, warnings);
            }
        }
    }
}

/// Resolve a member to its true token, warning about unknown names and
/// aliases.
fn lint_member<'s>(
    pattern: &Pattern,
    scope: Scope<'s>,
    member: &Member,
    warnings: &mut Vec<LintWarning>,
) -> Option<&'s Token> {
    let Some(token) = scope.token(&member.name) else {
        warnings.push(LintWarning::UnknownToken {
            pattern: pattern.source.clone(),
            token: member.to_string(),
        });
        return None;
    };
    match token.target() {
        None => Some(token),
        Some(target) => {
            warnings.push(LintWarning::AliasInPattern {
                pattern: pattern.source.clone(),
                token: token.name().to_string(),
                target: target.to_string(),
            });
            scope.token(target)
        }
    }
}
