//! Pattern interpolation engine.
//!
//! Resolves each scanned pattern against a locale's stores and the
//! requested options, producing the value of the first matching clause, the
//! default clause's value, or the pattern's free text.

use crate::interpreter::{InflectionOptions, PatternError, Switches};
use crate::parser::{ClauseValue, Group, Member, Pattern, PatternTarget, Segment, scan};
use crate::syntax::MARKER;
use crate::types::{LocaleInflections, LooseStore, StrictStore, Token};

/// Interpolate every pattern in `text` against one locale's inflections.
///
/// `switches` are the engine-wide values; overrides carried by `options`
/// are merged on top for this call only.
///
/// # Errors
///
/// Returns the first [`PatternError`] found, only when the effective
/// `raises` switch is on. Otherwise malformed patterns degrade to their free
/// text or to an empty string.
///
/// # Example
///
/// ```
/// use inflex::{InflectionOptions, RawInflections, Switches, interpolate_with, load_inflections};
///
/// let raw = RawInflections::new().kind("gender", [
///     ("m", "male"), ("f", "female"), ("n", "neuter"), ("default", "n"),
/// ]);
/// let inflections = load_inflections("en", &raw).unwrap();
/// let options = InflectionOptions::new().with("gender", "f");
/// let text = interpolate_with("Dear @{f:Lady|m:Sir|n:You}!", &inflections, Switches::default(), &options);
/// assert_eq!(text.unwrap(), "Dear Lady!");
/// ```
pub fn interpolate_with(
    text: &str,
    inflections: &LocaleInflections,
    switches: Switches,
    options: &InflectionOptions,
) -> Result<String, PatternError> {
    if !text.contains(MARKER) {
        return Ok(text.to_string());
    }

    let engine = Engine {
        inflections,
        options,
        switches: switches.merged(options),
    };
    let scanned = scan(text);
    let mut output = String::with_capacity(text.len());
    for segment in &scanned.segments {
        match segment {
            Segment::Literal(literal) => output.push_str(literal),
            Segment::Pattern(pattern) => output.push_str(&engine.eval_pattern(pattern)?),
        }
    }
    Ok(output)
}

/// The store a pattern reads from, fixed once per pattern.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scope<'s> {
    Loose(&'s LooseStore),
    Strict { store: &'s StrictStore, kind: &'s str },
}

impl<'s> Scope<'s> {
    pub(crate) fn is_strict(self) -> bool {
        matches!(self, Scope::Strict { .. })
    }

    pub(crate) fn token(self, name: &str) -> Option<&'s Token> {
        match self {
            Scope::Loose(store) => store.token(name, None),
            Scope::Strict { store, kind } => store.token(name, kind),
        }
    }

    pub(crate) fn true_token(self, name: &str, kind: &str) -> Option<&'s str> {
        self.token(name)
            .filter(|token| token.kind() == kind)
            .map(Token::true_name)
    }

    pub(crate) fn default_token(self, kind: &str) -> Option<&'s str> {
        match self {
            Scope::Loose(store) => store.get_default(kind),
            Scope::Strict { store, kind } => store.get_default(kind),
        }
    }

    pub(crate) fn description(self, token: &str) -> Option<&'s str> {
        self.token(token).map(Token::description)
    }
}

/// Tokens of one group after resolution, split by negation.
#[derive(Debug, Default)]
struct ResolvedGroup<'s> {
    positives: Vec<&'s str>,
    negatives: Vec<&'s str>,
}

impl ResolvedGroup<'_> {
    fn is_empty(&self) -> bool {
        self.positives.is_empty() && self.negatives.is_empty()
    }

    fn contains(&self, token: &str) -> bool {
        self.positives.iter().any(|positive| *positive == token)
    }

    /// More than one negated member matches every option.
    fn matches(&self, option: &str) -> bool {
        match self.negatives.as_slice() {
            [] => self.contains(option),
            [negated] => *negated != option,
            _ => true,
        }
    }
}

/// The option resolved for a pattern's kind.
#[derive(Debug, Clone, Copy)]
struct OptionState<'s> {
    /// True token to match against; `None` when nothing usable was supplied.
    option: Option<&'s str>,
    default: Option<&'s str>,
}

struct Engine<'a> {
    inflections: &'a LocaleInflections,
    options: &'a InflectionOptions,
    switches: Switches,
}

impl Engine<'_> {
    fn eval_pattern(&self, pattern: &Pattern) -> Result<String, PatternError> {
        match &pattern.target {
            PatternTarget::Loose => self.eval_single(pattern, Scope::Loose(self.inflections.loose())),
            PatternTarget::Named(kind) => {
                let store = self.inflections.strict();
                if !store.has_kind(kind) {
                    self.suppress(PatternError::InvalidKind {
                        pattern: pattern.source.clone(),
                        kind: kind.clone(),
                    })?;
                    return Ok(free_text(pattern));
                }
                self.eval_single(pattern, Scope::Strict { store, kind: kind.as_str() })
            }
            PatternTarget::Complex(kinds) => self.eval_complex(pattern, kinds),
            PatternTarget::Invalid(kinds) => {
                self.suppress(PatternError::InvalidKind {
                    pattern: pattern.source.clone(),
                    kind: kinds.clone(),
                })?;
                Ok(free_text(pattern))
            }
        }
    }

    /// Evaluate a loose or named pattern: one kind, one group per clause.
    fn eval_single<'s>(&self, pattern: &'s Pattern, scope: Scope<'s>) -> Result<String, PatternError> {
        let mut expected = match scope {
            Scope::Strict { kind, .. } => Some(kind),
            Scope::Loose(_) => None,
        };
        let mut state: Option<OptionState<'s>> = None;
        let mut fallback: Option<(&'s ClauseValue, &'s str)> = None;

        for clause in &pattern.clauses {
            let [group] = clause.groups.as_slice() else {
                self.suppress(PatternError::InvalidToken {
                    pattern: pattern.source.clone(),
                    token: clause.tokens.clone(),
                })?;
                continue;
            };
            let Some(members) = self.resolve_group(pattern, scope, group, &mut expected)? else {
                continue;
            };
            let Some(kind) = expected else {
                continue;
            };
            let current = match state {
                Some(current) => current,
                None => {
                    let resolved = self.resolve_option(pattern, scope, kind)?;
                    state = Some(resolved);
                    resolved
                }
            };

            if self.switches.excluded_defaults && fallback.is_none() {
                if let Some(default) = current.default.filter(|default| members.contains(default)) {
                    fallback = Some((&clause.value, default));
                }
            }

            let Some(option) = current.option else {
                continue;
            };
            if members.matches(option) {
                return Ok(render(&clause.value, [scope.description(option)]));
            }
        }

        // A valid option naming a token the pattern lacks falls back to the
        // default token's clause.
        if let (Some(current), Some((value, default))) = (state, fallback) {
            if current.option.is_some() {
                return Ok(render(value, [scope.description(default)]));
            }
        }
        Ok(free_text(pattern))
    }

    /// Evaluate a complex pattern: each clause carries one group per kind,
    /// and matches only when every group matches its kind's option.
    fn eval_complex(&self, pattern: &Pattern, kinds: &[String]) -> Result<String, PatternError> {
        let store = self.inflections.strict();
        if let Some(unknown) = kinds.iter().find(|kind| !store.has_kind(kind)) {
            self.suppress(PatternError::InvalidKind {
                pattern: pattern.source.clone(),
                kind: unknown.clone(),
            })?;
            return Ok(free_text(pattern));
        }

        let scopes: Vec<Scope<'_>> = kinds
            .iter()
            .map(|kind| Scope::Strict {
                store,
                kind: kind.as_str(),
            })
            .collect();
        let mut states: Vec<OptionState<'_>> = Vec::new();
        let mut candidates: Vec<(&ClauseValue, Vec<ResolvedGroup<'_>>)> = Vec::new();

        'clauses: for clause in &pattern.clauses {
            if clause.groups.len() != kinds.len() {
                self.suppress(PatternError::ComplexPatternMalformed {
                    pattern: pattern.source.clone(),
                    tokens: clause.tokens.clone(),
                    expected: kinds.len(),
                    got: clause.groups.len(),
                })?;
                continue;
            }

            let mut groups = Vec::with_capacity(kinds.len());
            for (scope, group) in scopes.iter().zip(&clause.groups) {
                let mut expected = None;
                match self.resolve_group(pattern, *scope, group, &mut expected)? {
                    Some(resolved) => groups.push(resolved),
                    None => continue 'clauses,
                }
            }

            if states.is_empty() {
                states = scopes
                    .iter()
                    .zip(kinds)
                    .map(|(scope, kind)| self.resolve_option(pattern, *scope, kind.as_str()))
                    .collect::<Result<_, _>>()?;
            }

            let mut found = Vec::with_capacity(kinds.len());
            if match_components(&groups, &states, false, &mut found) {
                return Ok(render_complex(&clause.value, &scopes, &found));
            }
            if self.switches.excluded_defaults {
                candidates.push((&clause.value, groups));
            }
        }

        // Second pass: a component may match through its kind's default when
        // a valid option names a token the pattern lacks.
        for (value, groups) in candidates {
            let mut found = Vec::with_capacity(kinds.len());
            if match_components(&groups, &states, true, &mut found) {
                return Ok(render_complex(value, &scopes, &found));
            }
        }
        Ok(free_text(pattern))
    }

    /// Resolve the members of a group, fixing the expected kind on the first
    /// valid token. Returns `None` when the clause must be skipped.
    fn resolve_group<'s>(
        &self,
        pattern: &Pattern,
        scope: Scope<'s>,
        group: &Group,
        expected: &mut Option<&'s str>,
    ) -> Result<Option<ResolvedGroup<'s>>, PatternError> {
        let mut resolved = ResolvedGroup::default();
        for member in &group.members {
            let Some(token) = self.resolve_member(pattern, scope, member)? else {
                continue;
            };
            match *expected {
                None => *expected = Some(token.kind()),
                Some(kind) if kind != token.kind() => {
                    self.suppress(PatternError::MisplacedToken {
                        pattern: pattern.source.clone(),
                        token: member.name.clone(),
                        kind: token.kind().to_string(),
                        expected: kind.to_string(),
                    })?;
                    return Ok(None);
                }
                Some(_) => {}
            }
            if member.negated {
                resolved.negatives.push(token.name());
            } else {
                resolved.positives.push(token.name());
            }
        }
        Ok((!resolved.is_empty()).then_some(resolved))
    }

    /// Look up a member in the scope. Aliases resolve to their true token
    /// only when aliased patterns are enabled.
    fn resolve_member<'s>(
        &self,
        pattern: &Pattern,
        scope: Scope<'s>,
        member: &Member,
    ) -> Result<Option<&'s Token>, PatternError> {
        let token = scope
            .token(&member.name)
            .and_then(|token| match token.target() {
                None => Some(token),
                Some(target) if self.switches.aliased_patterns => scope.token(target),
                Some(_) => None,
            });
        if token.is_none() {
            self.suppress(PatternError::InvalidToken {
                pattern: pattern.source.clone(),
                token: member.to_string(),
            })?;
        }
        Ok(token)
    }

    /// Pick the true token to match for a kind, applying default fallbacks.
    ///
    /// A missing or invalid option is an error unless the kind's default can
    /// stand in for it.
    fn resolve_option<'s>(
        &self,
        pattern: &Pattern,
        scope: Scope<'s>,
        kind: &'s str,
    ) -> Result<OptionState<'s>, PatternError> {
        let default = scope.default_token(kind);
        let fallback = default.filter(|_| self.switches.unknown_defaults);
        let option = match self.options.token_for(kind, scope.is_strict()) {
            None if fallback.is_some() => fallback,
            None => {
                self.suppress(PatternError::OptionNotFound {
                    pattern: pattern.source.clone(),
                    kind: kind.to_string(),
                })?;
                None
            }
            Some(requested) => match scope.true_token(requested, kind) {
                Some(token) => Some(token),
                None if fallback.is_some() => fallback,
                None => {
                    self.suppress(PatternError::OptionIncorrect {
                        pattern: pattern.source.clone(),
                        kind: kind.to_string(),
                        option: requested.to_string(),
                    })?;
                    None
                }
            },
        };
        Ok(OptionState { option, default })
    }

    /// Return the error when raising, otherwise log it and carry on.
    fn suppress(&self, error: PatternError) -> Result<(), PatternError> {
        if self.switches.raises {
            return Err(error);
        }
        tracing::debug!(%error, "inflection pattern error suppressed");
        Ok(())
    }
}

/// Match positional groups against their kinds' options, one kind per
/// level, collecting the matched token of each component.
///
/// With `with_defaults`, a component whose valid option the group lacks may
/// match through its kind's default instead.
fn match_components<'s>(
    groups: &[ResolvedGroup<'s>],
    states: &[OptionState<'s>],
    with_defaults: bool,
    found: &mut Vec<&'s str>,
) -> bool {
    let ([group, groups @ ..], [state, states @ ..]) = (groups, states) else {
        return true;
    };
    let Some(option) = state.option else {
        return false;
    };
    let token = if group.matches(option) {
        option
    } else {
        match state.default.filter(|default| with_defaults && group.contains(default)) {
            Some(default) => default,
            None => return false,
        }
    };
    found.push(token);
    match_components(groups, states, with_defaults, found)
}

/// Produce a clause's output; loud values join the matched descriptions.
fn render<'s>(value: &ClauseValue, descriptions: impl IntoIterator<Item = Option<&'s str>>) -> String {
    match value {
        ClauseValue::Text(text) => text.clone(),
        ClauseValue::Loud => descriptions
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn render_complex(value: &ClauseValue, scopes: &[Scope<'_>], found: &[&str]) -> String {
    render(
        value,
        scopes
            .iter()
            .zip(found)
            .map(|(scope, token)| scope.description(token)),
    )
}

fn free_text(pattern: &Pattern) -> String {
    pattern.free_text.clone().unwrap_or_default()
}
