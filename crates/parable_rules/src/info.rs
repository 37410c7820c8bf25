//! Compiled rule records and the builder that assembles them.
//!
//! Builder operations run as the scanner's recursion unwinds, so they see
//! the rule right-to-left: front inserts put later-built pieces in reading
//! order, and "the current X" is always index 0.

use parable_lexicon::{InfixWord, OperWord, PrefixWord, Token};

// =============================================================================
// Rule records
// =============================================================================

/// One prefix condition, e.g. `OFTEN` or `NOT META`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrefixCond {
    /// Inverted by a preceding NOT.
    pub negated: bool,
    /// The prefix word.
    pub word: PrefixWord,
}

/// One target of an infix condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InfixTarget {
    /// Inverted by a NOT inside the infix.
    pub negated: bool,
    /// A noun or property token.
    pub token: Token,
}

/// One infix condition, e.g. `ON ROCK AND KEY` or `NOT FEELING PUSH`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InfixCond {
    /// Inverted by a NOT before the infix word.
    pub negated: bool,
    /// The infix word.
    pub word: InfixWord,
    /// AND-chained targets, in reading order.
    pub targets: Vec<InfixTarget>,
}

/// One rule subject with its negation depth.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubjectSpec {
    /// Number of NOTs applied to the subject.
    pub tier: u32,
    /// The subject noun.
    pub token: Token,
}

impl SubjectSpec {
    /// True when an odd number of NOTs inverts the subject.
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.tier % 2 == 1
    }
}

/// One grant target with its negation depth.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetSpec {
    /// Number of NOTs applied to the target; becomes the grant tier.
    pub tier: u32,
    /// A property or noun token.
    pub token: Token,
}

/// One operator with its AND-chained targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OperClause {
    /// The operator word.
    pub oper: OperWord,
    /// Targets, in reading order.
    pub targets: Vec<TargetSpec>,
}

/// A fully compiled rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleInfo {
    /// Prefix conditions, in reading order.
    pub prefixes: Vec<PrefixCond>,
    /// AND-chained subjects; always at least one.
    pub subjects: Vec<SubjectSpec>,
    /// Infix conditions, in reading order.
    pub infixes: Vec<InfixCond>,
    /// Operator clauses, in reading order; always at least one.
    pub clauses: Vec<OperClause>,
}

// =============================================================================
// Builder
// =============================================================================

/// Builder operation attached to a grammar transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildOp {
    /// No effect; the token only moves the state along.
    Nothing,
    /// Record a prefix condition.
    SetPrefix,
    /// Stamp the pending infix condition with its word.
    SetInfix,
    /// Add a target to the pending infix condition.
    SetInfixTarget,
    /// Record the subject noun.
    SetNoun,
    /// Park the current subject and start another.
    NewSubject,
    /// Stamp the pending clause with its operator.
    SetOper,
    /// Add a target to the pending clause.
    SetProp,
    /// NOT ahead of a prefix, or of the subject when no prefix exists.
    NegatePrefix,
    /// NOT between prefix and subject.
    NegateNoun,
    /// NOT ahead of an infix word.
    NegateInfix,
    /// NOT ahead of an infix target.
    NegateInfixTarget,
    /// NOT ahead of a grant target.
    NegateProp,
    /// TEXT_ quoting the subject one meta tier up.
    MetaNoun,
    /// TEXT_ quoting an infix target one meta tier up.
    MetaInfixTarget,
    /// TEXT_ quoting a grant target one meta tier up.
    MetaProp,
}

#[derive(Clone, Debug, Default)]
struct DraftInfix {
    negated: bool,
    word: Option<InfixWord>,
    targets: Vec<InfixTarget>,
}

#[derive(Clone, Debug, Default)]
struct DraftClause {
    oper: Option<OperWord>,
    targets: Vec<TargetSpec>,
}

/// A rule under construction during recursion unwind.
#[derive(Clone, Debug)]
pub struct Draft {
    prefixes: Vec<PrefixCond>,
    subject_tier: u32,
    subject: Option<Token>,
    parked_subjects: Vec<SubjectSpec>,
    infixes: Vec<DraftInfix>,
    clauses: Vec<DraftClause>,
}

impl Draft {
    /// A draft holding only the empty sentinel clause.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefixes: Vec::new(),
            subject_tier: 0,
            subject: None,
            parked_subjects: Vec::new(),
            infixes: Vec::new(),
            clauses: vec![DraftClause::default()],
        }
    }

    /// Applies one builder operation for the matched token.
    pub fn apply(&mut self, op: BuildOp, token: Token) {
        match op {
            BuildOp::Nothing => {}
            BuildOp::SetPrefix => {
                if let Token {
                    word: parable_lexicon::Word::Prefix(word),
                    tier: 0,
                } = token
                {
                    self.prefixes.insert(0, PrefixCond {
                        negated: false,
                        word,
                    });
                }
            }
            BuildOp::SetInfix => {
                if let Token {
                    word: parable_lexicon::Word::Infix(word),
                    tier: 0,
                } = token
                {
                    if self.infixes.is_empty() {
                        self.infixes.push(DraftInfix::default());
                    }
                    self.infixes[0].word = Some(word);
                }
            }
            BuildOp::SetInfixTarget => {
                if self.infixes.first().is_none_or(|i| i.word.is_some()) {
                    self.infixes.insert(0, DraftInfix::default());
                }
                self.infixes[0].targets.insert(0, InfixTarget {
                    negated: false,
                    token,
                });
            }
            BuildOp::SetNoun => self.subject = Some(token),
            BuildOp::NewSubject => {
                if let Some(token) = self.subject.take() {
                    self.parked_subjects.insert(0, SubjectSpec {
                        tier: self.subject_tier,
                        token,
                    });
                }
                self.subject_tier = 0;
            }
            BuildOp::SetOper => {
                if let Token {
                    word: parable_lexicon::Word::Oper(word),
                    tier: 0,
                } = token
                {
                    self.clauses[0].oper = Some(word);
                    self.clauses.insert(0, DraftClause::default());
                }
            }
            BuildOp::SetProp => {
                self.clauses[0].targets.insert(0, TargetSpec { tier: 0, token });
            }
            BuildOp::NegatePrefix => {
                if let Some(prefix) = self.prefixes.first_mut() {
                    prefix.negated = !prefix.negated;
                } else {
                    self.subject_tier += 1;
                }
            }
            BuildOp::NegateNoun => self.subject_tier += 1,
            BuildOp::NegateInfix => {
                if let Some(infix) = self.infixes.first_mut() {
                    infix.negated = !infix.negated;
                }
            }
            BuildOp::NegateInfixTarget => {
                if let Some(target) = self.infixes.first_mut().and_then(|i| i.targets.first_mut())
                {
                    target.negated = !target.negated;
                }
            }
            BuildOp::NegateProp => {
                if let Some(target) = self.clauses.first_mut().and_then(|c| c.targets.first_mut())
                {
                    target.tier += 1;
                }
            }
            BuildOp::MetaNoun => {
                if let Some(subject) = self.subject.as_mut() {
                    *subject = subject.meta();
                }
            }
            BuildOp::MetaInfixTarget => {
                if let Some(target) = self.infixes.first_mut().and_then(|i| i.targets.first_mut())
                {
                    target.token = target.token.meta();
                }
            }
            BuildOp::MetaProp => {
                if let Some(target) = self.clauses.first_mut().and_then(|c| c.targets.first_mut())
                {
                    target.token = target.token.meta();
                }
            }
        }
    }

    /// Finalizes the draft, dropping the sentinel clause.
    ///
    /// Returns `None` when the parse never produced a subject or a complete
    /// clause; completed grammar runs always have both.
    #[must_use]
    pub fn finish(self) -> Option<RuleInfo> {
        let subject = self.subject?;
        let mut subjects = vec![SubjectSpec {
            tier: self.subject_tier,
            token: subject,
        }];
        subjects.extend(self.parked_subjects);

        let mut infixes = Vec::with_capacity(self.infixes.len());
        for draft in self.infixes {
            infixes.push(InfixCond {
                negated: draft.negated,
                word: draft.word?,
                targets: draft.targets,
            });
        }

        let clauses: Vec<OperClause> = self
            .clauses
            .into_iter()
            .filter_map(|draft| {
                let oper = draft.oper?;
                (!draft.targets.is_empty()).then_some(OperClause {
                    oper,
                    targets: draft.targets,
                })
            })
            .collect();
        if clauses.is_empty() {
            return None;
        }

        Some(RuleInfo {
            prefixes: self.prefixes,
            subjects,
            infixes,
            clauses,
        })
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleInfo {
    /// A copy keeping only IS-clauses restricted to the given target token.
    ///
    /// Used by the first compilation pass, which resolves WORD grants ahead
    /// of the full grammar.
    #[must_use]
    pub fn restricted_to(&self, target: Token) -> Option<RuleInfo> {
        let clauses: Vec<OperClause> = self
            .clauses
            .iter()
            .filter(|clause| clause.oper == OperWord::Is)
            .filter_map(|clause| {
                let targets: Vec<TargetSpec> = clause
                    .targets
                    .iter()
                    .filter(|t| t.token == target)
                    .cloned()
                    .collect();
                (!targets.is_empty()).then_some(OperClause {
                    oper: clause.oper,
                    targets,
                })
            })
            .collect();
        (!clauses.is_empty()).then(|| RuleInfo {
            prefixes: self.prefixes.clone(),
            subjects: self.subjects.clone(),
            infixes: self.infixes.clone(),
            clauses,
        })
    }
}
