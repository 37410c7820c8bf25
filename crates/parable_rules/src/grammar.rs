//! The finite-state grammar over token categories.
//!
//! Each state lists the categories it accepts, where each leads, and which
//! builder operation fires for the matched token once the recursion
//! unwinds. The three `Quoted*` states handle the `TEXT_` escape, which
//! accepts any following text (except another escape, which stacks) and
//! re-reads it as a meta noun.
//!
//! A token run the table cannot place is a programmer error: the scanner
//! only walks matched transitions, so hitting one means the vocabulary and
//! this table have drifted apart.

use parable_lexicon::Category;

use crate::info::BuildOp;

/// Scanner state between two tokens of a rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScanState {
    /// Start: prefixes or the subject.
    BeforePrefix,
    /// After a prefix: another prefix via AND, or the subject.
    AfterPrefix,
    /// After the subject: infixes, an operator, or another subject via AND.
    BeforeInfix,
    /// After an infix word: its first target.
    InInfix,
    /// After an infix target: an operator, or more conditions via AND.
    AfterInfix,
    /// After AND following an infix: a new infix word or another target.
    NewInfix,
    /// After an operator: a grant target.
    BeforeProperty,
    /// After a grant target: the accepting state.
    AfterProperty,
    /// After AND following a grant target: another target or operator.
    NewProperty,
    /// Inside a TEXT_ escape quoting the subject.
    QuotedNoun,
    /// Inside a TEXT_ escape quoting an infix target.
    QuotedInfixTarget,
    /// Inside a TEXT_ escape quoting a grant target.
    QuotedProperty,
}

/// The state in which a token run forms a complete rule.
pub const ACCEPT: ScanState = ScanState::AfterProperty;

/// One grammar transition.
#[derive(Debug)]
pub struct Transition {
    /// Categories the transition accepts.
    pub matches: &'static [Category],
    /// Categories carved out of `matches`.
    pub excludes: &'static [Category],
    /// State after consuming the token.
    pub next: ScanState,
    /// Builder operation applied on unwind.
    pub op: BuildOp,
}

const ANY_TEXT: &[Category] = &[
    Category::Noun,
    Category::Prefix,
    Category::Infix,
    Category::Oper,
    Category::Prop,
    Category::Not,
    Category::And,
    Category::TextUnder,
];

/// The transitions leaving a state, in match-priority order.
#[must_use]
pub fn transitions(state: ScanState) -> &'static [Transition] {
    match state {
        ScanState::BeforePrefix => &[
            Transition {
                matches: &[Category::Not],
                excludes: &[],
                next: ScanState::BeforePrefix,
                op: BuildOp::NegatePrefix,
            },
            Transition {
                matches: &[Category::Prefix],
                excludes: &[],
                next: ScanState::AfterPrefix,
                op: BuildOp::SetPrefix,
            },
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedNoun,
                op: BuildOp::MetaNoun,
            },
            Transition {
                matches: &[Category::Noun],
                excludes: &[],
                next: ScanState::BeforeInfix,
                op: BuildOp::SetNoun,
            },
        ],
        ScanState::AfterPrefix => &[
            Transition {
                matches: &[Category::Not],
                excludes: &[],
                next: ScanState::AfterPrefix,
                op: BuildOp::NegateNoun,
            },
            Transition {
                matches: &[Category::And],
                excludes: &[],
                next: ScanState::BeforePrefix,
                op: BuildOp::Nothing,
            },
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedNoun,
                op: BuildOp::MetaNoun,
            },
            Transition {
                matches: &[Category::Noun],
                excludes: &[],
                next: ScanState::BeforeInfix,
                op: BuildOp::SetNoun,
            },
        ],
        ScanState::BeforeInfix => &[
            Transition {
                matches: &[Category::Not],
                excludes: &[],
                next: ScanState::BeforeInfix,
                op: BuildOp::NegateInfix,
            },
            Transition {
                matches: &[Category::Infix],
                excludes: &[],
                next: ScanState::InInfix,
                op: BuildOp::SetInfix,
            },
            Transition {
                matches: &[Category::And],
                excludes: &[],
                next: ScanState::BeforePrefix,
                op: BuildOp::NewSubject,
            },
            Transition {
                matches: &[Category::Oper],
                excludes: &[],
                next: ScanState::BeforeProperty,
                op: BuildOp::SetOper,
            },
        ],
        ScanState::InInfix => &[
            Transition {
                matches: &[Category::Not],
                excludes: &[],
                next: ScanState::InInfix,
                op: BuildOp::NegateInfixTarget,
            },
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedInfixTarget,
                op: BuildOp::MetaInfixTarget,
            },
            Transition {
                matches: &[Category::Noun, Category::Prop],
                excludes: &[],
                next: ScanState::AfterInfix,
                op: BuildOp::SetInfixTarget,
            },
        ],
        ScanState::AfterInfix => &[
            Transition {
                matches: &[Category::And],
                excludes: &[],
                next: ScanState::NewInfix,
                op: BuildOp::Nothing,
            },
            Transition {
                matches: &[Category::Oper],
                excludes: &[],
                next: ScanState::BeforeProperty,
                op: BuildOp::SetOper,
            },
        ],
        ScanState::NewInfix => &[
            Transition {
                matches: &[Category::Infix],
                excludes: &[],
                next: ScanState::InInfix,
                op: BuildOp::SetInfix,
            },
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedInfixTarget,
                op: BuildOp::MetaInfixTarget,
            },
            Transition {
                matches: &[Category::Noun, Category::Prop],
                excludes: &[],
                next: ScanState::AfterInfix,
                op: BuildOp::SetInfixTarget,
            },
        ],
        ScanState::BeforeProperty => &[
            Transition {
                matches: &[Category::Not],
                excludes: &[],
                next: ScanState::BeforeProperty,
                op: BuildOp::NegateProp,
            },
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedProperty,
                op: BuildOp::MetaProp,
            },
            Transition {
                matches: &[Category::Noun, Category::Prop],
                excludes: &[],
                next: ScanState::AfterProperty,
                op: BuildOp::SetProp,
            },
        ],
        ScanState::AfterProperty => &[Transition {
            matches: &[Category::And],
            excludes: &[],
            next: ScanState::NewProperty,
            op: BuildOp::Nothing,
        }],
        ScanState::NewProperty => &[
            Transition {
                matches: &[Category::Not],
                excludes: &[],
                next: ScanState::NewProperty,
                op: BuildOp::NegateProp,
            },
            Transition {
                matches: &[Category::Oper],
                excludes: &[],
                next: ScanState::BeforeProperty,
                op: BuildOp::SetOper,
            },
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedProperty,
                op: BuildOp::MetaProp,
            },
            Transition {
                matches: &[Category::Noun, Category::Prop],
                excludes: &[],
                next: ScanState::AfterProperty,
                op: BuildOp::SetProp,
            },
        ],
        ScanState::QuotedNoun => &[
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedNoun,
                op: BuildOp::MetaNoun,
            },
            Transition {
                matches: ANY_TEXT,
                excludes: &[Category::TextUnder],
                next: ScanState::BeforeInfix,
                op: BuildOp::SetNoun,
            },
        ],
        ScanState::QuotedInfixTarget => &[
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedInfixTarget,
                op: BuildOp::MetaInfixTarget,
            },
            Transition {
                matches: ANY_TEXT,
                excludes: &[Category::TextUnder],
                next: ScanState::AfterInfix,
                op: BuildOp::SetInfixTarget,
            },
        ],
        ScanState::QuotedProperty => &[
            Transition {
                matches: &[Category::TextUnder],
                excludes: &[],
                next: ScanState::QuotedProperty,
                op: BuildOp::MetaProp,
            },
            Transition {
                matches: ANY_TEXT,
                excludes: &[Category::TextUnder],
                next: ScanState::AfterProperty,
                op: BuildOp::SetProp,
            },
        ],
    }
}

/// True if a transition accepts the category.
#[must_use]
pub fn accepts(transition: &Transition, category: Category) -> bool {
    transition.matches.contains(&category) && !transition.excludes.contains(&category)
}
