//! Scanning a space's grid for token runs the grammar accepts.
//!
//! Every cell is a potential rule start on both axes. A cell contributes
//! the tokens of its text objects, plus the noun of any object that
//! currently has WORD enabled (that is how non-text objects get drafted
//! into sentences). Runs are explored breadth-first over all tokens a cell
//! offers, so stacked text produces every reading.

use parable_foundation::{Orient, Point};
use parable_lexicon::{PropWord, Token};
use parable_world::Space;

use crate::grammar::{ACCEPT, ScanState, accepts, transitions};
use crate::info::{Draft, RuleInfo};

/// One scanned (or inherent) rule: the raw token run plus its compiled form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleEntry {
    /// The token run, in reading order.
    pub tokens: Vec<Token>,
    /// The compiled rule.
    pub info: RuleInfo,
}

// =============================================================================
// Parsing a known token run
// =============================================================================

/// Parses a token run against the grammar.
#[must_use]
pub fn try_parse(tokens: &[Token]) -> Option<RuleInfo> {
    fn rec(tokens: &[Token], state: ScanState) -> Option<Draft> {
        let Some((&head, rest)) = tokens.split_first() else {
            return (state == ACCEPT).then(Draft::new);
        };
        for transition in transitions(state) {
            if accepts(transition, head.category()) {
                if let Some(mut draft) = rec(rest, transition.next) {
                    draft.apply(transition.op, head);
                    return Some(draft);
                }
            }
        }
        None
    }
    rec(tokens, ScanState::BeforePrefix).and_then(Draft::finish)
}

/// Parses a token run that is known to be well-formed.
///
/// # Panics
/// Panics if the grammar rejects the run. Inherent rule lists are built
/// from the same vocabulary as the grammar table, so a rejection means the
/// two have drifted apart.
#[must_use]
pub fn parse(tokens: &[Token]) -> RuleInfo {
    try_parse(tokens)
        .unwrap_or_else(|| panic!("token run rejected by the rule grammar: {tokens:?}"))
}

// =============================================================================
// Scanning a space
// =============================================================================

fn cell_tokens(space: &Space, pos: Point) -> Vec<Token> {
    let mut out = Vec::new();
    for object in space.objects_at(pos) {
        if let Some(token) = object.body.token() {
            out.push(token);
        }
        if object.props.enabled_prop(PropWord::Word) {
            out.push(object.body.noun());
        }
    }
    out
}

/// All grammar-accepted runs beginning at `pos` and walking toward
/// `orient`, paired with their drafts. The empty run appears whenever the
/// state reached is accepting, which is how shorter readings of an
/// AND-chain surface alongside the full one.
fn scan_from(space: &Space, pos: Point, orient: Orient, state: ScanState) -> Vec<(Vec<Token>, Draft)> {
    let mut results = Vec::new();
    let tokens = cell_tokens(space, pos);
    for transition in transitions(state) {
        let matched: Vec<Token> = tokens
            .iter()
            .copied()
            .filter(|t| accepts(transition, t.category()))
            .collect();
        if matched.is_empty() {
            continue;
        }
        let continuations = scan_from(space, pos.step(orient), orient, transition.next);
        for token in matched {
            for (rest, rest_draft) in &continuations {
                let mut draft = rest_draft.clone();
                draft.apply(transition.op, token);
                let mut run = Vec::with_capacity(rest.len() + 1);
                run.push(token);
                run.extend(rest.iter().copied());
                results.push((run, draft));
            }
        }
    }
    if state == ACCEPT {
        results.push((Vec::new(), Draft::new()));
    }
    results
}

/// Per-line suffix deduplication: a run starting later in the same line is
/// dropped if an earlier start already reported it as a tail.
struct LineDedup {
    found: Vec<(i32, Vec<Vec<Token>>)>,
}

impl LineDedup {
    fn new() -> Self {
        Self { found: Vec::new() }
    }

    fn is_suffix_of_earlier(&self, start: i32, run: &[Token]) -> bool {
        self.found.iter().any(|(prior_start, runs)| {
            let Ok(shift) = usize::try_from(start - prior_start) else {
                return false;
            };
            runs.iter()
                .any(|prior| prior.len() >= shift + run.len() && prior[shift..] == *run)
        })
    }

    fn record(&mut self, start: i32, run: Vec<Token>) {
        if let Some((last_start, runs)) = self.found.last_mut() {
            if *last_start == start {
                runs.push(run);
                return;
            }
        }
        self.found.push((start, vec![run]));
    }
}

/// Scans every row and column of a space for rules.
#[must_use]
pub fn scan_space(space: &Space) -> Vec<RuleEntry> {
    let mut entries = Vec::new();

    for y in 0..space.size.height {
        let mut dedup = LineDedup::new();
        for x in 0..space.size.width {
            scan_line(space, Point::new(x, y), Orient::Right, x, &mut dedup, &mut entries);
        }
    }
    for x in 0..space.size.width {
        let mut dedup = LineDedup::new();
        for y in 0..space.size.height {
            scan_line(space, Point::new(x, y), Orient::Down, y, &mut dedup, &mut entries);
        }
    }
    entries
}

fn scan_line(
    space: &Space,
    pos: Point,
    orient: Orient,
    start: i32,
    dedup: &mut LineDedup,
    entries: &mut Vec<RuleEntry>,
) {
    for (tokens, draft) in scan_from(space, pos, orient, ScanState::BeforePrefix) {
        if tokens.is_empty() || dedup.is_suffix_of_earlier(start, &tokens) {
            continue;
        }
        let Some(info) = draft.finish() else {
            continue;
        };
        dedup.record(start, tokens.clone());
        entries.push(RuleEntry { tokens, info });
    }
}
