//! Thompson-style execution of the state graph.
//!
//! The executor keeps a frontier - the set of states the automaton could be
//! in after the symbols consumed so far - and advances it one input symbol
//! per step. New frontier members are epsilon-closed as they are inserted:
//! epsilon states expand to their successors, lookahead states are decided on
//! the spot by running a bounded nested executor over the remaining input,
//! and macro states delegate to their embedded sub-automaton.
//!
//! Multi-symbol consumers (literal runs, macro delegation) do not fit a
//! strict one-symbol step, so their successors are parked on a deferred
//! activation list keyed by input position and merged into the frontier when
//! the position is reached. The frontier being empty therefore only rejects
//! when nothing is parked either.

use super::nfa::Automaton;
use super::sparse_set::SparseSet;
use super::state::{StateId, StateKind, SubGraph};

/// Execution phase. Terminal states are never left.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Running,
    Accepted,
    Rejected,
}

/// A single acceptance run over one input.
///
/// The executor borrows the automaton and the input; both must outlive it.
/// Graphs are read-only during execution, so any number of executors may run
/// over the same automaton concurrently.
pub struct Executor<'a> {
    automaton: &'a Automaton,
    bounds: SubGraph,
    input: &'a [u8],
    /// Index of the next symbol to consume.
    pos: usize,
    /// States reachable after `pos` consumed symbols, epsilon-closed.
    frontier: SparseSet,
    next: SparseSet,
    /// Successors of multi-symbol consumers, waiting for their position.
    scheduled: Vec<(usize, StateId)>,
    /// Snapshot buffer so the frontier can be read while `next` is built.
    scratch: Vec<StateId>,
    status: Status,
}

impl<'a> Executor<'a> {
    /// Run over the whole automaton, start to accept.
    pub fn new(automaton: &'a Automaton, input: &'a [u8]) -> Self {
        Self::bounded(automaton, automaton.bounds(), input)
    }

    /// Run over an embedded sub-automaton. Used for lookahead and macro
    /// evaluation; the sub-graph lives in the same arena.
    pub fn bounded(automaton: &'a Automaton, bounds: SubGraph, input: &'a [u8]) -> Self {
        let capacity = automaton.arena().len();
        let mut executor = Executor {
            automaton,
            bounds,
            input,
            pos: 0,
            frontier: SparseSet::new(capacity),
            next: SparseSet::new(capacity),
            scheduled: Vec::new(),
            scratch: Vec::new(),
            status: Status::Running,
        };
        executor.seed();
        executor
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of symbols consumed so far.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    fn seed(&mut self) {
        let automaton = self.automaton;
        close_into(
            automaton,
            self.input,
            &mut self.frontier,
            &mut self.scheduled,
            self.bounds.start,
            0,
        );
        self.settle();
    }

    /// Decide the terminal status for the frontier at the current position,
    /// if there is one.
    fn settle(&mut self) {
        if self.pos == self.input.len() {
            self.status = if self.frontier.contains(self.bounds.accept) {
                Status::Accepted
            } else {
                Status::Rejected
            };
        } else if self.frontier.is_empty() && self.scheduled.is_empty() {
            self.status = Status::Rejected;
        }
    }

    /// Consume one input symbol and advance the frontier.
    pub fn step(&mut self) -> Status {
        if self.status != Status::Running {
            return self.status;
        }

        let automaton = self.automaton;
        let pos = self.pos;
        let byte = self.input[pos];

        self.next.clear();
        self.scratch.clear();
        self.scratch.extend(self.frontier.iter());

        for i in 0..self.scratch.len() {
            let id = self.scratch[i];
            let state = &automaton.arena()[id];
            let consumed = match &state.kind {
                StateKind::Any => (byte != 0).then_some(1),
                StateKind::Symbol(c) => (byte == *c).then_some(1),
                StateKind::Range(lo, hi) => (*lo <= byte && byte <= *hi).then_some(1),
                StateKind::Lambda(pred) => pred.test(byte).then_some(1),
                StateKind::Literal(s) => self.input[pos..].starts_with(s).then_some(s.len()),
                _ => None,
            };
            let Some(width) = consumed else { continue };

            let target = pos + width;
            for &succ in &state.next {
                if target == pos + 1 {
                    close_into(
                        automaton,
                        self.input,
                        &mut self.next,
                        &mut self.scheduled,
                        succ,
                        target,
                    );
                } else {
                    self.scheduled.push((target, succ));
                }
            }
        }

        self.pos += 1;

        // Activate anything parked for the new position.
        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i].0 == self.pos {
                let (_, id) = self.scheduled.swap_remove(i);
                close_into(
                    automaton,
                    self.input,
                    &mut self.next,
                    &mut self.scheduled,
                    id,
                    self.pos,
                );
            } else {
                i += 1;
            }
        }

        std::mem::swap(&mut self.frontier, &mut self.next);
        self.settle();
        self.status
    }

    /// Drive to completion; true iff the whole input was accepted.
    pub fn run(&mut self) -> bool {
        while self.status == Status::Running {
            self.step();
        }
        self.status == Status::Accepted
    }
}

/// Insert `seed` and its epsilon closure into `set`, evaluating zero-width
/// assertions against the input suffix at `pos`. Macro successors are parked
/// on `scheduled` for end of input.
fn close_into(
    automaton: &Automaton,
    input: &[u8],
    set: &mut SparseSet,
    scheduled: &mut Vec<(usize, StateId)>,
    seed: StateId,
    pos: usize,
) {
    let mut stack = vec![seed];
    while let Some(id) = stack.pop() {
        if set.contains(id) {
            continue;
        }
        let state = &automaton.arena()[id];
        match &state.kind {
            StateKind::Epsilon => {
                set.insert(id);
                stack.extend(state.next.iter().copied());
            }
            StateKind::PositiveLookahead(sub) => {
                if sub_accepts(automaton, *sub, &input[pos..]) {
                    set.insert(id);
                    stack.extend(state.next.iter().copied());
                }
            }
            StateKind::NegativeLookahead(sub) => {
                if !sub_accepts(automaton, *sub, &input[pos..]) {
                    set.insert(id);
                    stack.extend(state.next.iter().copied());
                }
            }
            StateKind::Macro(sub) => {
                if sub_accepts(automaton, *sub, &input[pos..]) {
                    set.insert(id);
                    for &succ in &state.next {
                        if pos == input.len() {
                            stack.push(succ);
                        } else {
                            scheduled.push((input.len(), succ));
                        }
                    }
                }
            }
            _ => {
                set.insert(id);
            }
        }
    }
}

/// True iff the embedded sub-automaton accepts the whole suffix.
fn sub_accepts(automaton: &Automaton, sub: SubGraph, suffix: &[u8]) -> bool {
    Executor::bounded(automaton, sub, suffix).run()
}
