//! Post-construction epsilon removal.
//!
//! The builder is generous with epsilon connectors; most of them have a
//! single neighbour on one side and can be spliced out without changing the
//! accepted language. Fewer epsilons means a smaller frontier during
//! execution. The pass is a single sweep over the arena - epsilons that
//! multiplex several predecessors onto several successors stay, as do the
//! start/accept sentinels of the automaton and of every embedded
//! sub-automaton.

use rustc_hash::FxHashSet;

use super::nfa::Automaton;
use super::state::{EdgeList, StateId};

/// Epsilon-removal pass over a freshly built [`Automaton`].
pub struct Optimizer<'a> {
    automaton: &'a mut Automaton,
}

impl<'a> Optimizer<'a> {
    pub fn new(automaton: &'a mut Automaton) -> Self {
        Optimizer { automaton }
    }

    /// Splice out every epsilon state with exactly one predecessor or
    /// exactly one successor. Spliced states stay in the arena, fully
    /// unlinked; only the graph shrinks.
    pub fn remove_epsilons(&mut self) {
        let sentinels = self.collect_sentinels();
        let ids: Vec<StateId> = self.automaton.arena().ids().collect();

        for id in ids {
            if sentinels.contains(&id) {
                continue;
            }
            if !self.automaton.arena()[id].kind.is_epsilon() {
                continue;
            }
            self.try_splice(id);
        }
    }

    /// Start/accept of the automaton plus the endpoints of every embedded
    /// sub-automaton; these anchor execution and must survive.
    fn collect_sentinels(&self) -> FxHashSet<StateId> {
        let arena = self.automaton.arena();
        let mut sentinels = FxHashSet::default();
        sentinels.insert(self.automaton.start());
        sentinels.insert(self.automaton.accept());
        for id in arena.ids() {
            if let Some(sub) = arena[id].kind.subgraph() {
                sentinels.insert(sub.start);
                sentinels.insert(sub.accept);
            }
        }
        sentinels
    }

    fn try_splice(&mut self, id: StateId) {
        let arena = self.automaton.arena();
        let preds: EdgeList = arena[id].prev.clone();
        let succs: EdgeList = arena[id].next.clone();

        // Only locally safe removals: a multiplexer (many-to-many) must stay,
        // and a state on a self-loop is its own neighbour.
        if preds.is_empty() || succs.is_empty() {
            return;
        }
        if preds.len() != 1 && succs.len() != 1 {
            return;
        }
        if preds.contains(&id) || succs.contains(&id) {
            return;
        }

        let arena = self.automaton.arena_mut();
        for &pred in &preds {
            let next = &mut arena[pred].next;
            let Some(slot) = next.iter().position(|&n| n == id) else {
                continue;
            };
            next.remove(slot);
            // Successors take the removed state's position so exploration
            // order is preserved.
            let mut at = slot;
            for &succ in &succs {
                if !arena[pred].next.contains(&succ) {
                    arena[pred].next.insert(at, succ);
                    at += 1;
                }
                let back = &mut arena[succ].prev;
                if !back.contains(&pred) {
                    back.push(pred);
                }
            }
        }

        for &succ in &succs {
            arena[succ].prev.retain(|&mut p| p != id);
        }
        arena[id].next.clear();
        arena[id].prev.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::state::StateKind;

    /// start -> E -> sym -> E -> accept collapses to start -> sym -> accept.
    #[test]
    fn splices_linear_epsilon_chain() {
        let mut automaton = Automaton::new();
        let (start, accept) = (automaton.start(), automaton.accept());
        let arena = automaton.arena_mut();
        let e1 = arena.alloc(StateKind::Epsilon);
        let sym = arena.alloc(StateKind::Symbol(b'a'));
        let e2 = arena.alloc(StateKind::Epsilon);
        arena.link(start, e1);
        arena.link(e1, sym);
        arena.link(sym, e2);
        arena.link(e2, accept);

        Optimizer::new(&mut automaton).remove_epsilons();

        let arena = automaton.arena();
        assert_eq!(arena[start].next.as_slice(), &[sym]);
        assert_eq!(arena[sym].next.as_slice(), &[accept]);
        assert!(arena[e1].next.is_empty() && arena[e1].prev.is_empty());
        assert!(arena[e2].next.is_empty() && arena[e2].prev.is_empty());
    }

    /// An epsilon with two predecessors and two successors is a multiplexer
    /// and must be left alone.
    #[test]
    fn keeps_multiplexer_epsilons() {
        let mut automaton = Automaton::new();
        let (start, accept) = (automaton.start(), automaton.accept());
        let arena = automaton.arena_mut();
        let a = arena.alloc(StateKind::Symbol(b'a'));
        let b = arena.alloc(StateKind::Symbol(b'b'));
        let mux = arena.alloc(StateKind::Epsilon);
        let c = arena.alloc(StateKind::Symbol(b'c'));
        arena.link(start, a);
        arena.link(start, b);
        arena.link(a, mux);
        arena.link(b, mux);
        arena.link(mux, c);
        arena.link(mux, accept);
        arena.link(c, accept);

        Optimizer::new(&mut automaton).remove_epsilons();

        let arena = automaton.arena();
        assert_eq!(arena[mux].prev.len(), 2);
        assert_eq!(arena[mux].next.len(), 2);
    }

    /// The start and accept sentinels are epsilon states but must survive.
    #[test]
    fn preserves_sentinels() {
        let mut automaton = Automaton::new();
        let (start, accept) = (automaton.start(), automaton.accept());
        automaton.arena_mut().link(start, accept);

        Optimizer::new(&mut automaton).remove_epsilons();

        assert_eq!(automaton.arena()[start].next.as_slice(), &[accept]);
        assert!(automaton.accepts(b""));
    }
}
