//! The automaton proper: an arena of states bracketed by start/accept
//! sentinels.

use std::collections::VecDeque;
use std::fmt;

use super::arena::StateArena;
use super::executor::Executor;
use super::sparse_set::SparseSet;
use super::state::{StateId, StateKind, SubGraph};

/// A nondeterministic finite automaton.
///
/// The automaton owns every state through its arena; `start` and `accept`
/// are epsilon sentinels allocated at construction and are never removed.
/// After building (and optionally optimizing), the graph is read-only and an
/// `Automaton` may be shared freely between threads; each `accepts` call
/// runs its own [`Executor`].
///
/// Graphs are normally produced by the pattern compiler, but can be assembled
/// directly:
///
/// ```
/// use renfa::{Automaton, Builder, StateKind};
///
/// // (a|b)+
/// let mut automaton = Automaton::new();
/// let mut builder = Builder::new(&mut automaton);
/// builder.begin_group();
/// builder.push_state(StateKind::Symbol(b'a'));
/// builder.push_branch();
/// builder.push_state(StateKind::Symbol(b'b'));
/// builder.end_group();
/// builder.push_jump();
/// builder.end_group();
///
/// assert!(automaton.accepts(b"abbabba"));
/// assert!(!automaton.accepts(b"abbacba"));
/// ```
#[derive(Clone, Debug)]
pub struct Automaton {
    arena: StateArena,
    start: StateId,
    accept: StateId,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    pub fn new() -> Self {
        let mut arena = StateArena::with_capacity(16);
        let start = arena.alloc(StateKind::Epsilon);
        let accept = arena.alloc(StateKind::Epsilon);
        Automaton {
            arena,
            start,
            accept,
        }
    }

    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    #[inline]
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// The endpoints of the whole graph as a [`SubGraph`].
    #[inline]
    pub fn bounds(&self) -> SubGraph {
        SubGraph {
            start: self.start,
            accept: self.accept,
        }
    }

    #[inline]
    pub fn arena(&self) -> &StateArena {
        &self.arena
    }

    #[inline]
    pub fn arena_mut(&mut self) -> &mut StateArena {
        &mut self.arena
    }

    /// True iff the automaton consumes the entire input and ends on the
    /// accept state.
    pub fn accepts(&self, input: &[u8]) -> bool {
        Executor::new(self, input).run()
    }
}

/// Breadth-first dump of the state graph, after the original's debugging
/// printer. States already printed show up as `(repeated)` so cyclic graphs
/// terminate.
impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visited = SparseSet::new(self.arena.len());
        let mut queue = VecDeque::new();
        queue.push_back((self.start, 0usize));

        while let Some((id, depth)) = queue.pop_front() {
            for _ in 0..depth {
                f.write_str("| ")?;
            }

            let label = if id == self.start {
                "[Start]".to_string()
            } else if id == self.accept {
                "[Accept]".to_string()
            } else {
                format!("{}#{}", self.arena[id].kind.display_name(), id.index())
            };

            if visited.insert(id) {
                writeln!(f, "{label}")?;
                for &next in &self.arena[id].next {
                    queue.push_back((next, depth + 1));
                }
            } else {
                writeln!(f, "{label} (repeated)")?;
            }
        }
        Ok(())
    }
}
