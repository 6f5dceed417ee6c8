//! Imperative graph assembly.
//!
//! The builder turns a linear stream of compilation events (begin/end group,
//! push state, branch, jump, skip, repeat, macro) into the state graph. It
//! tracks a stack of group frames; the innermost *completed* unit - the last
//! pushed state or the most recently closed group - always sits one slot past
//! the open-group top, so the quantifier events can rewrite it uniformly.
//!
//! Misusing the builder (closing a group that was never opened, repeating
//! before anything was pushed) is a bug in the caller and trips an assertion;
//! recoverable pattern errors are the compiler's business.

use rustc_hash::FxHashMap;

use super::nfa::Automaton;
use super::state::{EdgeList, StateId, StateKind, SubGraph};

/// Upper bound on group nesting. Exceeding it is a compile-time failure in
/// the pattern compiler; the builder itself asserts.
pub const MAX_GROUP_DEPTH: usize = 127;

/// The (start, end) epsilon pair bounding an in-construction subgraph.
#[derive(Clone, Copy)]
struct Frame {
    start: StateId,
    end: StateId,
}

/// Which kind of sub-automaton state a `begin_macro` call opens.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MacroKind {
    /// `(?=...)` - zero-width assertion that the sub-automaton accepts.
    PositiveLookahead,
    /// `(?!...)` - zero-width assertion that the sub-automaton rejects.
    NegativeLookahead,
    /// Consumption is delegated to the sub-automaton.
    Delegate,
}

/// Bookkeeping for a macro whose inner graph is still being built.
struct OpenMacro {
    depth: usize,
    prefix: StateId,
    state: StateId,
}

/// Assembles an [`Automaton`] from a sequence of events.
///
/// Every operation returns `&mut Self` so events can be chained. See the
/// example on [`Automaton`].
pub struct Builder<'a> {
    automaton: &'a mut Automaton,
    /// Tail of the chain under construction.
    current: StateId,
    /// Frames 1..=depth are open groups (1 is the implicit root); slot
    /// depth + 1 holds the last completed unit. Slot 0 is reserved.
    frames: [Frame; MAX_GROUP_DEPTH + 2],
    depth: usize,
    open_macros: Vec<OpenMacro>,
}

impl<'a> Builder<'a> {
    pub fn new(automaton: &'a mut Automaton) -> Self {
        let root = Frame {
            start: automaton.start(),
            end: automaton.accept(),
        };
        let current = root.start;
        Builder {
            automaton,
            current,
            frames: [root; MAX_GROUP_DEPTH + 2],
            depth: 1,
            open_macros: Vec::new(),
        }
    }

    fn alloc(&mut self, kind: StateKind) -> StateId {
        self.automaton.arena_mut().alloc(kind)
    }

    fn link(&mut self, from: StateId, to: StateId) {
        self.automaton.arena_mut().link(from, to);
    }

    /// The last completed unit at the current depth.
    #[inline]
    fn unit(&self) -> Frame {
        self.frames[self.depth + 1]
    }

    /// Append a state to the chain. A fresh epsilon is prepended so the
    /// (epsilon, state) pair forms a transient frame quantifiers can target.
    pub fn push_state(&mut self, kind: StateKind) -> &mut Self {
        assert!(self.depth >= 1, "push_state on a finished builder");
        if let StateKind::Literal(bytes) = &kind {
            assert!(!bytes.is_empty(), "empty literal state");
        }

        let epsilon = self.alloc(StateKind::Epsilon);
        let state = self.alloc(kind);
        self.link(self.current, epsilon);
        self.link(epsilon, state);
        self.current = state;

        self.frames[self.depth + 1] = Frame {
            start: epsilon,
            end: state,
        };
        self
    }

    /// Open a group: fresh start/end epsilons, pushed as a new frame.
    pub fn begin_group(&mut self) -> &mut Self {
        assert!(self.depth >= 1, "begin_group on a finished builder");
        assert!(self.depth < MAX_GROUP_DEPTH, "group stack overflow");

        let start = self.alloc(StateKind::Epsilon);
        let end = self.alloc(StateKind::Epsilon);
        self.link(self.current, start);
        self.current = start;

        self.depth += 1;
        self.frames[self.depth] = Frame { start, end };
        self
    }

    /// Close the innermost group. Closing the root frame seals the automaton.
    pub fn end_group(&mut self) -> &mut Self {
        assert!(self.depth >= 1, "end_group without begin_group");
        assert!(
            self.open_macros.last().map_or(true, |m| m.depth != self.depth),
            "end_group cannot close a macro"
        );

        let end = self.frames[self.depth].end;
        self.link(self.current, end);
        self.current = end;
        self.depth -= 1;
        // The closed frame stays at depth + 1, where quantifiers expect it.
        self
    }

    /// Seal the current alternative and start the next one ( `|` ).
    pub fn push_branch(&mut self) -> &mut Self {
        assert!(self.depth >= 1, "push_branch on a finished builder");

        let frame = self.frames[self.depth];
        self.link(self.current, frame.end);
        self.current = frame.start;
        self
    }

    /// Back-edge from the last unit's end to its start ( `+` ).
    pub fn push_jump(&mut self) -> &mut Self {
        assert!(self.depth >= 1, "push_jump on a finished builder");

        let unit = self.unit();
        self.link(unit.end, unit.start);
        self
    }

    /// Forward bypass around the last unit ( `?`, and half of `*` ).
    pub fn push_skip(&mut self) -> &mut Self {
        assert!(self.depth >= 1, "push_skip on a finished builder");

        let unit = self.unit();
        let epsilon = self.alloc(StateKind::Epsilon);
        self.link(self.current, epsilon);
        self.link(unit.start, epsilon);
        self.current = epsilon;
        // The bypass becomes the unit's new end, so a later jump or repeat
        // still sees a self-contained subgraph.
        self.frames[self.depth + 1] = Frame {
            start: unit.start,
            end: epsilon,
        };
        self
    }

    /// Unroll the last unit for a `{min,max}` bound. `max == 0` means
    /// unbounded (`{min,}`); callers must reject `max < min` and `{0}`
    /// before getting here.
    pub fn push_repeat(&mut self, min: u32, max: u32) -> &mut Self {
        assert!(self.depth >= 1, "push_repeat on a finished builder");
        assert!(max == 0 || min <= max, "repeat bounds out of order");
        assert!(min > 0 || max > 0, "zero-width repeat");

        let frame = self.unit();
        let seal = self.alloc(StateKind::Epsilon);

        let required = min.saturating_sub(1);
        let optional = if max == 0 {
            0
        } else if min == 0 {
            max - 1
        } else {
            max - min
        };

        let mut prev_epsilon = frame.start;
        for _ in 0..required {
            let epsilon = self.alloc(StateKind::Epsilon);
            self.link(self.current, epsilon);
            let clone = self.clone_subgraph(frame);
            self.link(epsilon, clone.start);
            self.current = clone.end;
            prev_epsilon = epsilon;
        }

        if max == 0 {
            // Unbounded tail: loop the final occurrence.
            self.link(self.current, prev_epsilon);
        }

        for _ in 0..optional {
            self.link(self.current, seal);
            let epsilon = self.alloc(StateKind::Epsilon);
            self.link(self.current, epsilon);
            let clone = self.clone_subgraph(frame);
            self.link(epsilon, clone.start);
            self.current = clone.end;
        }

        // The unit itself is occurrence one; with min == 0 it becomes
        // bypassable as a whole. Linked only after the clone loops, so the
        // bypass edge is never part of the subgraph being copied.
        if min == 0 {
            self.link(frame.start, seal);
        }

        self.link(self.current, seal);
        self.current = seal;
        self.frames[self.depth + 1] = Frame {
            start: frame.start,
            end: seal,
        };
        self
    }

    /// Open a sub-automaton; a macro state referencing its endpoints is
    /// inserted into the parent chain and subsequent events build the inner
    /// graph until [`end_macro`](Self::end_macro).
    pub fn begin_macro(&mut self, kind: MacroKind) -> &mut Self {
        assert!(self.depth >= 1, "begin_macro on a finished builder");
        assert!(self.depth < MAX_GROUP_DEPTH, "group stack overflow");

        let start = self.alloc(StateKind::Epsilon);
        let accept = self.alloc(StateKind::Epsilon);
        let sub = SubGraph { start, accept };
        let state_kind = match kind {
            MacroKind::PositiveLookahead => StateKind::PositiveLookahead(sub),
            MacroKind::NegativeLookahead => StateKind::NegativeLookahead(sub),
            MacroKind::Delegate => StateKind::Macro(sub),
        };

        let prefix = self.alloc(StateKind::Epsilon);
        let state = self.alloc(state_kind);
        self.link(self.current, prefix);
        self.link(prefix, state);

        self.depth += 1;
        self.frames[self.depth] = Frame { start, end: accept };
        self.current = start;
        self.open_macros.push(OpenMacro {
            depth: self.depth,
            prefix,
            state,
        });
        self
    }

    /// Seal the innermost macro's inner graph and resume the parent chain.
    pub fn end_macro(&mut self) -> &mut Self {
        let open = self.open_macros.pop().expect("end_macro without begin_macro");
        assert!(open.depth == self.depth, "end_macro inside an open group");

        let end = self.frames[self.depth].end;
        self.link(self.current, end);
        self.depth -= 1;
        self.current = open.state;
        self.frames[self.depth + 1] = Frame {
            start: open.prefix,
            end: open.state,
        };
        self
    }

    /// Copy the subgraph between `frame.start` and `frame.end`. Traversal is
    /// a worklist walk with a visited table, so shared merge points and the
    /// cycles left by `+` are cloned once; it never follows edges out of
    /// `frame.end`.
    fn clone_subgraph(&mut self, frame: Frame) -> Frame {
        debug_assert!(frame.start != frame.end);

        let mut visited: FxHashMap<StateId, StateId> = FxHashMap::default();
        let start_kind = self.automaton.arena()[frame.start].kind.clone();
        let start_clone = self.alloc(start_kind);
        visited.insert(frame.start, start_clone);

        let mut worklist = vec![frame.start];
        while let Some(source) = worklist.pop() {
            if source == frame.end {
                continue;
            }
            let source_clone = visited[&source];
            let successors: EdgeList = self.automaton.arena()[source].next.clone();
            for successor in successors {
                let target = match visited.get(&successor) {
                    Some(&clone) => clone,
                    None => {
                        let kind = self.automaton.arena()[successor].kind.clone();
                        let clone = self.alloc(kind);
                        visited.insert(successor, clone);
                        worklist.push(successor);
                        clone
                    }
                };
                self.link(source_clone, target);
            }
        }

        debug_assert!(visited.contains_key(&frame.end));
        Frame {
            start: visited[&frame.start],
            end: visited[&frame.end],
        }
    }
}
