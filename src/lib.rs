//! renfa: regular-expression matching over a nondeterministic finite
//! automaton.
//!
//! A pattern compiles into a graph of states held in an arena; matching asks
//! whether the automaton can consume the *entire* input and end on its accept
//! state. There is no substring search, no captures, no backreferences - just
//! fast whole-string acceptance with the classic Thompson frontier
//! simulation.
//!
//! ```
//! use renfa::Regex;
//!
//! let regex = Regex::compile("https?://\\w+(\\.\\w+)+")?;
//! assert!(regex.accept("https://www.example.com"));
//! assert!(!regex.accept("https://www"));
//! # Ok::<(), renfa::CompileError>(())
//! ```
//!
//! The automaton layer is public too: graphs can be assembled event by event
//! with [`Builder`], squeezed with [`Optimizer`] and driven step by step with
//! [`Executor`]. See the [`automaton`] module docs.

pub mod automaton;
mod regexp;

pub use automaton::{
    Automaton, Builder, Executor, MacroKind, Optimizer, Predicate, SparseSet, State, StateArena,
    StateId, StateKind, Status, SubGraph, MAX_GROUP_DEPTH,
};
pub use regexp::{accept, CompileError, ErrorKind, Regex, MAX_REPEAT};
