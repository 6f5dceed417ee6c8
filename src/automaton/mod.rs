//! Nondeterministic finite automaton engine.
//!
//! The state graph lives in an arena ([`StateArena`]) and is referenced by
//! integer handles, which makes the cyclic back-edges of quantifiers plain
//! data. The key components are:
//!
//! - `state`: state records - [`StateKind`] tagged union plus next/prev edges
//! - `arena`: ownership and edge maintenance
//! - `nfa`: the [`Automaton`] itself (start/accept sentinels, graph dump)
//! - `builder`: event-driven graph assembly ([`Builder`])
//! - `optimizer`: post-construction epsilon removal ([`Optimizer`])
//! - `executor`: Thompson simulation deciding acceptance ([`Executor`])
//! - `sparse_set`: the frontier set ([`SparseSet`])

mod arena;
mod builder;
mod executor;
mod nfa;
mod optimizer;
mod sparse_set;
mod state;

pub use arena::StateArena;
pub use builder::{Builder, MacroKind, MAX_GROUP_DEPTH};
pub use executor::{Executor, Status};
pub use nfa::Automaton;
pub use optimizer::Optimizer;
pub use sparse_set::SparseSet;
pub use state::{ClassSpec, EdgeList, Predicate, State, StateId, StateKind, SubGraph};
