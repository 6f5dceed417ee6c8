//! State records: the nodes of the automaton graph.
//!
//! Every state carries a kind (what, if anything, it consumes from the input)
//! plus ordered successor edges and the predecessor back-references the
//! optimizer needs. States are plain records in an arena; edges are ids, so
//! the quantifier back-edges that make the graph cyclic cost nothing special.

use std::fmt;

use smallvec::SmallVec;

/// A state identifier - an index into the owning [`StateArena`].
///
/// Ids can be copied freely and referenced cyclically.
///
/// [`StateArena`]: super::arena::StateArena
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub fn new(index: u32) -> Self {
        StateId(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Edge list of a state. Most states have one or two edges, so the first few
/// live inline.
pub type EdgeList = SmallVec<[StateId; 4]>;

/// Start/accept endpoints of a sub-automaton embedded in the same arena,
/// referenced by lookahead and macro states.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubGraph {
    pub start: StateId,
    pub accept: StateId,
}

/// A single-symbol predicate, used by character classes and the predefined
/// escape classes.
///
/// Dispatch is an exhaustive match rather than a boxed closure, which keeps
/// states cheaply clonable and debuggable.
#[derive(Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `\d` - ASCII decimal digit.
    Digit,
    /// `\D` - anything but a digit.
    NonDigit,
    /// `\w` - `[A-Za-z0-9_]`.
    Word,
    /// `\W` - anything but a word symbol.
    NonWord,
    /// `\s` - space, tab, CR, LF, vertical tab, form feed.
    Space,
    /// `\S` - anything but whitespace.
    NonSpace,
    /// A `[...]` class: member bytes and inclusive ranges, optionally negated.
    Class(ClassSpec),
}

/// The member set of a `[...]` character class.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ClassSpec {
    pub negated: bool,
    pub singles: SmallVec<[u8; 8]>,
    pub ranges: SmallVec<[(u8, u8); 4]>,
}

impl ClassSpec {
    fn member(&self, sym: u8) -> bool {
        self.singles.contains(&sym) || self.ranges.iter().any(|&(lo, hi)| lo <= sym && sym <= hi)
    }
}

#[inline]
fn is_digit(sym: u8) -> bool {
    sym.is_ascii_digit()
}

#[inline]
fn is_word(sym: u8) -> bool {
    sym.is_ascii_alphanumeric() || sym == b'_'
}

#[inline]
fn is_space(sym: u8) -> bool {
    matches!(sym, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

impl Predicate {
    /// Evaluate the predicate against one input symbol.
    #[inline]
    pub fn test(&self, sym: u8) -> bool {
        match self {
            Predicate::Digit => is_digit(sym),
            Predicate::NonDigit => !is_digit(sym),
            Predicate::Word => is_word(sym),
            Predicate::NonWord => !is_word(sym),
            Predicate::Space => is_space(sym),
            Predicate::NonSpace => !is_space(sym),
            Predicate::Class(spec) => spec.member(sym) != spec.negated,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Predicate::Digit => "Digit",
            Predicate::NonDigit => "NonDigit",
            Predicate::Word => "Word",
            Predicate::NonWord => "NonWord",
            Predicate::Space => "Space",
            Predicate::NonSpace => "NonSpace",
            Predicate::Class(_) => "Class",
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Class(spec) => f.debug_tuple("Class").field(spec).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// What a state does when the executor reaches it.
///
/// `Epsilon` and the lookahead kinds consume nothing; `Literal` consumes as
/// many symbols as it holds; `Macro` delegates consumption to its embedded
/// sub-automaton; every other kind consumes exactly one symbol.
#[derive(Clone, Debug)]
pub enum StateKind {
    /// Spontaneous transition; also the kind of the start/accept sentinels.
    Epsilon,
    /// Any symbol except the reserved null symbol.
    Any,
    /// Exactly one symbol.
    Symbol(u8),
    /// Any symbol in the inclusive range.
    Range(u8, u8),
    /// A run of symbols matched as a unit.
    Literal(Box<[u8]>),
    /// A symbol satisfying the predicate.
    Lambda(Predicate),
    /// Zero-width assertion: the sub-automaton accepts the remaining input.
    PositiveLookahead(SubGraph),
    /// Zero-width assertion: the sub-automaton rejects the remaining input.
    NegativeLookahead(SubGraph),
    /// Delegate: the embedded sub-automaton consumes the remaining input.
    Macro(SubGraph),
}

impl StateKind {
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, StateKind::Epsilon)
    }

    /// True for kinds whose match test reads input symbols directly.
    #[inline]
    pub fn consumes(&self) -> bool {
        matches!(
            self,
            StateKind::Any
                | StateKind::Symbol(_)
                | StateKind::Range(_, _)
                | StateKind::Literal(_)
                | StateKind::Lambda(_)
        )
    }

    /// Sub-automaton endpoints, for the kinds that embed one.
    #[inline]
    pub fn subgraph(&self) -> Option<SubGraph> {
        match self {
            StateKind::PositiveLookahead(sub)
            | StateKind::NegativeLookahead(sub)
            | StateKind::Macro(sub) => Some(*sub),
            _ => None,
        }
    }

    /// Short display form used by the graph dump.
    pub fn display_name(&self) -> String {
        match self {
            StateKind::Epsilon => "Epsilon".to_string(),
            StateKind::Any => "Any".to_string(),
            StateKind::Symbol(c) => format!("Symbol<{}>", char::from(*c).escape_default()),
            StateKind::Range(lo, hi) => format!(
                "Range<{}-{}>",
                char::from(*lo).escape_default(),
                char::from(*hi).escape_default()
            ),
            StateKind::Literal(s) => format!("Literal<{}>", String::from_utf8_lossy(s)),
            StateKind::Lambda(p) => format!("Lambda<{}>", p.name()),
            StateKind::PositiveLookahead(_) => "PositiveLookahead".to_string(),
            StateKind::NegativeLookahead(_) => "NegativeLookahead".to_string(),
            StateKind::Macro(_) => "Macro".to_string(),
        }
    }
}

/// A node in the automaton graph.
///
/// `next` order is preserved from construction. `prev` mirrors `next` (for
/// every edge A -> B, B lists A) and is consulted only by the optimizer.
#[derive(Clone, Debug)]
pub struct State {
    pub kind: StateKind,
    pub next: EdgeList,
    pub prev: EdgeList,
}

impl State {
    pub fn new(kind: StateKind) -> Self {
        State {
            kind,
            next: EdgeList::new(),
            prev: EdgeList::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_escape_classes() {
        for sym in 0u8..=127 {
            assert_eq!(Predicate::Digit.test(sym), sym.is_ascii_digit());
            assert_eq!(Predicate::Digit.test(sym), !Predicate::NonDigit.test(sym));
            assert_eq!(
                Predicate::Word.test(sym),
                sym.is_ascii_alphanumeric() || sym == b'_'
            );
            assert_eq!(Predicate::Space.test(sym), b" \t\r\n\x0b\x0c".contains(&sym));
        }
    }

    #[test]
    fn class_membership_and_negation() {
        let mut spec = ClassSpec::default();
        spec.singles.push(b'_');
        spec.ranges.push((b'a', b'f'));

        let class = Predicate::Class(spec.clone());
        assert!(class.test(b'_'));
        assert!(class.test(b'c'));
        assert!(!class.test(b'g'));

        spec.negated = true;
        let negated = Predicate::Class(spec);
        assert!(!negated.test(b'_'));
        assert!(negated.test(b'g'));
        assert!(negated.test(0));
    }

    #[test]
    fn kind_consumption() {
        assert!(!StateKind::Epsilon.consumes());
        assert!(StateKind::Symbol(b'x').consumes());
        assert!(StateKind::Literal(Box::from(*b"ab")).consumes());

        let sub = SubGraph {
            start: StateId::new(0),
            accept: StateId::new(1),
        };
        assert!(!StateKind::PositiveLookahead(sub).consumes());
        assert_eq!(StateKind::Macro(sub).subgraph(), Some(sub));
        assert_eq!(StateKind::Any.subgraph(), None);
    }
}
