//! Regular expressions over the automaton engine.
//!
//! Supported syntax:
//! - `.` matches any symbol except the null symbol
//! - `[...]` character classes with ranges, `[^...]` negated, `[^]` any
//! - `|` alternation within the innermost group
//! - `(...)` grouping
//! - `?` / `+` / `*` quantifiers, `{n}` / `{n,}` / `{n,m}` bounds
//! - `\d \D \w \W \s \S` predefined classes, `\<punct>` literal escapes
//! - `(?=...)` / `(?!...)` lookahead over the remaining input
//!
//! Matching is whole-input acceptance: there is no substring search, no
//! capture extraction and no anchors (a pattern is implicitly anchored at
//! both ends).

mod parser;

pub use parser::{CompileError, ErrorKind, MAX_REPEAT};

use crate::automaton::{Automaton, Builder, Optimizer};

/// A compiled regular expression.
///
/// Compilation parses the pattern into a state graph and runs the epsilon
/// optimizer once; the result is immutable and can be shared across threads,
/// with every `accept` call running an independent executor.
///
/// ```
/// use renfa::Regex;
///
/// let regex = Regex::compile("(ab)+")?;
/// assert!(regex.accept("ababab"));
/// assert!(!regex.accept("abba"));
/// # Ok::<(), renfa::CompileError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    automaton: Automaton,
}

impl Regex {
    /// Compile a pattern into an optimized automaton.
    pub fn compile(pattern: &str) -> Result<Regex, CompileError> {
        let mut automaton = Automaton::new();
        let mut builder = Builder::new(&mut automaton);
        parser::compile_into(pattern.as_bytes(), &mut builder)?;
        Optimizer::new(&mut automaton).remove_epsilons();
        Ok(Regex {
            pattern: pattern.to_string(),
            automaton,
        })
    }

    /// True iff the automaton consumes the entire input and ends accepted.
    ///
    /// ```text
    /// /Hello/ accept "Hello, world!" = false
    /// /Hello.*/ accept "Hello, world!" = true
    /// ```
    pub fn accept(&self, input: &str) -> bool {
        self.accept_bytes(input.as_bytes())
    }

    /// Byte-level variant of [`accept`](Self::accept); the alphabet is
    /// single bytes, so inputs need not be UTF-8.
    pub fn accept_bytes(&self, input: &[u8]) -> bool {
        self.automaton.accepts(input)
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled state graph.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

/// Compile-and-match in one call, for one-off tests.
pub fn accept(pattern: &str, input: &str) -> Result<bool, CompileError> {
    Ok(Regex::compile(pattern)?.accept(input))
}
