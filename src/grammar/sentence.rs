//! The expanded symbol sequence and its bracket structure.

use std::fmt;

use crate::types::{ParameterizedSymbol, Symbol};

/// An ordered sequence of parameterized symbols.
///
/// Produced wholesale by grammar expansion; ages in place during animation;
/// truncated in place by pruning. The matching-bracket index is computed once
/// per mutation and shared by every consumer that needs scope structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    symbols: Vec<ParameterizedSymbol>,
    /// `brackets[i] == Some(j)` pairs the `[` at `i` with the `]` at `j`
    /// (and vice versa). Unmatched brackets map to `None`.
    brackets: Vec<Option<usize>>,
}

impl Sentence {
    pub fn new(symbols: Vec<ParameterizedSymbol>) -> Self {
        let brackets = match_brackets(&symbols);
        Self { symbols, brackets }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[ParameterizedSymbol] {
        &self.symbols
    }

    pub fn get(&self, index: usize) -> Option<&ParameterizedSymbol> {
        self.symbols.get(index)
    }

    /// The index of the `]` matching the `[` at `index` (or the reverse).
    pub fn matching_bracket(&self, index: usize) -> Option<usize> {
        self.brackets.get(index).copied().flatten()
    }

    /// Advance every symbol's age by `delta`.
    ///
    /// Ages only ever grow; they reset solely through re-expansion.
    pub fn age_all(&mut self, delta: f64) {
        for s in &mut self.symbols {
            s.age += delta;
        }
    }

    /// Truncate after the branch at `index`, keeping exactly one balanced
    /// bracket group that follows it.
    ///
    /// Everything up to and including `index` survives. If a `[` follows,
    /// the group through its matching `]` is kept too ("cut here but keep
    /// the very next sub-branch intact"); everything beyond is discarded.
    /// Unmatched brackets degrade to plain truncation. Never grows the
    /// sentence, and re-applying at the same index is a no-op.
    pub fn chop(&mut self, index: usize) {
        if index >= self.symbols.len() {
            return;
        }

        let mut keep_through = index;

        let open = (index + 1..self.symbols.len())
            .find(|&i| self.symbols[i].symbol == Symbol::ScopeOpen);
        if let Some(open) = open {
            if let Some(close) = self.matching_bracket(open) {
                keep_through = close;
            }
        }

        if keep_through + 1 < self.symbols.len() {
            self.symbols.truncate(keep_through + 1);
            self.brackets = match_brackets(&self.symbols);
        }
    }

    /// Count of `[` minus count of `]`; zero for balanced sentences.
    pub fn bracket_balance(&self) -> i64 {
        self.symbols.iter().fold(0, |acc, s| match s.symbol {
            Symbol::ScopeOpen => acc + 1,
            Symbol::ScopeClose => acc - 1,
            _ => acc,
        })
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.symbols {
            write!(f, "{}", s.symbol)?;
        }
        Ok(())
    }
}

/// Pair up scope brackets in one forward pass.
fn match_brackets(symbols: &[ParameterizedSymbol]) -> Vec<Option<usize>> {
    let mut pairs = vec![None; symbols.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (i, s) in symbols.iter().enumerate() {
        match s.symbol {
            Symbol::ScopeOpen => stack.push(i),
            Symbol::ScopeClose => {
                if let Some(open) = stack.pop() {
                    pairs[open] = Some(i);
                    pairs[i] = Some(open);
                }
            }
            _ => {}
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{symbols_from_str, SymbolParams};

    fn sentence(text: &str) -> Sentence {
        Sentence::new(
            symbols_from_str(text)
                .into_iter()
                .map(|s| ParameterizedSymbol::new(s, 0.0, SymbolParams::None))
                .collect(),
        )
    }

    #[test]
    fn test_display_round_trip() {
        let s = sentence("F[+F]F[-F]F");
        assert_eq!(s.to_string(), "F[+F]F[-F]F");
    }

    #[test]
    fn test_bracket_index_nested() {
        //              0123456789a
        let s = sentence("F[[+F][-F]]");
        assert_eq!(s.matching_bracket(1), Some(10));
        assert_eq!(s.matching_bracket(2), Some(5));
        assert_eq!(s.matching_bracket(6), Some(9));
        assert_eq!(s.matching_bracket(10), Some(1));
        assert_eq!(s.matching_bracket(0), None);
    }

    #[test]
    fn test_bracket_index_unmatched() {
        let s = sentence("F]F[");
        assert_eq!(s.matching_bracket(1), None);
        assert_eq!(s.matching_bracket(3), None);
    }

    #[test]
    fn test_age_all() {
        let mut s = sentence("FF");
        s.age_all(1.5);
        s.age_all(0.5);
        assert!(s.symbols().iter().all(|sym| sym.age == 2.0));
    }

    #[test]
    fn test_chop_keeps_one_group() {
        //              0123456789
        let mut s = sentence("F[+F]F[-F]F");
        s.chop(0);
        assert_eq!(s.to_string(), "F[+F]");
    }

    #[test]
    fn test_chop_without_following_group() {
        let mut s = sentence("FFF");
        s.chop(1);
        assert_eq!(s.to_string(), "FF");
    }

    #[test]
    fn test_chop_never_grows() {
        let mut s = sentence("F[+F]F[-F]F");
        let before = s.len();
        s.chop(5);
        assert!(s.len() <= before);
    }

    #[test]
    fn test_chop_is_idempotent() {
        let mut once = sentence("F[+F]F[-F]F");
        once.chop(0);

        let mut twice = sentence("F[+F]F[-F]F");
        twice.chop(0);
        twice.chop(0);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_chop_nested_group() {
        //              0         1
        //              0123456789012
        let mut s = sentence("F[[F]F]F[+F]F");
        s.chop(0);
        // Keeps through the ] matching the first [ after index 0.
        assert_eq!(s.to_string(), "F[[F]F]");
    }

    #[test]
    fn test_chop_out_of_range_is_noop() {
        let mut s = sentence("F[+F]");
        s.chop(99);
        assert_eq!(s.to_string(), "F[+F]");
    }

    #[test]
    fn test_chop_unmatched_open_truncates() {
        let mut s = sentence("F[FF");
        s.chop(0);
        assert_eq!(s.to_string(), "F");
    }

    #[test]
    fn test_bracket_balance() {
        assert_eq!(sentence("F[+F]F").bracket_balance(), 0);
        assert_eq!(sentence("F[[F]").bracket_balance(), 1);
        assert_eq!(sentence("F]").bracket_balance(), -1);
    }
}
