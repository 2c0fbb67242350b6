//! Free-text rule notation.
//!
//! One rule per line: `SYMBOL=REPLACEMENT [odds]`. The replacement may be
//! empty (deletion) and the bracketed odds default to 1. Hand-authored rule
//! sets must declare odds that sum to exactly 1 per symbol.
//!
//! ```text
//! X=F[-XL]F[-X]+X
//! F=FF [0.8]
//! F=F [0.2]
//! ```

use crate::error::{Result, SproutError};
use crate::types::{Rule, RuleSet};

/// Parse rule text into a validated rule set.
///
/// Fails on the first malformed line (naming it) or when odds for any symbol
/// do not sum to 1. Callers keep their previous rule set on error.
pub fn parse_rules(source: &str) -> Result<RuleSet> {
    let mut rules = RuleSet::default();

    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let rule = parse_line(line).map_err(|message| SproutError::Parse {
            message: format!("line {}: {}", number + 1, message),
            help: Some("Expected SYMBOL=REPLACEMENT with optional [odds]".to_string()),
        })?;
        rules.push(rule);
    }

    rules.validate_odds()?;

    Ok(rules)
}

/// Parse one `SYMBOL=REPLACEMENT [odds]` line.
fn parse_line(line: &str) -> std::result::Result<Rule, String> {
    let (lhs, rhs) = line
        .split_once('=')
        .ok_or_else(|| format!("Error parsing line: \"{}\"", line))?;

    let mut symbols = lhs.trim().chars();
    let symbol = symbols
        .next()
        .filter(|c| c.is_ascii_alphabetic())
        .ok_or_else(|| format!("Error parsing line: \"{}\"", line))?;
    if symbols.next().is_some() {
        return Err(format!("Error parsing line: \"{}\"", line));
    }

    let rhs = rhs.trim();
    let (replacement, odds) = match rhs.rfind('[') {
        Some(open) if rhs.ends_with(']') => {
            let odds_text = &rhs[open + 1..rhs.len() - 1];
            match odds_text.trim().parse::<f64>() {
                Ok(odds) => (rhs[..open].trim(), odds),
                // A trailing bracket group that isn't a number is part of
                // the replacement (e.g. `X=F[+X]`).
                Err(_) => (rhs, 1.0),
            }
        }
        _ => (rhs, 1.0),
    };

    if !replacement
        .chars()
        .all(|c| c.is_ascii_alphabetic() || matches!(c, '+' | '-' | '[' | ']'))
    {
        return Err(format!("Error parsing line: \"{}\"", line));
    }

    Ok(Rule::new(symbol, replacement, odds))
}

/// Format a rule set back into the text notation.
///
/// Odds of 1 are omitted, mirroring how rules are authored.
pub fn format_rules(rules: &RuleSet) -> String {
    rules
        .rules()
        .iter()
        .map(|rule| {
            let replacement: String = rule.replacement.iter().map(|s| s.as_char()).collect();
            if rule.odds == 1.0 {
                format!("{}={}", rule.symbol, replacement)
            } else {
                format!("{}={} [{}]", rule.symbol, replacement, rule.odds)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
