//! Line parser for machine descriptions.
//!
//! One machine per line:
//!
//! ```text
//! [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
//! ```
//!
//! The leading `[...]` indicator section is optional and ignored. Each
//! `(...)` group is one button listing the counters it increments; the
//! `{...}` section is the target vector. Numbers are read leniently: a token
//! that does not parse reads as zero.
//!
//! # Example
//!
//! ```
//! use pressforge_core::parse_machine;
//!
//! let machine = parse_machine(0, "(0) (0,1) {2,1}").unwrap();
//! assert_eq!(machine.button_count(), 2);
//! assert_eq!(machine.target(), &[2, 1]);
//! ```

use std::str::FromStr;

use crate::error::{ParseError, PressForgeError};
use crate::machine::Machine;

/// Parses one machine description.
pub fn parse_machine(index: usize, line: &str) -> Result<Machine, ParseError> {
    let rest = skip_indicator(line.trim())?;

    let open = rest.find('{').ok_or(ParseError::MissingTarget)?;
    let (groups, target) = rest.split_at(open);
    let close = target
        .find('}')
        .ok_or(ParseError::UnterminatedGroup { open: '{' })?;

    let buttons = parse_groups(groups)?;
    let target: Vec<u32> = tokens(&target[1..close]).collect();

    Ok(Machine::new(index, buttons, target)?)
}

/// Parses every non-blank line of `text`, numbering machines by position.
pub fn parse_batch(text: &str) -> Result<Vec<Machine>, PressForgeError> {
    let mut machines = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let machine =
            parse_machine(machines.len(), line).map_err(|source| PressForgeError::Parse {
                line: line_index + 1,
                source,
            })?;
        machines.push(machine);
    }
    Ok(machines)
}

fn skip_indicator(line: &str) -> Result<&str, ParseError> {
    match line.strip_prefix('[') {
        Some(inner) => inner
            .find(']')
            .map(|close| &inner[close + 1..])
            .ok_or(ParseError::UnterminatedGroup { open: '[' }),
        None => Ok(line),
    }
}

fn parse_groups(mut rest: &str) -> Result<Vec<Vec<usize>>, ParseError> {
    let mut buttons: Vec<Vec<usize>> = Vec::new();
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let close = after
            .find(')')
            .ok_or(ParseError::UnterminatedGroup { open: '(' })?;
        buttons.push(tokens(&after[..close]).collect());
        rest = &after[close + 1..];
    }
    Ok(buttons)
}

fn tokens<'a, T: FromStr + Default + 'a>(list: &'a str) -> impl Iterator<Item = T> + 'a {
    list.split(',').map(lenient)
}

fn lenient<T: FromStr + Default>(token: &str) -> T {
    token.trim().parse().unwrap_or_default()
}

#[cfg(test)]
mod tests;
