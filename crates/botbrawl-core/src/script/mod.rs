//! The fighter strategy language.
//!
//! A script is a flat list of rules, checked top to bottom:
//!
//! ```text
//! # comments start with '#' or '//'
//! WHEN my_hp_percent < 20 DO retreat
//! WHEN i_am_heavier AND distance_to_enemy < 150 DO ram
//! DEFAULT approach
//! ```
//!
//! [`parse_script`] compiles text into a typed [`Program`]; it never fails
//! outright, it just collects per-line errors. [`execute_script`] walks the
//! program against a [`ScriptContext`] and returns the first matching
//! rule's [`Action`], or [`Action::FALLBACK`] when nothing matches.

mod ast;
mod interpreter;
mod parser;

pub use ast::{Action, Clause, Literal, Operator, Program, Rule, Variable};
pub use interpreter::{
    evaluate_clause, execute_script, execute_script_traced, ScriptContext, Selection, Value,
};
pub use parser::{parse_script, ParseResult};

/// Starter script given to new fighters.
pub const DEFAULT_SCRIPT: &str = "\
# Rules are checked top-to-bottom, first match wins

# Back off when badly hurt
WHEN my_hp_percent < 20 DO retreat

# Close range: go for it
WHEN distance_to_enemy < 80 DO attack

# Use the weight advantage
WHEN i_am_heavier AND distance_to_enemy < 150 DO ram

# Use the speed advantage
WHEN i_am_faster DO circle_left

DEFAULT approach
";
