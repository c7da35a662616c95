//! Line-oriented parser for strategy scripts.
//!
//! Every line is parsed on its own. A bad line produces exactly one
//! [`ScriptError`] and is dropped; the remaining lines still compile.

use tracing::warn;

use super::ast::{Action, Clause, Literal, Operator, Program, Rule, Variable};
use crate::error::ScriptError;

/// Output of [`parse_script`]: the usable rules plus one error per bad line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    /// Rules from every well-formed line, in source order.
    pub program: Program,
    /// One entry per malformed line, in source order.
    pub errors: Vec<ScriptError>,
}

impl ParseResult {
    /// Returns true if every statement parsed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compiles script text into a rule list.
///
/// # Example
///
/// ```
/// use botbrawl_core::script::{parse_script, Action};
///
/// let parsed = parse_script("WHEN distance_to_enemy < 80 DO attack\nDEFAULT approach");
/// assert!(parsed.is_valid());
/// assert_eq!(parsed.program.rules.len(), 2);
/// assert_eq!(parsed.program.rules[1].action(), Action::Approach);
///
/// let parsed = parse_script("WHEN banana > 3 DO attack\nDEFAULT dance");
/// assert_eq!(parsed.errors.len(), 2);
/// assert_eq!(parsed.errors[0].to_string(), "Line 1: Unknown variable \"banana\"");
/// ```
#[must_use]
pub fn parse_script(source: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        match parse_line(line, line_no) {
            Ok(rule) => result.program.rules.push(rule),
            Err(err) => {
                warn!(line = line_no, error = %err.message, "dropping script line");
                result.errors.push(err);
            }
        }
    }

    result
}

fn parse_line(line: &str, line_no: usize) -> Result<Rule, ScriptError> {
    if starts_with_keyword(line, "DEFAULT") {
        parse_default(line, line_no)
    } else if starts_with_keyword(line, "WHEN") {
        parse_when(line, line_no)
    } else {
        Err(ScriptError::new(
            line_no,
            "Unknown statement. Use WHEN or DEFAULT.",
        ))
    }
}

fn parse_default(line: &str, line_no: usize) -> Result<Rule, ScriptError> {
    let syntax = || ScriptError::new(line_no, "Invalid DEFAULT syntax. Use: DEFAULT <action>");

    let rest = &line["DEFAULT".len()..];
    if !rest.starts_with(char::is_whitespace) {
        return Err(syntax());
    }
    let word = rest.trim();
    if !is_word(word) {
        return Err(syntax());
    }

    let action = lookup_action(word, line_no)?;
    Ok(Rule::Default {
        action,
        line: line_no,
    })
}

fn parse_when(line: &str, line_no: usize) -> Result<Rule, ScriptError> {
    let (condition, action_word) = split_when(line)
        .ok_or_else(|| {
            ScriptError::new(
                line_no,
                "Invalid WHEN syntax. Use: WHEN <condition> DO <action>",
            )
        })?;

    let action = lookup_action(action_word, line_no)?;

    let clauses = split_and(condition)
        .into_iter()
        .map(|part| parse_clause(part.trim(), line_no))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Rule::When {
        clauses,
        action,
        line: line_no,
    })
}

/// Splits `WHEN <condition> DO <action>` into its two payloads.
///
/// The action is the final word and `DO` the word before it, so a condition
/// may itself mention `DO`.
fn split_when(line: &str) -> Option<(&str, &str)> {
    let rest = &line["WHEN".len()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let (head, action) = rest.trim().rsplit_once(char::is_whitespace)?;
    if !is_word(action) {
        return None;
    }

    let head = head.trim_end();
    let cut = head.len().checked_sub(2)?;
    if !head.get(cut..)?.eq_ignore_ascii_case("DO") {
        return None;
    }

    let condition = head.get(..cut)?;
    if !condition.ends_with(char::is_whitespace) {
        return None;
    }
    let condition = condition.trim();
    if condition.is_empty() {
        return None;
    }

    Some((condition, action))
}

/// Splits a condition on whitespace-delimited `AND`, ignoring case.
fn split_and(condition: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut part_start = 0;
    let mut search_from = 0;

    while let Some((start, end)) = next_word(condition, search_from) {
        let word = &condition[start..end];
        let has_space_before = condition[..start].ends_with(char::is_whitespace);
        let has_space_after = condition[end..].starts_with(char::is_whitespace);
        if word.eq_ignore_ascii_case("AND") && has_space_before && has_space_after {
            parts.push(&condition[part_start..start]);
            part_start = end;
        }
        search_from = end;
    }
    parts.push(&condition[part_start..]);
    parts
}

/// Byte range of the next whitespace-delimited word at or after `from`.
fn next_word(text: &str, from: usize) -> Option<(usize, usize)> {
    let tail = &text[from..];
    let start = from + tail.find(|c: char| !c.is_whitespace())?;
    let end = text[start..]
        .find(char::is_whitespace)
        .map_or(text.len(), |offset| start + offset);
    Some((start, end))
}

fn parse_clause(part: &str, line_no: usize) -> Result<Clause, ScriptError> {
    let invalid = || ScriptError::new(line_no, format!("Invalid condition \"{part}\""));

    let name_len = part
        .find(|c: char| !is_word_char(c))
        .unwrap_or(part.len());
    let name = &part[..name_len];
    if name.is_empty() {
        return Err(invalid());
    }

    let after_name = part[name_len..].trim_start();
    let Some((op, after_op)) = split_operator(after_name) else {
        // A bare boolean fact.
        if name_len == part.len() {
            if let Some(variable) = Variable::from_name(name) {
                return Ok(Clause::is_true(variable));
            }
        }
        return Err(invalid());
    };

    let value = after_op.trim();
    if value.is_empty() {
        return Err(invalid());
    }

    let variable = Variable::from_name(name).ok_or_else(|| {
        ScriptError::new(
            line_no,
            format!("Unknown variable \"{}\"", name.to_ascii_lowercase()),
        )
    })?;

    Ok(Clause {
        variable,
        op,
        value: Literal::parse(value),
    })
}

fn split_operator(text: &str) -> Option<(Operator, &str)> {
    const OPERATORS: [(&str, Operator); 6] = [
        ("<=", Operator::Le),
        (">=", Operator::Ge),
        ("==", Operator::Eq),
        ("!=", Operator::Ne),
        ("<", Operator::Lt),
        (">", Operator::Gt),
    ];
    OPERATORS
        .iter()
        .find_map(|(symbol, op)| text.strip_prefix(symbol).map(|rest| (*op, rest)))
}

fn lookup_action(word: &str, line_no: usize) -> Result<Action, ScriptError> {
    Action::from_name(word).ok_or_else(|| {
        ScriptError::new(
            line_no,
            format!("Unknown action \"{}\"", word.to_ascii_lowercase()),
        )
    })
}

fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn errors(source: &str) -> Vec<String> {
        parse_script(source)
            .errors
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    mod statement_tests {
        use super::*;

        #[test]
        fn skips_blank_and_comment_lines() {
            let parsed = parse_script("\n   \n# hash comment\n// slash comment\nDEFAULT wait\n");
            assert!(parsed.is_valid());
            assert_eq!(parsed.program.rules.len(), 1);
            assert_eq!(parsed.program.rules[0].line(), 5);
        }

        #[test]
        fn keywords_are_case_insensitive() {
            let parsed = parse_script("when My_Hp < 10 do RETREAT\ndefault Approach");
            assert!(parsed.is_valid(), "{:?}", parsed.errors);
            assert_eq!(parsed.program.rules[0].action(), Action::Retreat);
            assert_eq!(parsed.program.rules[1].action(), Action::Approach);
        }

        #[test]
        fn unknown_statement() {
            assert_eq!(
                errors("ATTACK NOW"),
                vec!["Line 1: Unknown statement. Use WHEN or DEFAULT."]
            );
        }

        #[test]
        fn default_errors() {
            assert_eq!(
                errors("DEFAULT\nDEFAULT go fast\nDEFAULT dance"),
                vec![
                    "Line 1: Invalid DEFAULT syntax. Use: DEFAULT <action>",
                    "Line 2: Invalid DEFAULT syntax. Use: DEFAULT <action>",
                    "Line 3: Unknown action \"dance\"",
                ]
            );
        }

        #[test]
        fn when_errors() {
            assert_eq!(
                errors("WHEN my_hp < 10\nWHEN DO attack\nWHEN my_hp < 10 DO Boogie"),
                vec![
                    "Line 1: Invalid WHEN syntax. Use: WHEN <condition> DO <action>",
                    "Line 2: Invalid WHEN syntax. Use: WHEN <condition> DO <action>",
                    "Line 3: Unknown action \"boogie\"",
                ]
            );
        }

        #[test]
        fn bad_line_is_dropped_others_survive() {
            let parsed = parse_script(
                "WHEN distance_to_enemy < 80 DO attack\nWHEN luck > 3 DO ram\nDEFAULT approach",
            );
            assert_eq!(parsed.program.rules.len(), 2);
            assert_eq!(parsed.errors.len(), 1);
            assert_eq!(parsed.errors[0].line, 2);
            assert!(!parsed.is_valid());
        }
    }

    mod clause_tests {
        use super::*;

        fn clauses(source: &str) -> Vec<Clause> {
            let parsed = parse_script(source);
            assert!(parsed.is_valid(), "{:?}", parsed.errors);
            match &parsed.program.rules[0] {
                Rule::When { clauses, .. } => clauses.clone(),
                Rule::Default { .. } => panic!("expected WHEN"),
            }
        }

        #[test]
        fn parses_every_operator() {
            for (symbol, op) in [
                ("<", Operator::Lt),
                (">", Operator::Gt),
                ("<=", Operator::Le),
                (">=", Operator::Ge),
                ("==", Operator::Eq),
                ("!=", Operator::Ne),
            ] {
                let parsed = clauses(&format!("WHEN my_hp {symbol} 5 DO wait"));
                assert_eq!(parsed[0].op, op, "{symbol}");
                assert_eq!(parsed[0].value, Literal::Number(5.0));
            }
        }

        #[test]
        fn operator_without_spaces() {
            let parsed = clauses("WHEN distance_to_enemy<=120 DO attack");
            assert_eq!(parsed[0].variable, Variable::DistanceToEnemy);
            assert_eq!(parsed[0].op, Operator::Le);
        }

        #[test]
        fn and_joins_clauses() {
            let parsed = clauses("WHEN i_am_heavier AND distance_to_enemy < 150 and my_hp > 1 DO ram");
            assert_eq!(parsed.len(), 3);
            assert_eq!(parsed[0], Clause::is_true(Variable::IAmHeavier));
            assert_eq!(parsed[2].variable, Variable::MyHp);
        }

        #[test]
        fn bare_variable_means_true() {
            let parsed = clauses("WHEN enemy_is_spinning DO retreat");
            assert_eq!(parsed, vec![Clause::is_true(Variable::EnemyIsSpinning)]);
        }

        #[test]
        fn text_literals_are_kept() {
            let parsed = clauses("WHEN distance_to_enemy < close DO attack");
            assert_eq!(parsed[0].value, Literal::Text("close".into()));
        }

        #[test]
        fn clause_errors() {
            assert_eq!(
                errors("WHEN mood > 3 DO attack"),
                vec!["Line 1: Unknown variable \"mood\""]
            );
            assert_eq!(
                errors("WHEN feeling_lucky DO attack"),
                vec!["Line 1: Invalid condition \"feeling_lucky\""]
            );
            assert_eq!(
                errors("WHEN my_hp = 3 DO attack"),
                vec!["Line 1: Invalid condition \"my_hp = 3\""]
            );
        }

        #[test]
        fn one_error_per_line_even_with_many_bad_clauses() {
            assert_eq!(errors("WHEN a > 1 AND b > 2 DO attack").len(), 1);
        }
    }

    mod count_property_tests {
        use super::*;

        fn valid_line() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("WHEN distance_to_enemy < 80 DO attack".to_string()),
                Just("WHEN i_am_faster DO circle_left".to_string()),
                Just("WHEN my_hp_percent <= 20 AND enemy_is_spinning DO retreat".to_string()),
                Just("DEFAULT approach".to_string()),
            ]
        }

        fn invalid_line() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("WHEN nonsense DO attack".to_string()),
                Just("DEFAULT teleport".to_string()),
                Just("ATTACK".to_string()),
                Just("WHEN my_hp < 3".to_string()),
            ]
        }

        proptest! {
            #[test]
            fn rule_and_error_counts_match_line_counts(
                lines in proptest::collection::vec(
                    prop_oneof![valid_line().prop_map(|l| (l, true)), invalid_line().prop_map(|l| (l, false))],
                    0..24,
                )
            ) {
                let valid = lines.iter().filter(|(_, ok)| *ok).count();
                let invalid = lines.len() - valid;
                let source = lines.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>().join("\n");

                let parsed = parse_script(&source);
                prop_assert_eq!(parsed.program.rules.len(), valid);
                prop_assert_eq!(parsed.errors.len(), invalid);
                prop_assert_eq!(parsed.is_valid(), invalid == 0);
            }
        }
    }
}
