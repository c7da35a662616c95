//! Rule evaluation against a per-tick context.

use serde::{Deserialize, Serialize};

use super::ast::{Action, Clause, Literal, Operator, Program, Rule, Variable};

/// Facts a script can test, rebuilt every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptContext {
    /// Distance between body centers.
    pub distance_to_enemy: f32,
    /// Own HP.
    pub my_hp: f32,
    /// Own HP, 0 to 100.
    pub my_hp_percent: f32,
    /// Opponent HP.
    pub enemy_hp: f32,
    /// Opponent HP, 0 to 100.
    pub enemy_hp_percent: f32,
    /// Own effective speed stat.
    pub my_speed: f32,
    /// Opponent effective speed stat.
    pub enemy_speed: f32,
    /// Own total weight.
    pub my_weight: f32,
    /// Opponent total weight.
    pub enemy_weight: f32,
    /// Distance to the nearest arena edge.
    pub distance_to_wall: f32,
    /// Distance to the arena center.
    pub distance_to_center: f32,
    /// Opponent carries a spinner.
    pub enemy_is_spinning: bool,
}

/// A fact's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Numeric fact.
    Number(f32),
    /// Boolean fact.
    Bool(bool),
}

impl ScriptContext {
    /// Looks up a variable.
    #[must_use]
    pub fn value(&self, variable: Variable) -> Value {
        use Value::{Bool, Number};
        match variable {
            Variable::DistanceToEnemy => Number(self.distance_to_enemy),
            Variable::MyHp => Number(self.my_hp),
            Variable::MyHpPercent => Number(self.my_hp_percent),
            Variable::EnemyHp => Number(self.enemy_hp),
            Variable::EnemyHpPercent => Number(self.enemy_hp_percent),
            Variable::MySpeed => Number(self.my_speed),
            Variable::EnemySpeed => Number(self.enemy_speed),
            Variable::MyWeight => Number(self.my_weight),
            Variable::EnemyWeight => Number(self.enemy_weight),
            Variable::DistanceToWall => Number(self.distance_to_wall),
            Variable::DistanceToCenter => Number(self.distance_to_center),
            Variable::EnemyIsSpinning => Bool(self.enemy_is_spinning),
            Variable::IAmFaster => Bool(self.my_speed > self.enemy_speed),
            Variable::IAmHeavier => Bool(self.my_weight > self.enemy_weight),
        }
    }
}

/// Result of evaluating a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Chosen action.
    pub action: Action,
    /// Index into `Program::rules` of the rule that matched, `None` for the fallback.
    pub rule: Option<usize>,
}

/// Tests one clause. Mismatched types and text literals are false.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn evaluate_clause(clause: &Clause, context: &ScriptContext) -> bool {
    match (context.value(clause.variable), &clause.value) {
        (Value::Number(actual), Literal::Number(expected)) => {
            let expected = *expected;
            match clause.op {
                Operator::Lt => actual < expected,
                Operator::Gt => actual > expected,
                Operator::Le => actual <= expected,
                Operator::Ge => actual >= expected,
                Operator::Eq => actual == expected,
                Operator::Ne => actual != expected,
            }
        }
        (Value::Bool(actual), Literal::Bool(expected)) => match clause.op {
            Operator::Eq => actual == *expected,
            Operator::Ne => actual != *expected,
            Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge => false,
        },
        _ => false,
    }
}

fn rule_matches(rule: &Rule, context: &ScriptContext) -> bool {
    match rule {
        Rule::Default { .. } => true,
        Rule::When { clauses, .. } => clauses.iter().all(|c| evaluate_clause(c, context)),
    }
}

/// Picks the action of the first matching rule, recording which rule it was.
#[must_use]
pub fn execute_script_traced(program: &Program, context: &ScriptContext) -> Selection {
    program
        .rules
        .iter()
        .position(|rule| rule_matches(rule, context))
        .map_or(
            Selection {
                action: Action::FALLBACK,
                rule: None,
            },
            |idx| Selection {
                action: program.rules[idx].action(),
                rule: Some(idx),
            },
        )
}

/// Picks the action of the first matching rule, or `approach` if none match.
///
/// Pure: safe to call any number of times with a fresh context.
///
/// # Example
///
/// ```
/// use botbrawl_core::script::{execute_script, parse_script, Action, ScriptContext};
///
/// let program = parse_script("WHEN distance_to_enemy < 80 DO attack\nDEFAULT approach").program;
///
/// let near = ScriptContext { distance_to_enemy: 50.0, ..Default::default() };
/// let far = ScriptContext { distance_to_enemy: 200.0, ..Default::default() };
/// assert_eq!(execute_script(&program, &near), Action::Attack);
/// assert_eq!(execute_script(&program, &far), Action::Approach);
/// ```
#[must_use]
pub fn execute_script(program: &Program, context: &ScriptContext) -> Action {
    execute_script_traced(program, context).action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use proptest::prelude::*;

    fn program(source: &str) -> Program {
        let parsed = parse_script(source);
        assert!(parsed.is_valid(), "{:?}", parsed.errors);
        parsed.program
    }

    fn at_distance(distance: f32) -> ScriptContext {
        ScriptContext {
            distance_to_enemy: distance,
            ..ScriptContext::default()
        }
    }

    mod clause_tests {
        use super::*;

        #[test]
        fn numeric_operators() {
            let ctx = at_distance(50.0);
            for (src, expected) in [
                ("< 80", true),
                ("> 80", false),
                ("<= 50", true),
                (">= 50.5", false),
                ("== 50", true),
                ("!= 50", false),
            ] {
                let p = program(&format!("WHEN distance_to_enemy {src} DO attack"));
                assert_eq!(execute_script(&p, &ctx) == Action::Attack, expected, "{src}");
            }
        }

        #[test]
        fn derived_booleans() {
            let ctx = ScriptContext {
                my_speed: 6.0,
                enemy_speed: 3.0,
                my_weight: 80.0,
                enemy_weight: 120.0,
                ..ScriptContext::default()
            };
            assert_eq!(execute_script(&program("WHEN i_am_faster DO flank"), &ctx), Action::Flank);
            assert_eq!(
                execute_script(&program("WHEN i_am_heavier DO ram"), &ctx),
                Action::Approach
            );
            assert_eq!(
                execute_script(&program("WHEN i_am_heavier == false DO wait"), &ctx),
                Action::Wait
            );
        }

        #[test]
        fn type_mismatches_are_false() {
            let ctx = ScriptContext {
                enemy_is_spinning: true,
                distance_to_enemy: 1.0,
                ..ScriptContext::default()
            };
            for src in [
                "WHEN enemy_is_spinning > 0 DO retreat",
                "WHEN enemy_is_spinning == 1 DO retreat",
                "WHEN enemy_is_spinning != 1 DO retreat",
                "WHEN distance_to_enemy == true DO retreat",
                "WHEN distance_to_enemy < near DO retreat",
                "WHEN distance_to_enemy != near DO retreat",
                "WHEN distance_to_enemy DO retreat",
            ] {
                assert_eq!(execute_script(&program(src), &ctx), Action::Approach, "{src}");
            }
        }
    }

    mod ordering_tests {
        use super::*;

        #[test]
        fn scenario_attack_when_close() {
            let p = program("WHEN distance_to_enemy < 80 DO attack\nDEFAULT approach");
            assert_eq!(execute_script(&p, &at_distance(50.0)), Action::Attack);
            assert_eq!(execute_script(&p, &at_distance(200.0)), Action::Approach);
        }

        #[test]
        fn first_match_wins() {
            let p = program("WHEN distance_to_enemy < 100 DO ram\nWHEN distance_to_enemy < 50 DO attack");
            let selection = execute_script_traced(&p, &at_distance(10.0));
            assert_eq!(selection.action, Action::Ram);
            assert_eq!(selection.rule, Some(0));
        }

        #[test]
        fn default_matches_where_it_sits() {
            let p = program("DEFAULT wait\nWHEN distance_to_enemy < 80 DO attack");
            let selection = execute_script_traced(&p, &at_distance(10.0));
            assert_eq!(selection.action, Action::Wait);
            assert_eq!(selection.rule, Some(0));
        }

        #[test]
        fn empty_program_falls_back_to_approach() {
            let selection = execute_script_traced(&Program::default(), &ScriptContext::default());
            assert_eq!(selection.action, Action::Approach);
            assert_eq!(selection.rule, None);
        }
    }

    mod first_match_property_tests {
        use super::*;

        proptest! {
            #[test]
            fn returns_first_satisfied_threshold(
                thresholds in proptest::collection::vec(0.0f32..500.0, 0..8),
                with_default in any::<bool>(),
                distance in 0.0f32..500.0,
            ) {
                let mut source: Vec<String> = thresholds
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        let action = Action::ALL[i % Action::ALL.len()];
                        format!("WHEN distance_to_enemy < {t} DO {action}")
                    })
                    .collect();
                if with_default {
                    source.push("DEFAULT wait".into());
                }
                let p = program(&source.join("\n"));

                let expected = thresholds
                    .iter()
                    .position(|t| distance < *t)
                    .map(|i| Action::ALL[i % Action::ALL.len()])
                    .unwrap_or(if with_default { Action::Wait } else { Action::Approach });

                prop_assert_eq!(execute_script(&p, &at_distance(distance)), expected);
            }
        }
    }
}
