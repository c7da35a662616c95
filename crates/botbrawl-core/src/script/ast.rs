//! Typed syntax tree for strategy scripts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Something a fighter can do for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Charge the opponent.
    Attack,
    /// Move directly away.
    Retreat,
    /// Orbit counterclockwise while closing in.
    CircleLeft,
    /// Orbit clockwise while closing in.
    CircleRight,
    /// Back off, then charge.
    Ram,
    /// Hold position.
    Wait,
    /// Close in, slowing down near the opponent.
    Approach,
    /// Head for the arena center.
    FleeToCenter,
    /// Swing wide, then strike directly.
    Flank,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Attack,
        Self::Retreat,
        Self::CircleLeft,
        Self::CircleRight,
        Self::Ram,
        Self::Wait,
        Self::Approach,
        Self::FleeToCenter,
        Self::Flank,
    ];

    /// Action taken when no rule matches.
    pub const FALLBACK: Self = Self::Approach;

    /// Script keyword for this action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Retreat => "retreat",
            Self::CircleLeft => "circle_left",
            Self::CircleRight => "circle_right",
            Self::Ram => "ram",
            Self::Wait => "wait",
            Self::Approach => "approach",
            Self::FleeToCenter => "flee_to_center",
            Self::Flank => "flank",
        }
    }

    /// Looks up an action by keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fact scripts can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// Distance between body centers.
    DistanceToEnemy,
    /// Own HP.
    MyHp,
    /// Own HP as a percentage of max.
    MyHpPercent,
    /// Opponent HP.
    EnemyHp,
    /// Opponent HP as a percentage of max.
    EnemyHpPercent,
    /// Own effective speed stat.
    MySpeed,
    /// Opponent effective speed stat.
    EnemySpeed,
    /// Own total weight.
    MyWeight,
    /// Opponent total weight.
    EnemyWeight,
    /// Distance to the nearest arena edge.
    DistanceToWall,
    /// Distance to the arena center.
    DistanceToCenter,
    /// Opponent carries a spinner.
    EnemyIsSpinning,
    /// `my_speed > enemy_speed`.
    IAmFaster,
    /// `my_weight > enemy_weight`.
    IAmHeavier,
}

impl Variable {
    /// Every variable, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::DistanceToEnemy,
        Self::MyHp,
        Self::MyHpPercent,
        Self::EnemyHp,
        Self::EnemyHpPercent,
        Self::MySpeed,
        Self::EnemySpeed,
        Self::MyWeight,
        Self::EnemyWeight,
        Self::DistanceToWall,
        Self::DistanceToCenter,
        Self::EnemyIsSpinning,
        Self::IAmFaster,
        Self::IAmHeavier,
    ];

    /// Script identifier for this variable.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DistanceToEnemy => "distance_to_enemy",
            Self::MyHp => "my_hp",
            Self::MyHpPercent => "my_hp_percent",
            Self::EnemyHp => "enemy_hp",
            Self::EnemyHpPercent => "enemy_hp_percent",
            Self::MySpeed => "my_speed",
            Self::EnemySpeed => "enemy_speed",
            Self::MyWeight => "my_weight",
            Self::EnemyWeight => "enemy_weight",
            Self::DistanceToWall => "distance_to_wall",
            Self::DistanceToCenter => "distance_to_center",
            Self::EnemyIsSpinning => "enemy_is_spinning",
            Self::IAmFaster => "i_am_faster",
            Self::IAmHeavier => "i_am_heavier",
        }
    }

    /// Looks up a variable by identifier, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|var| var.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl Operator {
    /// Source symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

/// Right-hand side of a clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Numeric literal.
    Number(f32),
    /// `true` or `false`.
    Bool(bool),
    /// Anything else. Never equal to a fact.
    Text(String),
}

impl Literal {
    /// Classifies raw literal text as the source language does.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => match text.parse::<f32>() {
                Ok(n) if n.is_finite() => Self::Number(n),
                _ => Self::Text(text.to_owned()),
            },
        }
    }
}

/// `variable op literal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Fact under test.
    pub variable: Variable,
    /// Comparison.
    pub op: Operator,
    /// Expected value.
    pub value: Literal,
}

impl Clause {
    /// A bare boolean fact, `variable == true`.
    #[must_use]
    pub const fn is_true(variable: Variable) -> Self {
        Self {
            variable,
            op: Operator::Eq,
            value: Literal::Bool(true),
        }
    }
}

/// One statement of a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// `WHEN <clauses> DO <action>`.
    When {
        /// Clauses, all of which must hold.
        clauses: Vec<Clause>,
        /// Action taken on match.
        action: Action,
        /// 1-based source line.
        line: usize,
    },
    /// `DEFAULT <action>`. Matches unconditionally where it sits.
    Default {
        /// Action taken.
        action: Action,
        /// 1-based source line.
        line: usize,
    },
}

impl Rule {
    /// Action this rule selects.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::When { action, .. } | Self::Default { action, .. } => *action,
        }
    }

    /// Source line the rule came from.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::When { line, .. } | Self::Default { line, .. } => *line,
        }
    }

    /// Returns true for the DEFAULT rule.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default { .. })
    }
}

/// An ordered rule list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
}

impl Program {
    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the program has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
