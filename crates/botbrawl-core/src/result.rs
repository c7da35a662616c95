//! What a finished match hands back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::events::{CommentaryEvent, DamageEvent};
use crate::fighter::{FighterId, FighterState};

/// One recorded tick, for in-memory replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    /// Ticks executed so far, this one included.
    pub tick: u64,
    /// Simulated time at the end of this tick.
    pub timestamp: f32,
    /// Fighter states after this tick, in roster order.
    pub fighters: Vec<FighterState>,
    /// Damage applied during this tick.
    pub damage: Vec<DamageEvent>,
}

impl BattleState {
    /// State of the fighter with `id`.
    #[must_use]
    pub fn fighter(&self, id: &FighterId) -> Option<&FighterState> {
        self.fighters.iter().find(|f| &f.id == id)
    }
}

/// A fighter at the end of the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalState {
    /// Fighter id.
    pub id: FighterId,
    /// Remaining HP, rounded to the nearest whole point.
    pub hp: f32,
    /// HP at spawn.
    pub max_hp: f32,
    /// Survived the match.
    pub is_alive: bool,
    /// Where the fighter ended up.
    pub position: Vec2,
    /// Last selected action or behavior.
    pub final_action: String,
}

impl From<&FighterState> for FinalState {
    fn from(state: &FighterState) -> Self {
        Self {
            id: state.id.clone(),
            hp: state.hp.round(),
            max_hp: state.max_hp,
            is_alive: state.is_alive(),
            position: state.position,
            final_action: state.current_action.clone(),
        }
    }
}

/// Complete record of one match.
///
/// # Example
///
/// ```
/// use botbrawl_core::battle::run_battle;
/// use botbrawl_core::catalog::Catalog;
/// use botbrawl_core::fighter::BotConfig;
///
/// let catalog = Catalog::standard();
/// let red = BotConfig::scripted("red", "tank", "DEFAULT attack").with_weapons(["deathBlossom"]);
/// let blue = BotConfig::scripted("blue", "scout", "DEFAULT attack");
///
/// let result = run_battle(red, blue, "basicPit", &catalog);
/// assert_eq!(result.final_states.len(), 2);
/// assert!((result.duration - result.frame_count as f32 * 1000.0 / 60.0).abs() < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Sole survivor, or `None` for a draw.
    pub winner: Option<FighterId>,
    /// Simulated milliseconds elapsed.
    pub duration: f32,
    /// Ticks executed.
    pub frame_count: u64,
    /// One entry per fighter, in roster order.
    pub final_states: Vec<FinalState>,
    /// Every damage application, in tick order.
    pub damage_log: Vec<DamageEvent>,
    /// Narration, ordered by timestamp.
    pub commentary: Vec<CommentaryEvent>,
    /// The match hit the time cap with more than one fighter standing.
    pub timed_out: bool,
    /// Per-tick history when recording was enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<BattleState>,
}

impl MatchResult {
    /// Returns true if nobody won.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Final state of the fighter with `id`.
    #[must_use]
    pub fn final_state(&self, id: &FighterId) -> Option<&FinalState> {
        self.final_states.iter().find(|s| &s.id == id)
    }

    /// Total damage `id` dealt to its opponent.
    #[must_use]
    pub fn damage_dealt_by(&self, id: &FighterId) -> f32 {
        self.damage_log
            .iter()
            .filter(|e| e.attacker_id.as_ref() == Some(id))
            .map(|e| e.damage)
            .sum()
    }

    /// Total damage `id` took from every source.
    #[must_use]
    pub fn damage_taken_by(&self, id: &FighterId) -> f32 {
        self.damage_log
            .iter()
            .filter(|e| &e.target_id == id)
            .map(|e| e.damage)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DamageCause;

    fn event(attacker: Option<&str>, target: &str, damage: f32) -> DamageEvent {
        DamageEvent {
            attacker_id: attacker.map(FighterId::new),
            target_id: FighterId::new(target),
            damage,
            cause: DamageCause::COLLISION,
            timestamp: 0.0,
        }
    }

    fn result() -> MatchResult {
        MatchResult {
            winner: Some(FighterId::new("a")),
            duration: 1000.0,
            frame_count: 60,
            final_states: vec![FinalState {
                id: FighterId::new("a"),
                hp: 42.0,
                max_hp: 100.0,
                is_alive: true,
                position: Vec2::new(1.0, 2.0),
                final_action: "attack".into(),
            }],
            damage_log: vec![event(Some("a"), "b", 10.0), event(None, "b", 5.0), event(Some("b"), "a", 3.0)],
            commentary: Vec::new(),
            timed_out: false,
            frames: Vec::new(),
        }
    }

    #[test]
    fn serialized_shape_uses_camel_case() {
        let json = serde_json::to_value(result()).unwrap();
        assert_eq!(json["winner"], "a");
        assert_eq!(json["frameCount"], 60);
        assert_eq!(json["timedOut"], false);
        assert_eq!(json["finalStates"][0]["maxHp"], 100.0);
        assert_eq!(json["finalStates"][0]["isAlive"], true);
        assert_eq!(json["finalStates"][0]["finalAction"], "attack");
        assert_eq!(json["damageLog"].as_array().unwrap().len(), 3);
        assert!(json.get("frames").is_none());
    }

    #[test]
    fn draw_serializes_null_winner() {
        let mut draw = result();
        draw.winner = None;
        assert!(draw.is_draw());
        let json = serde_json::to_value(&draw).unwrap();
        assert!(json["winner"].is_null());
    }

    #[test]
    fn damage_totals_split_by_role() {
        let result = result();
        let a = FighterId::new("a");
        let b = FighterId::new("b");
        assert_eq!(result.damage_dealt_by(&a), 10.0);
        assert_eq!(result.damage_taken_by(&b), 15.0);
        assert_eq!(result.damage_taken_by(&a), 3.0);
    }

    #[test]
    fn final_state_rounds_hp() {
        let mut state = FighterState {
            hp: 41.6,
            ..crate::tests::helpers::state("x")
        };
        state.current_action = "ram".into();
        let final_state = FinalState::from(&state);
        assert_eq!(final_state.hp, 42.0);
        assert_eq!(final_state.final_action, "ram");
        assert!(final_state.is_alive);
    }
}
