//! Player-facing fighter configuration.

use serde::{Deserialize, Deserializer, Serialize};

use super::FighterId;
use crate::ai::BehaviorType;

/// Parameters for the preset-behavior strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfig {
    /// Behavior that drives the fighter.
    pub primary_behavior: BehaviorType,
    /// Optional behavior blended in at 30%.
    #[serde(default)]
    pub secondary_behavior: Option<BehaviorType>,
    /// Aggression in `[0, 100]`.
    #[serde(default = "default_aggression", deserialize_with = "clamped_aggression")]
    pub aggression: f32,
    /// Distance the fighter prefers to keep; informational for the presets.
    #[serde(default = "default_engagement_distance")]
    pub engagement_distance: f32,
}

fn default_aggression() -> f32 {
    50.0
}

fn clamped_aggression<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    f32::deserialize(deserializer).map(|a| a.clamp(0.0, 100.0))
}

fn default_engagement_distance() -> f32 {
    100.0
}

impl AiConfig {
    /// Preset with just a primary behavior and default tuning.
    #[must_use]
    pub fn new(primary_behavior: BehaviorType) -> Self {
        Self {
            primary_behavior,
            secondary_behavior: None,
            aggression: default_aggression(),
            engagement_distance: default_engagement_distance(),
        }
    }

    /// Sets the secondary behavior.
    #[must_use]
    pub fn with_secondary(mut self, behavior: BehaviorType) -> Self {
        self.secondary_behavior = Some(behavior);
        self
    }

    /// Sets aggression, clamped to `[0, 100]`.
    #[must_use]
    pub fn with_aggression(mut self, aggression: f32) -> Self {
        self.aggression = aggression.clamp(0.0, 100.0);
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new(BehaviorType::Aggressive)
    }
}

/// How a fighter decides what to do. Exactly one per fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Parameterized geometric behaviors.
    Ai(AiConfig),
    /// Script text in the strategy language.
    Script(String),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Ai(AiConfig::default())
    }
}

/// A fighter as built by the player.
///
/// The weapon count is not checked against the chassis slot count here; that
/// is the editor's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// Identity, unique within a match.
    pub id: FighterId,
    /// Display name used by the commentators. Defaults to the id.
    #[serde(default)]
    pub name: String,
    /// Chassis catalog id.
    pub chassis_id: String,
    /// Weapon catalog ids, at most two.
    #[serde(default)]
    pub weapon_ids: Vec<String>,
    /// Armor catalog id.
    #[serde(default)]
    pub armor_id: Option<String>,
    /// Presentation color tag, passed through untouched.
    #[serde(default)]
    pub color: String,
    /// Decision strategy.
    #[serde(default)]
    pub strategy: Strategy,
}

impl BotConfig {
    /// Creates a fighter driven by preset behaviors.
    #[must_use]
    pub fn with_ai(id: impl Into<FighterId>, chassis_id: impl Into<String>, ai: AiConfig) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            chassis_id: chassis_id.into(),
            weapon_ids: Vec::new(),
            armor_id: None,
            color: String::new(),
            strategy: Strategy::Ai(ai),
        }
    }

    /// Creates a fighter driven by a strategy script.
    #[must_use]
    pub fn scripted(
        id: impl Into<FighterId>,
        chassis_id: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        let mut config = Self::with_ai(id, chassis_id, AiConfig::default());
        config.strategy = Strategy::Script(script.into());
        config
    }

    /// Replaces the weapon list.
    #[must_use]
    pub fn with_weapons<I, S>(mut self, weapon_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weapon_ids = weapon_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the armor.
    #[must_use]
    pub fn with_armor(mut self, armor_id: impl Into<String>) -> Self {
        self.armor_id = Some(armor_id.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name for narration: the display name, or the id when unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scripted_fighter() {
        let json = r#"{
            "id": "red",
            "chassisId": "scout",
            "weaponIds": ["buzzSaw"],
            "strategy": { "script": "DEFAULT attack" }
        }"#;
        let config: BotConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.id.as_str(), "red");
        assert_eq!(config.display_name(), "red");
        assert_eq!(config.armor_id, None);
        assert!(matches!(config.strategy, Strategy::Script(ref s) if s == "DEFAULT attack"));
    }

    #[test]
    fn decodes_ai_fighter_with_defaults() {
        let json = r#"{
            "id": "blue",
            "name": "Big Blue",
            "chassisId": "tank",
            "armorId": "basicPlating",
            "strategy": { "ai": { "primaryBehavior": "defensive", "secondaryBehavior": "reactive" } }
        }"#;
        let config: BotConfig = serde_json::from_str(json).unwrap();
        let Strategy::Ai(ai) = &config.strategy else {
            panic!("expected ai strategy");
        };
        assert_eq!(ai.primary_behavior, BehaviorType::Defensive);
        assert_eq!(ai.secondary_behavior, Some(BehaviorType::Reactive));
        assert_eq!(ai.aggression, 50.0);
        assert_eq!(config.display_name(), "Big Blue");
    }

    #[test]
    fn aggression_is_clamped() {
        let ai = AiConfig::new(BehaviorType::Ram).with_aggression(250.0);
        assert_eq!(ai.aggression, 100.0);
        let ai = AiConfig::new(BehaviorType::Ram).with_aggression(-5.0);
        assert_eq!(ai.aggression, 0.0);
    }

    #[test]
    fn decoded_aggression_is_clamped() {
        let ai: AiConfig = serde_json::from_str(r#"{ "primaryBehavior": "aggressive", "aggression": 250 }"#).unwrap();
        assert_eq!(ai.aggression, 100.0);
        let ai: AiConfig = serde_json::from_str(r#"{ "primaryBehavior": "ram", "aggression": -40 }"#).unwrap();
        assert_eq!(ai.aggression, 0.0);
    }
}
