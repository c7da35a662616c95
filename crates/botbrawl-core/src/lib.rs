//! # Botbrawl Core
//!
//! Robot combat simulation for Botbrawl: two configurable fighters in a walled
//! arena with hazards, run tick by tick to a winner, a draw, or the time cap.
//!
//! ## Architecture
//!
//! - **Strategy language** ([`script`]): a line-oriented rule language,
//!   parsed into a typed AST and interpreted against a per-tick context
//! - **Decision layer** ([`ai`]): preset behaviors or a compiled script turn
//!   the shared snapshot into one [`Intent`](ai::Intent) per fighter
//! - **Combat resolution** ([`battle`], [`resolver`]): intents become forces,
//!   the [`physics`] step reports contacts, resolvers turn contacts into
//!   damage, knockback and death
//! - **Commentary** ([`commentary`]): a seeded observer narrating the match
//!
//! Catalog tables are immutable values passed in by reference; nothing in the
//! crate holds global state.
//!
//! ## Usage
//!
//! ```
//! use botbrawl_core::battle::run_battle;
//! use botbrawl_core::catalog::Catalog;
//! use botbrawl_core::fighter::BotConfig;
//!
//! let catalog = Catalog::standard();
//! let red = BotConfig::scripted("red", "tank", "DEFAULT attack").with_weapons(["deathBlossom"]);
//! let blue = BotConfig::scripted("blue", "scout", "WHEN distance_to_enemy < 80 DO attack\nDEFAULT approach");
//!
//! let result = run_battle(red, blue, "basicPit", &catalog);
//! assert!(result.frame_count > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ai;
pub mod battle;
pub mod catalog;
pub mod commentary;
pub mod config;
pub mod error;
pub mod events;
pub mod fighter;
pub mod physics;
pub mod resolver;
pub mod result;
pub mod script;
pub mod series;
pub mod session;

pub use battle::{run_battle, run_battle_with, Battle};
pub use catalog::Catalog;
pub use config::MatchConfig;
pub use fighter::BotConfig;
pub use result::MatchResult;
pub use session::Session;

#[cfg(test)]
mod tests;
