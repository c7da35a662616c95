//! Line pools.
//!
//! Placeholders: `{a}` and `{b}` (the two fighters at the start), `{attacker}`,
//! `{target}`, `{damage}`, `{winner}`, `{hp}`, `{weapon}`.

use crate::events::Speaker;

pub(super) const START_OPEN: &[&str] = &[
    "Welcome to the arena! {a} and {b} are locked in and ready to brawl!",
    "Ladies and gentlemen, tonight's main event: {a} versus {b}!",
    "The lights are up, the floor is swept, and {a} is staring down {b}!",
];

pub(super) const START_REPLY: &[&str] = &[
    "I've got a good feeling about this one, Chuck. Someone's leaving in a bucket.",
    "Somebody call the scrapyard, they're going to want to be on standby.",
    "I had a sandwich riding on this match. Don't let me down.",
];

pub(super) const BIG_HIT: &[&str] = &[
    "{attacker} connects with the {weapon}! {damage} damage on {target}!",
    "What a shot from {attacker}! {target} eats {damage} points of pain!",
    "BOOM! {attacker} lands a {weapon} hit for {damage}!",
    "{target} is reeling after taking {damage} from {attacker}!",
];

pub(super) const BIG_HIT_REPLY: &[&str] = &[
    "That's going to leave a mark. Several marks, actually.",
    "I felt that one in my fillings, Chuck.",
    "{target}'s warranty does not cover that.",
];

pub(super) const LOW_HP: &[&str] = &[
    "{target} is in serious trouble! Barely holding together!",
    "Sparks flying from {target}! That chassis can't take much more!",
    "{target} is running on fumes out there!",
];

pub(super) const LOW_HP_REPLY: &[&str] = &[
    "I can hear the death rattle from up here, Chuck.",
    "Somebody get {target} a roll of duct tape. A big one.",
];

pub(super) const PIT_FALL: &[&str] = &[
    "{target} goes DOWN THE PIT! Gone! Just gone!",
    "Into the abyss with {target}! That's a one-way trip!",
    "{target} finds the pit! That's the end of the line!",
];

pub(super) const PIT_FALL_REPLY: &[&str] = &[
    "Say goodbye, {target}. We hardly knew ye.",
    "Nobody comes back from the pit, Chuck. Nobody.",
];

pub(super) const WALL_SLAM: &[&str] = &[
    "{target} slams into the wall! {damage} damage!",
    "Right into the barrier goes {target}!",
    "{target} tests the arena wall and the wall wins!",
];

pub(super) const WALL_SLAM_REPLY: &[&str] = &[
    "Those walls are load-bearing, {target}. Respect them.",
    "The wall is undefeated tonight.",
];

pub(super) const FINISH_WIN: &[&str] = &[
    "It's all over! {winner} takes the victory with {hp} HP left!",
    "{winner} wins! {hp} HP remaining and not a scratch of doubt!",
    "And that's the match! {winner} walks away with {hp} HP!",
];

pub(super) const FINISH_WIN_REPLY: &[&str] = &[
    "Dominant. Absolutely dominant. I need a cigarette.",
    "{winner} is going home with the trophy and the bragging rights.",
    "Put that one in the highlight reel, Chuck.",
];

pub(super) const FINISH_DOUBLE_KO: &[&str] = &[
    "DOUBLE KNOCKOUT! Both machines are down! It's a draw!",
    "They took each other out! Nobody wins tonight!",
];

pub(super) const FINISH_TIME_UP: &[&str] = &[
    "Time expires! Both bots still standing, and this one goes down as a draw!",
    "That's the horn! Time expires with nobody finished off. A draw!",
];

pub(super) const BANTER: &[(Speaker, &str)] = &[
    (Speaker::Frank, "You know Chuck, I built a robot once. It mostly vacuumed."),
    (Speaker::Chuck, "Let's keep our eyes on the arena, Frank."),
    (Speaker::Frank, "The tension in here is thicker than hydraulic fluid."),
    (Speaker::Chuck, "Both teams are playing this one very carefully."),
    (Speaker::Frank, "Careful is a nice word for boring, Chuck."),
    (Speaker::Chuck, "You can really see the engineering choices paying off here."),
    (Speaker::Frank, "My mechanic charges less than this match is costing these teams."),
    (Speaker::Frank, "It's like watching two toasters argue about bread."),
];
