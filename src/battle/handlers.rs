//! Speed handlers keyed by ability / item identity.
//!
//! Each handler receives the evaluation context and the running speed
//! multiplier, and scales it in place. Built-in handlers live in static
//! tables; content can register more before the chain is built.

use crate::battle::state::{BattleSide, Battler, FieldState};
use phf::phf_map;
use schema::{Terrain, Weather};
use std::collections::HashMap;
use std::fmt;

/// Read-only view handed to every speed evaluator.
#[derive(Debug, Clone, Copy)]
pub struct SpeedContext<'a> {
    pub battler: &'a Battler,
    pub side: &'a BattleSide,
    pub field: &'a FieldState,
}

/// Scales the running speed multiplier for the battler in `ctx`.
pub type SpeedHandler = fn(ctx: &SpeedContext<'_>, multiplier: &mut f64);

// =========================================================================
// Ability handlers
// =========================================================================

/// Quick Feet: 1.5x Speed while affected by any major status
fn quick_feet(ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    if ctx.battler.status.is_some() {
        *multiplier *= 1.5;
    }
}

/// Swift Swim: 2x Speed in Rain
fn swift_swim(ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    if matches!(ctx.field.weather, Some(Weather::Rain | Weather::HeavyRain)) {
        *multiplier *= 2.0;
    }
}

/// Chlorophyll: 2x Speed in Sun
fn chlorophyll(ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    if matches!(ctx.field.weather, Some(Weather::Sun | Weather::HarshSun)) {
        *multiplier *= 2.0;
    }
}

/// Sand Rush: 2x Speed in Sandstorm
fn sand_rush(ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    if ctx.field.weather == Some(Weather::Sandstorm) {
        *multiplier *= 2.0;
    }
}

/// Slush Rush: 2x Speed in Hail/Snow
fn slush_rush(ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    if matches!(ctx.field.weather, Some(Weather::Hail | Weather::Snow)) {
        *multiplier *= 2.0;
    }
}

/// Surge Surfer: 2x Speed in Electric Terrain
fn surge_surfer(ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    if ctx.field.terrain == Some(Terrain::Electric) {
        *multiplier *= 2.0;
    }
}

// =========================================================================
// Item handlers
// =========================================================================

fn choice_scarf(_ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    *multiplier *= 1.5;
}

// Iron Ball, Macho Brace and the Power items all halve Speed.
fn halve_speed(_ctx: &SpeedContext<'_>, multiplier: &mut f64) {
    *multiplier /= 2.0;
}

static ABILITY_SPEED_HANDLERS: phf::Map<&'static str, SpeedHandler> = phf_map! {
    "quickfeet" => quick_feet as SpeedHandler,
    "swiftswim" => swift_swim as SpeedHandler,
    "chlorophyll" => chlorophyll as SpeedHandler,
    "sandrush" => sand_rush as SpeedHandler,
    "slushrush" => slush_rush as SpeedHandler,
    "surgesurfer" => surge_surfer as SpeedHandler,
};

static ITEM_SPEED_HANDLERS: phf::Map<&'static str, SpeedHandler> = phf_map! {
    "choicescarf" => choice_scarf as SpeedHandler,
    "ironball" => halve_speed as SpeedHandler,
    "machobrace" => halve_speed as SpeedHandler,
    "poweranklet" => halve_speed as SpeedHandler,
    "powerband" => halve_speed as SpeedHandler,
    "powerbelt" => halve_speed as SpeedHandler,
    "powerbracer" => halve_speed as SpeedHandler,
    "powerlens" => halve_speed as SpeedHandler,
    "powerweight" => halve_speed as SpeedHandler,
};

/// Identity-keyed handler registry. Immutable once shared with a chain.
#[derive(Clone, Default)]
pub struct SpeedHandlers {
    handlers: HashMap<String, SpeedHandler>,
}

impl SpeedHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin_abilities() -> Self {
        Self::from_table(&ABILITY_SPEED_HANDLERS)
    }

    pub fn builtin_items() -> Self {
        Self::from_table(&ITEM_SPEED_HANDLERS)
    }

    fn from_table(table: &phf::Map<&'static str, SpeedHandler>) -> Self {
        let handlers = table
            .entries()
            .map(|(id, handler)| (id.to_string(), *handler))
            .collect();
        Self { handlers }
    }

    /// Register or replace the handler for `id`. Ids are normalized.
    pub fn register(&mut self, id: &str, handler: SpeedHandler) -> &mut Self {
        self.handlers.insert(schema::to_id(id), handler);
        self
    }

    pub fn get(&self, id: &str) -> Option<SpeedHandler> {
        self.handlers.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for SpeedHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("SpeedHandlers").field("ids", &ids).finish()
    }
}
