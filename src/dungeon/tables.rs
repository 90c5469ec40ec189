//! Floor-gated spawn tables
//!
//! Both tables are step functions over the floor number: an entry takes
//! effect from its `min_floor` onward. Weight entries for a template already
//! in the table replace its weight rather than accumulating.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::dungeon::templates::TemplateKind;

/// A step of a per-floor maximum
#[derive(Debug, Clone, Copy)]
pub struct FloorMaximum {
    pub min_floor: u32,
    pub value: u32,
}

pub const MAX_MONSTERS_BY_FLOOR: &[FloorMaximum] = &[
    FloorMaximum { min_floor: 1, value: 2 },
    FloorMaximum { min_floor: 4, value: 3 },
    FloorMaximum { min_floor: 6, value: 5 },
];

pub const MAX_ITEMS_BY_FLOOR: &[FloorMaximum] = &[
    FloorMaximum { min_floor: 1, value: 1 },
    FloorMaximum { min_floor: 4, value: 2 },
];

/// A weighted template entry, eligible from `min_floor` onward
#[derive(Debug, Clone, Copy)]
pub struct SpawnWeight {
    pub min_floor: u32,
    pub template: TemplateKind,
    pub weight: u32,
}

pub const MONSTER_WEIGHTS: &[SpawnWeight] = &[
    SpawnWeight { min_floor: 0, template: TemplateKind::Orc, weight: 80 },
    SpawnWeight { min_floor: 3, template: TemplateKind::Troll, weight: 15 },
    SpawnWeight { min_floor: 5, template: TemplateKind::Troll, weight: 30 },
    SpawnWeight { min_floor: 7, template: TemplateKind::Troll, weight: 60 },
];

pub const ITEM_WEIGHTS: &[SpawnWeight] = &[
    SpawnWeight { min_floor: 0, template: TemplateKind::HealthPotion, weight: 35 },
    SpawnWeight { min_floor: 2, template: TemplateKind::ConfusionScroll, weight: 10 },
    SpawnWeight { min_floor: 4, template: TemplateKind::LightningScroll, weight: 25 },
    SpawnWeight { min_floor: 4, template: TemplateKind::Sword, weight: 5 },
    SpawnWeight { min_floor: 6, template: TemplateKind::FireballScroll, weight: 25 },
    SpawnWeight { min_floor: 6, template: TemplateKind::ChainMail, weight: 15 },
];

/// Resolve a step-function maximum for a floor
pub fn max_for_floor(table: &[FloorMaximum], floor: u32) -> u32 {
    let mut current = 0;
    for step in table {
        if step.min_floor > floor {
            break;
        }
        current = step.value;
    }
    current
}

/// Sample `count` templates from the entries eligible on `floor`
///
/// Later entries for the same template replace its weight, so a template can
/// grow more common on deeper floors without stacking.
pub fn pick_templates(
    table: &[SpawnWeight],
    floor: u32,
    count: u32,
    rng: &mut impl Rng,
) -> Vec<TemplateKind> {
    let mut eligible: Vec<(TemplateKind, u32)> = Vec::new();
    for entry in table {
        if entry.min_floor > floor {
            break;
        }
        match eligible.iter_mut().find(|(kind, _)| *kind == entry.template) {
            Some(slot) => slot.1 = entry.weight,
            None => eligible.push((entry.template, entry.weight)),
        }
    }

    if eligible.is_empty() || count == 0 {
        return Vec::new();
    }

    let weights = WeightedIndex::new(eligible.iter().map(|(_, weight)| *weight))
        .expect("spawn weights are positive");
    (0..count).map(|_| eligible[weights.sample(rng)].0).collect()
}
