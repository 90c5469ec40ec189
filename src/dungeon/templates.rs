//! Template entities copied into the world by the generator

use serde::{Deserialize, Serialize};

use crate::ai::Ai;
use crate::core::config::GameConfig;
use crate::core::types::{Color, GridPos};
use crate::entity::{
    ActorParts, Consumable, Entity, EntityKind, Equipment, Equippable, Fighter, Inventory,
    ItemParts, Level, RenderOrder,
};

/// Every spawnable template, referenced by the floor tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    Orc,
    Troll,
    HealthPotion,
    ConfusionScroll,
    LightningScroll,
    FireballScroll,
    Dagger,
    Sword,
    LeatherArmor,
    ChainMail,
}

/// The player template; progression tunables come from the config
pub fn player(config: &GameConfig) -> Entity {
    Entity {
        pos: GridPos::default(),
        glyph: '@',
        color: Color::new(255, 255, 255),
        name: "Player".into(),
        blocks_movement: true,
        render_order: RenderOrder::Actor,
        kind: EntityKind::Actor(ActorParts {
            fighter: Fighter::new(30, 1, 2),
            inventory: Inventory::new(config.inventory_capacity),
            equipment: Equipment::new(),
            level: Level::new(config.level_up_base, config.level_up_factor, 0),
            ai: Some(Ai::Player),
        }),
    }
}

/// Build a fresh entity from a template
pub fn build(kind: TemplateKind) -> Entity {
    match kind {
        TemplateKind::Orc => monster('o', Color::new(63, 127, 63), "Orc", Fighter::new(10, 0, 3), 35),
        TemplateKind::Troll => {
            monster('T', Color::new(0, 127, 0), "Troll", Fighter::new(16, 1, 4), 100)
        }

        TemplateKind::HealthPotion => item(
            '!',
            Color::new(127, 0, 255),
            "Health Potion",
            ItemParts {
                consumable: Some(Consumable::Healing { amount: 4 }),
                equippable: None,
            },
        ),
        TemplateKind::ConfusionScroll => item(
            '~',
            Color::new(207, 63, 255),
            "Confusion Scroll",
            ItemParts {
                consumable: Some(Consumable::Confusion { turns: 10 }),
                equippable: None,
            },
        ),
        TemplateKind::LightningScroll => item(
            '~',
            Color::new(255, 255, 0),
            "Lightning Scroll",
            ItemParts {
                consumable: Some(Consumable::Lightning {
                    damage: 20,
                    maximum_range: 5,
                }),
                equippable: None,
            },
        ),
        TemplateKind::FireballScroll => item(
            '~',
            Color::new(255, 0, 0),
            "Fireball Scroll",
            ItemParts {
                consumable: Some(Consumable::Fireball {
                    damage: 12,
                    radius: 3,
                }),
                equippable: None,
            },
        ),

        TemplateKind::Dagger => item(
            '/',
            Color::new(0, 191, 255),
            "Dagger",
            ItemParts {
                consumable: None,
                equippable: Some(Equippable::weapon(2)),
            },
        ),
        TemplateKind::Sword => item(
            '/',
            Color::new(0, 191, 255),
            "Sword",
            ItemParts {
                consumable: None,
                equippable: Some(Equippable::weapon(4)),
            },
        ),
        TemplateKind::LeatherArmor => item(
            '[',
            Color::new(139, 69, 19),
            "Leather Armor",
            ItemParts {
                consumable: None,
                equippable: Some(Equippable::armor(1)),
            },
        ),
        TemplateKind::ChainMail => item(
            '[',
            Color::new(139, 69, 19),
            "Chain Mail",
            ItemParts {
                consumable: None,
                equippable: Some(Equippable::armor(3)),
            },
        ),
    }
}

fn monster(glyph: char, color: Color, name: &str, fighter: Fighter, xp_given: i32) -> Entity {
    Entity {
        pos: GridPos::default(),
        glyph,
        color,
        name: name.into(),
        blocks_movement: true,
        render_order: RenderOrder::Actor,
        kind: EntityKind::Actor(ActorParts {
            fighter,
            inventory: Inventory::new(0),
            equipment: Equipment::new(),
            level: Level::reward(xp_given),
            ai: Some(Ai::hostile()),
        }),
    }
}

fn item(glyph: char, color: Color, name: &str, parts: ItemParts) -> Entity {
    Entity {
        pos: GridPos::default(),
        glyph,
        color,
        name: name.into(),
        blocks_movement: false,
        render_order: RenderOrder::Item,
        kind: EntityKind::Item(parts),
    }
}
