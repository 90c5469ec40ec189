//! The turn-sequential game engine
//!
//! All mutable game state is owned here and every change flows through one
//! control loop: player action, then one AI invocation per living enemy,
//! then a visibility recompute. An `Impossible` rejection of the player's
//! action is surfaced to the log and leaves the turn unconsumed; the same
//! rejection from a monster is swallowed.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::actions::{self, Action};
use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::EntityId;
use crate::dungeon::{self, templates, TemplateKind};
use crate::entity::{ActorParts, Entities, Entity, RenderOrder};
use crate::log::{colors, MessageLog};
use crate::world::fov;
use crate::world::map::GameMap;

/// Scheduler state between turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Ready for the next player action
    AwaitingInput,
    /// The player's hp reached zero; no further turns
    PlayerDefeated,
    /// XP crossed the threshold; blocked until a stat boost is chosen
    LevelUp,
}

/// The stat increase chosen on level up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatBoost {
    Health,
    Power,
    Defense,
}

/// Owns the world and drives the turn cycle
#[derive(Serialize, Deserialize)]
pub struct Engine {
    pub entities: Entities,
    pub map: GameMap,
    pub player: EntityId,
    pub log: MessageLog,
    pub config: GameConfig,
    pub current_floor: u32,
    pub turns: u64,
    pub state: TurnState,
    pub(crate) rng: ChaCha8Rng,
}

impl Engine {
    /// Start a new game: spawn the player with starting gear, generate the
    /// first floor, and compute the initial field of view
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate().map_err(GameError::Config)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut entities = Entities::new();
        let player = entities.insert(templates::player(&config));

        // Starting gear, equipped without messages.
        let dagger = entities.insert(templates::build(TemplateKind::Dagger));
        let leather = entities.insert(templates::build(TemplateKind::LeatherArmor));
        {
            let parts = entities[player]
                .as_actor_mut()
                .expect("player template is an actor");
            parts.inventory.items.push(dagger);
            parts.inventory.items.push(leather);
            parts.equipment.weapon = Some(dagger);
            parts.equipment.armor = Some(leather);
        }

        let map = dungeon::generate(&config, 1, &mut entities, player, &mut rng);

        let mut engine = Self {
            entities,
            map,
            player,
            log: MessageLog::new(),
            config,
            current_floor: 1,
            turns: 0,
            state: TurnState::AwaitingInput,
            rng,
        };
        engine.update_fov();
        engine.log.add(
            "Hello and welcome, adventurer, to yet another dungeon!",
            colors::WELCOME_TEXT,
        );

        tracing::info!(seed, "new game started");
        Ok(engine)
    }

    // === Accessors ===

    pub fn player_entity(&self) -> &Entity {
        &self.entities[self.player]
    }

    pub fn player_alive(&self) -> bool {
        self.entities[self.player].is_alive()
    }

    /// Actor capability data; panics if the entity is not an actor, which
    /// is an engine invariant violation rather than a game event
    pub fn actor(&self, id: EntityId) -> &ActorParts {
        self.entities[id].as_actor().expect("entity is not an actor")
    }

    pub fn actor_mut(&mut self, id: EntityId) -> &mut ActorParts {
        self.entities[id]
            .as_actor_mut()
            .expect("entity is not an actor")
    }

    // === The turn cycle ===

    /// Apply one player action and, if it succeeds, run the rest of the
    /// turn: enemy phase, visibility recompute, terminal-state checks.
    ///
    /// Returns whether the turn advanced. An `Impossible` rejection is
    /// logged and leaves all state untouched; other errors are fatal.
    pub fn handle_player_action(&mut self, action: &Action) -> Result<bool> {
        if self.state != TurnState::AwaitingInput {
            return Ok(false);
        }

        if let Err(err) = actions::perform(self, self.player, action) {
            return match err {
                GameError::Impossible(reason) => {
                    self.log.add(reason, colors::IMPOSSIBLE);
                    Ok(false)
                }
                fatal => Err(fatal),
            };
        }

        self.handle_enemy_turns()?;
        self.update_fov();
        self.turns += 1;

        if !self.player_alive() {
            self.state = TurnState::PlayerDefeated;
        } else if self.actor(self.player).level.requires_level_up() {
            self.state = TurnState::LevelUp;
        }

        Ok(true)
    }

    /// Give every living enemy one AI invocation
    ///
    /// Iterates a snapshot taken at phase entry: deaths during the phase
    /// must not perturb the set being walked. A monster's `Impossible` is
    /// not an error and is discarded without a message.
    fn handle_enemy_turns(&mut self) -> Result<()> {
        let snapshot: Vec<EntityId> = self
            .map
            .living_actors(&self.entities)
            .into_iter()
            .filter(|&id| id != self.player)
            .collect();

        for id in snapshot {
            // Skip actors that died earlier in this phase.
            let Some(ai) = self
                .entities
                .get_mut(id)
                .and_then(|e| e.as_actor_mut())
                .and_then(|a| a.ai.take())
            else {
                continue;
            };

            let (next_ai, action) = ai.advance(
                id,
                &self.map,
                &self.entities,
                self.player,
                &self.config,
                &mut self.rng,
                &mut self.log,
            );
            if let Some(parts) = self.entities.get_mut(id).and_then(|e| e.as_actor_mut()) {
                parts.ai = Some(next_ai);
            }

            let Some(action) = action else { continue };
            match actions::perform(self, id, &action) {
                Ok(()) => {}
                Err(GameError::Impossible(reason)) => {
                    tracing::debug!(actor = id.0, %reason, "monster action rejected");
                }
                Err(fatal) => return Err(fatal),
            }
        }

        Ok(())
    }

    /// Recompute the field of view from the player's position
    pub fn update_fov(&mut self) {
        let origin = self.entities[self.player].pos;
        fov::compute(&mut self.map, origin, self.config.fov_radius);
    }

    // === Combat support ===

    /// Subtract hp from an actor, killing it when hp reaches zero
    pub(crate) fn apply_damage(&mut self, target: EntityId, amount: i32) {
        let died = {
            let parts = self.actor_mut(target);
            parts.fighter.take_damage(amount);
            parts.fighter.is_dead() && parts.ai.is_some()
        };
        if died {
            self.kill_actor(target);
        }
    }

    /// Turn a dead actor into an inert corpse entity, exactly once
    fn kill_actor(&mut self, id: EntityId) {
        let (message, color) = if id == self.player {
            ("You died!".to_string(), colors::PLAYER_DIE)
        } else {
            (format!("{} is dead!", self.entities[id].name), colors::ENEMY_DIE)
        };

        let entity = &mut self.entities[id];
        entity.glyph = '%';
        entity.color = colors::CORPSE;
        entity.blocks_movement = false;
        entity.render_order = RenderOrder::Corpse;
        let old_name = std::mem::take(&mut entity.name);
        entity.name = format!("remains of {old_name}");
        if let Some(parts) = entity.as_actor_mut() {
            parts.ai = None;
        }

        self.log.add(message, color);

        let xp = self.actor(id).level.xp_given;
        self.award_xp(xp);
    }

    fn award_xp(&mut self, xp: i32) {
        let player = self.player;
        if !self.actor_mut(player).level.gain_xp(xp) {
            return;
        }
        self.log
            .add(format!("You gain {xp} experience points."), colors::WHITE);

        if self.actor(player).level.requires_level_up() {
            let next = self.actor(player).level.current_level + 1;
            self.log
                .add(format!("You advance to level {next}"), colors::WHITE);
        }
    }

    // === Progression ===

    /// Spend the pending level up on a stat boost
    pub fn apply_level_up(&mut self, boost: StatBoost) -> Result<()> {
        if self.state != TurnState::LevelUp {
            return Err(GameError::impossible("You have nothing to improve."));
        }

        let player = self.player;
        match boost {
            StatBoost::Health => {
                self.actor_mut(player).fighter.raise_max_hp(20);
                self.log.add("Your health improves!", colors::WHITE);
            }
            StatBoost::Power => {
                self.actor_mut(player).fighter.base_power += 1;
                self.log.add("You feel stronger!", colors::WHITE);
            }
            StatBoost::Defense => {
                self.actor_mut(player).fighter.base_defense += 1;
                self.log
                    .add("Your movements are getting swifter!", colors::WHITE);
            }
        }
        self.actor_mut(player).level.increase_level();

        // Banked XP can cover several levels in one kill.
        self.state = if self.actor(player).level.requires_level_up() {
            TurnState::LevelUp
        } else {
            TurnState::AwaitingInput
        };
        Ok(())
    }

    // === Floor transitions ===

    /// Discard the current floor and generate the next one
    ///
    /// Only the player and the items it carries survive the transition.
    pub(crate) fn descend(&mut self) {
        self.current_floor += 1;

        let mut keep = vec![self.player];
        keep.extend(self.actor(self.player).inventory.items.iter().copied());
        self.entities.retain(|id, _| keep.contains(&id));

        self.map = dungeon::generate(
            &self.config,
            self.current_floor,
            &mut self.entities,
            self.player,
            &mut self.rng,
        );
        tracing::info!(floor = self.current_floor, "descended");
    }

    // === Persistence ===

    /// Snapshot the whole engine to a JSON file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "game saved");
        Ok(())
    }

    /// Reconstruct an engine from a snapshot file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let engine: Engine = serde_json::from_str(&text)?;
        Ok(engine)
    }
}
