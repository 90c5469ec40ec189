//! Actor behaviors
//!
//! AI is a value stored inside the actor. Each enemy-phase invocation
//! consumes the current behavior and returns the next one together with at
//! most one action, so behavior changes (confusion wearing off) are explicit
//! transitions rather than reassignment of live objects.

pub mod pathfinding;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::core::config::GameConfig;
use crate::core::types::{EntityId, GridPos, DIRECTIONS};
use crate::entity::Entities;
use crate::log::{colors, MessageLog};
use crate::world::map::GameMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Ai {
    /// Actions are supplied by the input layer; the variant only marks the
    /// actor as alive
    Player,

    /// Chase the player while visible, melee when adjacent
    ///
    /// The retained path may go stale after the player leaves view; it is
    /// followed to its end and recomputed whenever the player is seen again.
    Hostile { path: Vec<GridPos> },

    /// Stumble in random directions for a limited number of turns, then
    /// revert to the wrapped behavior
    Confused { previous: Box<Ai>, turns_remaining: u32 },
}

impl Ai {
    pub fn hostile() -> Self {
        Ai::Hostile { path: Vec::new() }
    }

    pub fn confused(previous: Ai, turns: u32) -> Self {
        Ai::Confused {
            previous: Box::new(previous),
            turns_remaining: turns,
        }
    }

    /// Run one enemy-phase invocation for `actor`
    ///
    /// Consumes the behavior and returns its successor plus the action to
    /// perform this turn (`None` acts as a wait).
    pub fn advance(
        self,
        actor: EntityId,
        map: &GameMap,
        entities: &Entities,
        player: EntityId,
        config: &GameConfig,
        rng: &mut ChaCha8Rng,
        log: &mut MessageLog,
    ) -> (Ai, Option<Action>) {
        match self {
            Ai::Player => (Ai::Player, None),

            Ai::Hostile { mut path } => {
                let my_pos = entities[actor].pos;
                let target_pos = entities[player].pos;
                let dx = target_pos.x - my_pos.x;
                let dy = target_pos.y - my_pos.y;

                // Symmetric sight lines: standing in the player's field of
                // view means the player is in ours.
                if map.is_visible(my_pos) {
                    if my_pos.chebyshev(target_pos) <= 1 {
                        return (Ai::Hostile { path }, Some(Action::Melee { dx, dy }));
                    }
                    path = pathfinding::path_to(map, entities, config, my_pos, target_pos);
                }

                if !path.is_empty() {
                    let next = path.remove(0);
                    let step = Action::Move {
                        dx: next.x - my_pos.x,
                        dy: next.y - my_pos.y,
                    };
                    return (Ai::Hostile { path }, Some(step));
                }

                (Ai::Hostile { path }, Some(Action::Wait))
            }

            Ai::Confused {
                previous,
                turns_remaining,
            } => {
                if turns_remaining == 0 {
                    log.add(
                        format!("The {} is no longer confused.", entities[actor].name),
                        colors::WHITE,
                    );
                    return (*previous, None);
                }

                let (dx, dy) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];

                // Bump so a confused actor may blunder into an adjacent
                // actor and attack it.
                (
                    Ai::Confused {
                        previous,
                        turns_remaining: turns_remaining - 1,
                    },
                    Some(Action::Bump { dx, dy }),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::entity::{
        ActorParts, Entity, EntityKind, Equipment, Fighter, Inventory, Level, RenderOrder,
    };
    use crate::world::tile::Tile;

    fn actor(name: &str, pos: GridPos, ai: Option<Ai>) -> Entity {
        Entity {
            pos,
            glyph: 'o',
            color: colors::WHITE,
            name: name.into(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(ActorParts {
                fighter: Fighter::new(10, 0, 3),
                inventory: Inventory::new(0),
                equipment: Equipment::new(),
                level: Level::reward(35),
                ai,
            }),
        }
    }

    struct Fixture {
        map: GameMap,
        entities: Entities,
        player: EntityId,
        monster: EntityId,
        config: GameConfig,
        rng: ChaCha8Rng,
        log: MessageLog,
    }

    fn fixture(player_pos: GridPos, monster_pos: GridPos) -> Fixture {
        let mut map = GameMap::new(20, 20);
        for y in 0..20 {
            for x in 0..20 {
                map.set_tile(GridPos::new(x, y), Tile::floor());
            }
        }
        let mut entities = Entities::new();
        let player = entities.insert(actor("Player", player_pos, Some(Ai::Player)));
        let monster = entities.insert(actor("Orc", monster_pos, Some(Ai::hostile())));
        map.place_entity(player);
        map.place_entity(monster);

        Fixture {
            map,
            entities,
            player,
            monster,
            config: GameConfig::default(),
            rng: ChaCha8Rng::seed_from_u64(42),
            log: MessageLog::new(),
        }
    }

    fn light_everything(map: &mut GameMap) {
        map.set_visible(vec![true; map.visible_len()]);
    }

    #[test]
    fn test_hostile_melees_when_adjacent() {
        let mut fx = fixture(GridPos::new(5, 5), GridPos::new(6, 5));
        light_everything(&mut fx.map);

        let (_, action) = Ai::hostile().advance(
            fx.monster,
            &fx.map,
            &fx.entities,
            fx.player,
            &fx.config,
            &mut fx.rng,
            &mut fx.log,
        );

        assert!(matches!(action, Some(Action::Melee { dx: -1, dy: 0 })));
    }

    #[test]
    fn test_hostile_chases_when_visible() {
        let mut fx = fixture(GridPos::new(5, 5), GridPos::new(10, 5));
        light_everything(&mut fx.map);

        let (next_ai, action) = Ai::hostile().advance(
            fx.monster,
            &fx.map,
            &fx.entities,
            fx.player,
            &fx.config,
            &mut fx.rng,
            &mut fx.log,
        );

        // First waypoint popped, remainder retained (4 tiles up to and
        // including the player's own).
        assert!(matches!(action, Some(Action::Move { dx: -1, dy: 0 })));
        match next_ai {
            Ai::Hostile { path } => assert_eq!(path.len(), 4),
            other => panic!("expected hostile, got {other:?}"),
        }
    }

    #[test]
    fn test_hostile_waits_when_blind_and_pathless() {
        let mut fx = fixture(GridPos::new(5, 5), GridPos::new(15, 15));
        // Nothing visible at all.
        fx.map.set_visible(vec![false; fx.map.visible_len()]);

        let (_, action) = Ai::hostile().advance(
            fx.monster,
            &fx.map,
            &fx.entities,
            fx.player,
            &fx.config,
            &mut fx.rng,
            &mut fx.log,
        );

        assert!(matches!(action, Some(Action::Wait)));
    }

    #[test]
    fn test_hostile_follows_stale_path_out_of_view() {
        let mut fx = fixture(GridPos::new(5, 5), GridPos::new(15, 15));
        fx.map.set_visible(vec![false; fx.map.visible_len()]);

        let stale = Ai::Hostile {
            path: vec![GridPos::new(14, 15), GridPos::new(13, 15)],
        };
        let (next_ai, action) = stale.advance(
            fx.monster,
            &fx.map,
            &fx.entities,
            fx.player,
            &fx.config,
            &mut fx.rng,
            &mut fx.log,
        );

        assert!(matches!(action, Some(Action::Move { dx: -1, dy: 0 })));
        match next_ai {
            Ai::Hostile { path } => assert_eq!(path, vec![GridPos::new(13, 15)]),
            other => panic!("expected hostile, got {other:?}"),
        }
    }

    #[test]
    fn test_confused_expiry_reverts_and_does_nothing() {
        let mut fx = fixture(GridPos::new(5, 5), GridPos::new(10, 5));

        let confused = Ai::confused(Ai::hostile(), 0);
        let (next_ai, action) = confused.advance(
            fx.monster,
            &fx.map,
            &fx.entities,
            fx.player,
            &fx.config,
            &mut fx.rng,
            &mut fx.log,
        );

        assert!(action.is_none());
        assert!(matches!(next_ai, Ai::Hostile { .. }));
        assert_eq!(fx.log.messages()[0].text, "The Orc is no longer confused.");
    }

    #[test]
    fn test_confused_bumps_randomly_and_counts_down() {
        let mut fx = fixture(GridPos::new(5, 5), GridPos::new(10, 5));

        let confused = Ai::confused(Ai::hostile(), 3);
        let (next_ai, action) = confused.advance(
            fx.monster,
            &fx.map,
            &fx.entities,
            fx.player,
            &fx.config,
            &mut fx.rng,
            &mut fx.log,
        );

        match action {
            Some(Action::Bump { dx, dy }) => {
                assert!(DIRECTIONS.contains(&(dx, dy)));
            }
            other => panic!("expected bump, got {other:?}"),
        }
        match next_ai {
            Ai::Confused {
                turns_remaining, ..
            } => assert_eq!(turns_remaining, 2),
            other => panic!("expected confused, got {other:?}"),
        }
    }
}
