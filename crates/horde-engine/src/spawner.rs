//! Scenario spawner for seeding the demo world.
//!
//! Lays out a grid of square blocks, then scatters survivors, zombies, and
//! resource piles across them. Placement is drawn from a generator seeded
//! with `world.seed`, so the same configuration always yields the same
//! layout (entity IDs aside).

use horde_core::config::{ScenarioConfig, WorldConfig};
use horde_types::{BlockId, Bounds, EntityClass, EntityId, Vec2};
use horde_world::GridWorld;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EngineError;

/// Distance kept between a spawn point and its block's edge.
const SPAWN_MARGIN: f32 = 0.5;

/// The spawned world and who is in it.
#[derive(Debug)]
pub struct Scenario {
    /// The populated world.
    pub world: GridWorld,
    /// Blocks in layout order (row-major).
    pub blocks: Vec<(BlockId, Bounds)>,
    /// Spawned survivors.
    pub survivors: Vec<EntityId>,
    /// Spawned zombies.
    pub zombies: Vec<EntityId>,
    /// Spawned resource piles.
    pub piles: Vec<EntityId>,
}

/// Build the block grid and populate it.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if the grid is empty or the blocks are
/// too small to place anything in, and [`EngineError::World`] if the world
/// rejects a block or entity.
pub fn spawn_scenario(
    world_config: &WorldConfig,
    scenario: &ScenarioConfig,
) -> Result<Scenario, EngineError> {
    if world_config.blocks_x == 0 || world_config.blocks_y == 0 {
        return Err(EngineError::Spawner {
            message: format!(
                "block grid {}x{} is empty",
                world_config.blocks_x, world_config.blocks_y
            ),
        });
    }
    let size = world_config.block_size;
    if !size.is_finite() || size <= SPAWN_MARGIN * 4.0 {
        return Err(EngineError::Spawner {
            message: format!("block size {size} leaves no room to spawn"),
        });
    }

    let mut world = GridWorld::new();
    let mut blocks = Vec::new();
    let mut y = 0.0_f32;
    for _ in 0..world_config.blocks_y {
        let mut x = 0.0_f32;
        for _ in 0..world_config.blocks_x {
            let bounds = Bounds::new(Vec2::new(x, y), Vec2::new(x + size, y + size));
            blocks.push((world.add_block(bounds)?, bounds));
            x += size;
        }
        y += size;
    }

    let mut rng = StdRng::seed_from_u64(world_config.seed);
    let mut spawn = |world: &mut GridWorld, class: EntityClass, count: u32, health: f32| {
        (0..count)
            .map(|_| {
                let position = random_point(&mut rng, &blocks);
                world.spawn_human(class, position, health)
            })
            .collect::<Result<Vec<_>, _>>()
    };
    let survivors = spawn(
        &mut world,
        EntityClass::Survivor,
        scenario.survivors,
        scenario.survivor_health,
    )?;
    let zombies = spawn(
        &mut world,
        EntityClass::Zombie,
        scenario.zombies,
        scenario.zombie_health,
    )?;

    let piles = (0..scenario.resource_piles)
        .map(|_| {
            let position = random_point(&mut rng, &blocks);
            world.spawn_resource(EntityClass::ResourcePile, position, scenario.pile_units)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scenario {
        world,
        blocks,
        survivors,
        zombies,
        piles,
    })
}

/// A uniformly random point inside a uniformly random block.
fn random_point<R: Rng>(rng: &mut R, blocks: &[(BlockId, Bounds)]) -> Vec2 {
    let Some((_, bounds)) = blocks.get(rng.random_range(0..blocks.len().max(1))) else {
        return Vec2::ZERO;
    };
    Vec2::new(
        rng.random_range((bounds.min.x + SPAWN_MARGIN)..(bounds.max.x - SPAWN_MARGIN)),
        rng.random_range((bounds.min.y + SPAWN_MARGIN)..(bounds.max.y - SPAWN_MARGIN)),
    )
}
