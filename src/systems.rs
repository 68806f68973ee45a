use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::clock::{GameClock, SoftDropTimer};
use crate::components::{GameState, Grid, Input, Shape, ShapeIds, ShapeRng};
use crate::input::Intent;

/// Spawns a random shape at the spawn point. If it does not fit there the
/// game is over, and the shape stays where it is so the final board can
/// still be drawn.
pub fn spawn_tetromino(world: &mut World) -> Entity {
    let shape = world.resource_scope(|world, mut rng: Mut<ShapeRng>| {
        let mut ids = world.resource_mut::<ShapeIds>();
        Shape::spawn(&mut ids, &mut rng)
    });

    let blocked = shape.collides(world.resource::<Grid>(), 0, 0);
    debug!(
        "Spawned shape {} at ({}, {})",
        shape.id, shape.root.x, shape.root.y
    );

    let entity = world.spawn(shape).id();

    if blocked {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.end();
        info!("Game over with {} rows cleared", game_state.score);
    }

    entity
}

/// The falling shape, if any.
pub fn active_shape(world: &mut World) -> Option<(Entity, Shape)> {
    let mut query = world.query::<(Entity, &Shape)>();
    query
        .iter(world)
        .next()
        .map(|(entity, shape)| (entity, shape.clone()))
}

// Applies `action` to a copy of the active shape and writes it back if the
// action reports a change
fn update_active_shape(world: &mut World, action: impl FnOnce(&mut Shape, &Grid) -> bool) -> bool {
    let Some((entity, mut shape)) = active_shape(world) else {
        return false;
    };

    let changed = action(&mut shape, world.resource::<Grid>());
    if changed {
        world.entity_mut(entity).insert(shape);
    }
    changed
}

/// Applies player intents to the active shape. Everything is ignored once
/// the game is over.
pub fn input_system(world: &mut World, intents: &[Intent]) {
    if world.resource::<GameState>().game_over {
        return;
    }

    for intent in intents {
        match *intent {
            Intent::MoveLeft => {
                let moved = update_active_shape(world, |shape, grid| {
                    shape.move_if_possible(grid, -1, 0)
                });
                debug!("Move left (moved: {moved})");
            }
            Intent::MoveRight => {
                let moved = update_active_shape(world, |shape, grid| {
                    shape.move_if_possible(grid, 1, 0)
                });
                debug!("Move right (moved: {moved})");
            }
            Intent::RotateCw => {
                let rotated =
                    update_active_shape(world, |shape, grid| shape.rotate_if_possible(grid));
                debug!("Rotate (rotated: {rotated})");
            }
            Intent::SoftDropHeld(held) => {
                world.resource_mut::<Input>().soft_drop_held = held;
            }
            Intent::Quit => {}
        }
    }
}

/// Moves the active shape down once per gravity tick.
pub fn gravity_system(world: &mut World, now: Duration) {
    if world.resource::<GameState>().game_over {
        return;
    }

    if !world.resource_mut::<GameClock>().advance(now) {
        return;
    }

    trace!("Gravity tick at {now:?}");
    step_down(world);
}

/// While the soft-drop key is held, moves the active shape down at the
/// soft-drop rate. A soft drop never locks the shape; that is left to gravity.
pub fn soft_drop_system(world: &mut World, now: Duration) {
    if world.resource::<GameState>().game_over || !world.resource::<Input>().soft_drop_held {
        return;
    }

    if !world.resource_mut::<SoftDropTimer>().ready(now) {
        return;
    }

    let moved = update_active_shape(world, |shape, grid| shape.move_if_possible(grid, 0, 1));
    trace!("Soft drop (moved: {moved})");
}

/// One gravity step: fall by a row, or lock, clear lines and spawn the next
/// shape when the row below is blocked.
pub fn step_down(world: &mut World) {
    let Some((entity, mut shape)) = active_shape(world) else {
        debug!("No active shape, spawning a new one");
        spawn_tetromino(world);
        return;
    };

    if shape.move_if_possible(world.resource::<Grid>(), 0, 1) {
        world.entity_mut(entity).insert(shape);
    } else {
        handle_piece_lock(world, entity, shape);
    }
}

fn handle_piece_lock(world: &mut World, entity: Entity, shape: Shape) {
    debug!("Locking shape {} at ({}, {})", shape.id, shape.root.x, shape.root.y);

    world.despawn(entity);

    let lines_cleared = {
        let mut grid = world.resource_mut::<Grid>();
        shape.lock_into(&mut grid);
        grid.clear_full_rows()
    };

    if lines_cleared > 0 {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.add_cleared_rows(lines_cleared);
        info!(
            "Cleared {lines_cleared} rows (score: {})",
            game_state.score
        );
    }

    spawn_tetromino(world);
}
