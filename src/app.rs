#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::error;
use std::time::Duration;

use crate::Time;
use crate::clock::{GameClock, SoftDropTimer};
use crate::components::{GameState, Grid, Input, Position, Rgb, ShapeIds, ShapeRng};
use crate::config::Config;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::input::{InputSource, Intent};
use crate::systems::{self, active_shape, spawn_tetromino};
use crate::ui::Renderer;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// The game loop. Owns every piece of game state in its `World`.
pub struct App {
    pub world: World,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Grid::new(BOARD_WIDTH, BOARD_HEIGHT));
        world.insert_resource(GameState::default());
        world.insert_resource(GameClock::new(config.gravity_period()));
        world.insert_resource(SoftDropTimer::new(config.soft_drop_period()));
        world.insert_resource(ShapeIds::default());
        world.insert_resource(ShapeRng::new(config.seed));
        world.insert_resource(Input::default());

        let mut app = Self {
            world,
            should_quit: false,
        };

        // Spawn initial tetromino
        spawn_tetromino(&mut app.world);

        app
    }

    /// Time since the session started.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.world.resource::<Time>().elapsed()
    }

    /// Polls `input` and advances the game to the current wall time.
    pub fn frame(&mut self, input: &mut impl InputSource) -> AppResult<()> {
        let now = self.now();
        self.frame_at(input, now)
    }

    /// Polls `input` and advances the game to `now`.
    pub fn frame_at(&mut self, input: &mut impl InputSource, now: Duration) -> AppResult<()> {
        let intents = input.poll_intents()?;
        self.handle_intents(&intents);
        self.update(now);
        Ok(())
    }

    pub fn handle_intents(&mut self, intents: &[Intent]) {
        if intents.contains(&Intent::Quit) {
            self.should_quit = true;
        }
        systems::input_system(&mut self.world, intents);
    }

    /// Runs gravity and the soft drop against the clock reading `now`.
    pub fn update(&mut self, now: Duration) {
        systems::gravity_system(&mut self.world, now);
        systems::soft_drop_system(&mut self.world, now);
    }

    /// Feeds the renderer the board, the active shape, the score and, once
    /// the game is over, the game-over notice.
    pub fn draw(&mut self, renderer: &mut impl Renderer) {
        for (position, color) in self.get_render_blocks() {
            if let (Ok(row), Ok(col)) = (usize::try_from(position.y), usize::try_from(position.x)) {
                renderer.draw_cell(row, col, color);
            }
        }

        renderer.draw_score(self.score());

        if self.is_game_over() {
            renderer.draw_game_over();
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.world.resource::<GameState>().score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.world.resource::<GameState>().game_over
    }

    /// Every occupied cell on screen: the settled board plus the active
    /// shape.
    pub fn get_render_blocks(&mut self) -> Vec<(Position, Rgb)> {
        let mut blocks = Vec::new();

        {
            let grid = self.world.resource::<Grid>();
            for (y, row) in grid.rows().iter().enumerate() {
                for (x, cell) in row.iter().enumerate() {
                    if let Some(color) = cell {
                        blocks.push((
                            Position {
                                x: i32::try_from(x).unwrap_or(i32::MAX),
                                y: i32::try_from(y).unwrap_or(i32::MAX),
                            },
                            *color,
                        ));
                    }
                }
            }
        }

        if let Some((_, shape)) = active_shape(&mut self.world) {
            blocks.extend(
                shape
                    .absolute_cells()
                    .map(|(x, y)| (Position { x, y }, shape.color)),
            );
        }

        blocks
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
