pub mod app;
pub mod clock;
pub mod components;
pub mod config;
pub mod game;
pub mod input;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

pub use clock::Time;
