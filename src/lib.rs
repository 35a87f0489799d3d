//! Render states and procedural meshes for the 3D playfield of a
//! BT/FX/laser rhythm game.

pub mod assets;
pub mod config;
pub mod core;
pub mod game;
