//! The visualiser engine: projection, scene, render loop and interaction.

pub mod assets;
pub mod camera;
pub mod core;
pub mod loading;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod scene;
pub mod systems;
