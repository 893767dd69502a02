pub mod animation;
pub mod config;
pub mod math;
pub mod painting;
pub mod parts;
pub mod robot;
pub mod scene_graph;
pub mod stage;
