// MAZE
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod grid;
pub mod maze;
pub mod render;
pub mod shape;
pub mod terminal_ui;
