pub mod cli;
pub mod colour;
pub mod error;
pub mod format;
pub mod input;
pub mod render;
pub mod token;
pub mod tree;
