pub mod deploy;
pub mod discover;
pub mod render;
