pub mod api;
pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod personas;
pub mod render;
pub mod submission;
pub mod tea;
pub mod text_field;
pub mod tone;
pub mod ui;

pub use app::App;
pub use error::{KoiFoxError, KoiFoxResult};
