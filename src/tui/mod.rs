//! The terminal user interface.
//!
//! State lives in [`app::App`] and the per-screen types; nothing here does
//! I/O except [`terminal`], which drives the event loop, and [`tasks`],
//! which runs background work.

pub mod app;
pub mod dashboard;
pub mod fields;
pub mod keys;
pub mod settings_screen;
pub mod tasks;
pub mod terminal;
pub mod theme;
