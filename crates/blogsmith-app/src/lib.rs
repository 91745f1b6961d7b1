//! blogsmith-app - Application state and orchestration for Blogsmith
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: the body view machine, the progress simulator, the generation
//! and past-blog flows, form validation, export, configuration loading and
//! the Engine shared by the TUI and headless runners.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod export;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod progress;
pub mod signals;
pub mod state;
pub mod view;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use export::{Clipboard, MarkdownExport, Osc52Clipboard};
pub use handler::{Task, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use progress::ProgressSimulator;
pub use state::{AppState, FocusArea};
pub use view::{BodyState, ResultTab, ViewMachine};
