#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod state;
pub mod style;
pub mod surface;
pub mod tools;

pub use app::SketchApp;
pub use command::{CommandOutcome, HistoryStack, ToolCommand};
pub use config::SketchConfig;
pub use error::{SketchError, SketchResult};
pub use input::InputEvent;
pub use state::{EditorContext, GestureState};
pub use style::Style;
pub use surface::{Snapshot, Surface};
pub use tools::{Mode, Shape, ToolStateMachine};
