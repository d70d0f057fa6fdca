//! vimplug compiler
//!
//! Reads a JSON plugin list and generates a vim-plug based vim setup:
//! a startup script declaring every plugin and a hotkey map collecting
//! each plugin's key bindings.

pub mod driver;
pub mod error;
pub mod codegen;
pub mod layout;
pub mod manifest;
pub mod templates;

pub use driver::{Compiler, CompileOptions, CompileOutput};
pub use error::{CompileError, Result};
pub use codegen::{CodeGenerator, CompiledOutput};
pub use layout::{OutputLayout, WrittenFiles};
pub use manifest::{Hotkeys, PluginEntry, PluginOptions, PluginSpec};
