//! Core types for the Steam app inventory: the app record model and
//! readers for Valve's KeyValues (VDF) formats.

pub mod app;
pub mod appinfo;
pub mod binary;
pub mod error;
pub mod keyvalues;
pub mod text;

pub use app::{AntiCheatRuntimes, AppRecord, AppType, RuntimeType, ShortcutInfo};
pub use error::VdfError;
pub use keyvalues::{KeyValues, Value};
