//! Plugin infrastructure - Built-in plugins

mod builtin;

pub use builtin::{GfmPlugin, SmartPunctuationPlugin};
