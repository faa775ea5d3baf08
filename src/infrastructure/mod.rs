//! Infrastructure layer - Concrete implementations of the domain traits

pub mod cache;
pub mod derive;
pub mod document;
pub mod pipeline;
pub mod plugin;
pub mod render;
pub mod services;
