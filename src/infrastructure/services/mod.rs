//! Service layer - The exposed artifact API

mod artifact_service;

pub use artifact_service::{ArtifactServiceConfig, MarkdownArtifactService};
