//! Pipeline infrastructure - Parser, plugin phases, and tree construction

mod parser;
mod pipeline;
mod tree_builder;

pub use parser::MarkdownSourceParser;
pub use pipeline::{PipelineConfig, PluginPipeline};
pub use tree_builder::TreeBuilder;
