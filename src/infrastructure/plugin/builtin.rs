//! Built-in plugins
//!
//! Parser-extension-only plugins that ship with the crate. They contribute
//! grammar but neither mutate source nor transform trees.

use crate::domain::plugin::{MarkdownPlugin, ParserExtension};

/// Enables the GitHub-flavored extensions: tables, strikethrough, and task
/// lists
#[derive(Debug, Clone, Default)]
pub struct GfmPlugin;

impl GfmPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownPlugin for GfmPlugin {
    fn name(&self) -> &str {
        "gfm"
    }

    fn parser_extensions(&self) -> Vec<ParserExtension> {
        vec![
            ParserExtension::Tables,
            ParserExtension::Strikethrough,
            ParserExtension::TaskLists,
        ]
    }
}

/// Enables typographic replacements (curly quotes, dashes, ellipses)
#[derive(Debug, Clone, Default)]
pub struct SmartPunctuationPlugin;

impl SmartPunctuationPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownPlugin for SmartPunctuationPlugin {
    fn name(&self) -> &str {
        "smart-punctuation"
    }

    fn parser_extensions(&self) -> Vec<ParserExtension> {
        vec![ParserExtension::SmartPunctuation]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_are_distinct() {
        assert_ne!(GfmPlugin::new().name(), SmartPunctuationPlugin::new().name());
    }

    #[test]
    fn test_builtins_declare_no_hooks() {
        let gfm = GfmPlugin::new();
        assert!(gfm.source_mutator().is_none());
        assert!(gfm.tree_transformer().is_none());
        assert_eq!(gfm.parser_extensions().len(), 3);
    }
}
