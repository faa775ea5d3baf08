//! Render infrastructure - Tree to HTML, and HTML back to plain text

mod html;
mod text;

pub use html::HtmlRenderer;
pub use text::html_to_text;
