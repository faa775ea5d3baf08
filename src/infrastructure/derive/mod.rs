//! Artifact derivers - Pure readers of the frozen canonical tree

mod excerpt;
mod headings;
mod stats;
mod toc;

pub use excerpt::{DEFAULT_EXCERPT_LENGTH, ELLIPSIS, excerpt_source, prune};
pub use headings::{collect_headings, filter_by_depth};
pub use stats::{AVERAGE_WORDS_PER_MINUTE, time_to_read, word_count};
pub use toc::table_of_contents;
