pub mod format;
pub mod output;

pub use format::format_verse;
pub use output::{write_to_file, SaveError};
