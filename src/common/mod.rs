//! Small value types shared across the crate.

mod file_info;
mod font_size;

pub use file_info::FileInfo;
pub use font_size::FontSize;
