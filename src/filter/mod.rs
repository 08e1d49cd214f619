mod text;
mod years;

pub use text::{filter_by_text, searchable_text};
pub use years::aggregate_by_year;
