pub mod line_selector;
pub mod td1;

pub use line_selector::LineSelector;
pub use td1::Td1Parser;
