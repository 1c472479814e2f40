//! Reusable UI widgets for HistOxide

mod category_checklist;
mod range_input;

pub use category_checklist::CategoryChecklist;
pub use range_input::RangeInput;
