mod history_calculator;
mod history_model;

pub use history_calculator::summarize_history;
pub use history_model::HistorySummary;
