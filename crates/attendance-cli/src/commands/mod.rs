pub mod attend;
pub mod config;
pub mod report;
pub mod routine;

/// Render a percentage with its health band, e.g. `82% (Good)`.
pub fn percent_label(percentage: u8) -> String {
    format!("{percentage}% ({})", attendance_core::classify(percentage))
}
