//! Defines structures and types for progress reporting.

/// Represents a snapshot of the progress during a long-running operation.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// A description of the current stage (e.g., "Downloading Torah data").
    pub stage_description: String,
    /// Number of items (bytes, books, ...) processed in the current stage.
    pub current_item: u64,
    /// Total number of items expected in the current stage (if calculable).
    pub total_items: Option<u64>,
    /// An optional message providing more context (e.g., "Loading Genesis").
    pub message: Option<String>,
}

impl ProgressUpdate {
    /// Creates a new progress update for the start of a stage.
    pub fn new_stage(description: String, total_items: Option<u64>) -> Self {
        ProgressUpdate {
            stage_description: description,
            current_item: 0,
            total_items,
            message: None,
        }
    }
}

/// Type alias for the progress callback function.
///
/// The callback receives a `ProgressUpdate` and should return `true` to
/// continue the operation, or `false` to request cancellation (cancellation
/// support is not yet implemented in the caller).
pub type ProgressCallback = Box<dyn FnMut(ProgressUpdate) -> bool + Send + Sync>;

/// Invokes the reporter if one is present.
pub(crate) fn report(reporter: &mut Option<ProgressCallback>, update: ProgressUpdate) {
    if let Some(callback) = reporter.as_mut() {
        let _ = callback(update);
    }
}
