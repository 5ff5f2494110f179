use crate::domain::AppError;

/// Destination for named workflow output variables.
pub trait OutputSink {
    /// Publish `outputs` in order. Values must be single-line.
    fn emit(&mut self, outputs: &[(String, String)]) -> Result<(), AppError>;
}
