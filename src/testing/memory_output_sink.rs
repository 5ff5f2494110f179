use crate::domain::AppError;
use crate::ports::OutputSink;

/// Output sink that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryOutputSink {
    emitted: Vec<(String, String)>,
}

impl MemoryOutputSink {
    pub fn emitted(&self) -> &[(String, String)] {
        &self.emitted
    }
}

impl OutputSink for MemoryOutputSink {
    fn emit(&mut self, outputs: &[(String, String)]) -> Result<(), AppError> {
        self.emitted.extend_from_slice(outputs);
        Ok(())
    }
}
