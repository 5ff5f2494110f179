mod fake_review_query;
mod memory_output_sink;

pub use fake_review_query::FakeReviewQuery;
pub use memory_output_sink::MemoryOutputSink;
