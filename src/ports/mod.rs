mod output_sink;
mod review_query;

pub use output_sink::OutputSink;
pub use review_query::ReviewQuery;
