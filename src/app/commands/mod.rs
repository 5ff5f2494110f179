pub mod pull_request;
