pub mod aggregate;
pub mod config;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod publish;
pub mod scoring;
pub mod source;
