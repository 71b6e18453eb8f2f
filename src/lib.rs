// phrasefreq: per-category phrase frequency counts for document collections.
//
// This is the library root. The counting core is `vocabulary` (compile phrase
// lists into matchers) plus `engine` (stream a document through them). The
// other modules are the I/O around it: document discovery and extraction,
// result files, configuration, and the batch driver.

pub mod config;
pub mod documents;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod tokenize;
pub mod vocabulary;
