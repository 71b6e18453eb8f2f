// Matching engine: chunking, per-category counting, and the result type.

pub mod chunker;
pub mod counts;
pub mod matching;
