// Vocabulary: category phrase lists, the CSV loader, and the compiler that
// turns them into token matchers.

pub mod compiler;
pub mod loader;
pub mod types;
