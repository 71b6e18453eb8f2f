// Tokenization: the pluggable capability shared by vocabulary compilation
// and document matching.

pub mod pretrained;
pub mod traits;
pub mod words;
