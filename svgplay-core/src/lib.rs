pub mod color;
pub mod document;
pub mod error;
pub mod instruction;
pub mod number;
pub mod player;
pub mod resolver;
pub mod style;
pub mod tokenizer;
pub mod transform;
