pub mod types;

pub mod bbox;
pub mod dash;
pub mod flatten;
pub mod scene;
pub mod trace;
