pub mod candidate;
pub mod line;
pub mod sample;

pub use candidate::*;
pub use line::*;
pub use sample::*;
