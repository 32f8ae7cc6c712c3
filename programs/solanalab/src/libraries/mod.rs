pub mod full_math;

pub use full_math::*;
