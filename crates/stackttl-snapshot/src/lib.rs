pub mod load;
pub mod wire;

pub use load::*;
pub use wire::*;
