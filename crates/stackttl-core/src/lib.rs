pub mod clock;
pub mod evaluator;
pub mod ids;
pub mod model;
pub mod outcomes;
pub mod routine;
pub mod ttl;

pub use clock::*;
pub use evaluator::*;
pub use ids::*;
pub use model::*;
pub use outcomes::*;
pub use routine::*;
pub use ttl::*;
