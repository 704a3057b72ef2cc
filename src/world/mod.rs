pub mod site;
pub mod spatial;
pub mod world;

pub use site::{Food, Nest};
pub use spatial::{EntityId, EntityKind, SpatialIndex};
pub use world::World;
