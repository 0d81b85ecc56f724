pub mod catalog;
pub mod geometry;
pub mod icons;
pub mod model;
pub mod reducer;
pub mod registry;

pub use catalog::{open_request, BuiltinCatalog};
pub use model::*;
pub use reducer::{reduce_session, SessionAction, SessionEffect, SessionError};
pub use registry::SessionRegistry;
