//! Pure data structures shared by every component: tag identities and resources.

pub mod identity;
pub mod resource;

pub use identity::*;
pub use resource::*;
