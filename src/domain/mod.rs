//! Transport-agnostic core: user model, registry, and store port.
//!
//! Nothing in this module knows about HTTP. Inbound adapters translate
//! domain failures into wire envelopes; the outbound adapter owns the
//! registry and serialises access to it.

pub mod error;
pub mod ports;
pub mod registry;
pub mod user;

pub use self::error::UserStoreError;
pub use self::ports::UserStore;
pub use self::registry::UserRegistry;
pub use self::user::{
    EmailAddress, NewUser, User, UserId, UserName, UserPatch, UserValidationError,
};
