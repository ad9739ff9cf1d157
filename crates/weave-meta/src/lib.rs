//! Collaborator contracts consumed by the synthesizer.
//!
//! The synthesizer depends on two read-only services: type introspection
//! (simple names and declared methods) and plural naming. This crate defines
//! both contracts and ships in-memory implementations that the CLI and the
//! tests use.
//!
//! - [`introspect`]: `TypeIntrospection` and `MethodHandle`
//! - [`registry`]: `MemberRegistry`, a table-backed `TypeIntrospection`
//! - [`naming`]: `NamingService`, `PluralRegistry`, lazy `PluralName`

pub mod introspect;
pub mod naming;
pub mod registry;

pub use introspect::{MethodHandle, TypeIntrospection};
pub use naming::{default_plural, NamingService, NoPlurals, PluralName, PluralRegistry};
pub use registry::{MemberRegistry, TypeDetails};
