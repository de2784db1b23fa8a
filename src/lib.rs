//! OpenGL registry binding generator.
//!
//! The pipeline is a single synchronous pass: the streaming decoder
//! ([`decode_registry`]) reads the Khronos XML registry into an immutable
//! [`RawCatalogue`] (all-enums pool, all-commands pool, normalized typedefs,
//! raw feature list), the resolver ([`resolve`]) filters that catalogue
//! against an explicit target [`Config`], and the assembled [`Registry`]
//! surface is handed to emission ([`emit`]). Resolution either completes or
//! fails with a [`RegistryError`]; there are no partial results.
//!
//! Re-resolving another version or profile of the same API family reuses
//! one catalogue; another family needs its own decode, because enum
//! declarations are family-filtered at decode time.

pub mod emit;
pub mod error;
pub mod fetch;
pub mod registry;
pub mod typedef;
pub mod types;
pub mod version;

pub use error::RegistryError;
pub use registry::decode::decode_registry;
pub use registry::resolve::resolve;
pub use registry::{Command, Config, EnumEntry, Param, RawCatalogue, Registry};
pub use typedef::normalize_typedef;
pub use types::CType;
pub use version::Version;

/// Decode and resolve in one step for a single target configuration.
pub fn generate(xml: &str, config: &Config) -> Result<Registry, RegistryError> {
    let catalogue = decode_registry(xml, &config.api)?;
    resolve(&catalogue, config)
}
