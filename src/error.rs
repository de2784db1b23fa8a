//! Error taxonomy for registry decoding and resolution.
//!
//! Every failure in the core pipeline is fatal and surfaces as one of these
//! variants; nothing is downgraded to a warning. The registry document is
//! assumed internally consistent, so integrity problems (duplicate enums,
//! dangling feature references) abort the whole run rather than producing a
//! silently incomplete surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Malformed or truncated XML, or a structural element the decoder
    /// cannot make sense of (e.g. a command without a name).
    #[error("malformed registry document: {0}")]
    Decode(String),

    #[error("registry XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The same enum name declared twice within the all-enums pool after
    /// API-family filtering.
    #[error("duplicate enum {name} in registry")]
    DuplicateEnum { name: String },

    /// A feature directive referenced an enum absent from the all-enums pool.
    #[error("feature {feature} references unknown enum {name}")]
    MissingEnum { feature: String, name: String },

    /// A feature directive referenced a command absent from the all-commands
    /// pool.
    #[error("feature {feature} references unknown command {name}")]
    MissingCommand { feature: String, name: String },

    /// A typedef referenced a `khronos_*` token with no known fixed-width
    /// equivalent.
    #[error("unknown khronos type family khronos_{0}")]
    UnknownTypeFamily(String),

    #[error("invalid version '{0}': expected MAJOR or MAJOR.MINOR")]
    InvalidVersion(String),

    /// A catalogue decoded for one API family was handed to a resolver
    /// configured for another.
    #[error("catalogue was decoded for api '{decoded}' but the target config requests '{requested}'")]
    ApiMismatch { decoded: String, requested: String },
}
