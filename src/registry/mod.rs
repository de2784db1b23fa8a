//! Registry data model and surface assembly.
//!
//! The decoder (`decode`) fills unordered all-enums/all-commands pools plus
//! the raw feature list; the resolver (`resolve`) filters those against a
//! target `Config`. Types here are the shared vocabulary between the two
//! plus the final, deterministically ordered `Registry` surface handed to
//! emission. Nothing outside this module may observe pool iteration order:
//! ordering exists only after `sort_enums`/`sort_commands` have run.

pub mod decode;
pub mod resolve;

use crate::types::CType;
use crate::version::Version;
use serde::Serialize;
use std::collections::HashMap;

/// Target configuration for one resolution pass. Always passed explicitly;
/// the resolver keeps no ambient state between calls.
#[derive(Clone, Debug)]
pub struct Config {
    /// API family identifier, e.g. `gl` or `gles2`.
    pub api: String,
    /// Highest feature version to include.
    pub version: Version,
    /// Profile scoping removal directives, e.g. `core`.
    pub profile: String,
    /// Apply profile-scoped removals unconditionally (core build mode).
    pub core: bool,
    /// Build-tag string passed through to the surface unchanged.
    pub tags: String,
    /// Package label passed through to the surface unchanged.
    pub package: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Param {
    pub ctype: CType,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Command {
    pub name: String,
    pub return_type: CType,
    pub params: Vec<Param>,
    /// Version of the last matching feature that required this command.
    /// Zero until the resolver stamps it; commands in a resolved surface are
    /// always stamped.
    pub version: Version,
}

/// One `<remove>` block inside a feature, optionally scoped to a profile.
#[derive(Clone, Debug, Default)]
pub struct Removal {
    pub profile: Option<String>,
    pub enums: Vec<String>,
    pub commands: Vec<String>,
}

impl Removal {
    /// Whether this removal applies under the given target. Core build mode
    /// applies every removal; otherwise an entry applies when unscoped or
    /// when its profile matches the target profile.
    pub fn applies(&self, cfg: &Config) -> bool {
        if cfg.core {
            return true;
        }
        match &self.profile {
            None => true,
            Some(profile) => *profile == cfg.profile,
        }
    }
}

/// One `<feature>` block, kept in document order. Require directives across
/// the block are merged; removals keep their per-block profile scoping.
#[derive(Clone, Debug, Default)]
pub struct FeatureBlock {
    pub api: String,
    pub name: String,
    pub number: Version,
    pub require_enums: Vec<String>,
    pub require_commands: Vec<String>,
    pub removals: Vec<Removal>,
}

/// Immutable decode output: the two all pools, normalized typedefs in
/// document order, and the raw feature list. Decoding filters enums by API
/// family, so the catalogue records which family it was built for.
#[derive(Debug, Default)]
pub struct RawCatalogue {
    pub api: String,
    pub enums: HashMap<String, String>,
    pub commands: HashMap<String, Command>,
    pub typedefs: Vec<String>,
    pub features: Vec<FeatureBlock>,
}

/// Final resolved surface for one target configuration. Enums and commands
/// are in the deterministic order produced by the assembler; typedefs keep
/// decode order.
#[derive(Debug, Serialize)]
pub struct Registry {
    pub api: String,
    pub version: Version,
    pub profile: String,
    pub tags: String,
    pub package: String,
    pub typedefs: Vec<String>,
    pub enums: Vec<EnumEntry>,
    pub commands: Vec<Command>,
}

/// Order enums by name. The input map is conceptually unordered; this sort
/// is the only source of output ordering.
pub fn sort_enums(pool: HashMap<String, String>) -> Vec<EnumEntry> {
    let mut enums: Vec<EnumEntry> = pool
        .into_iter()
        .map(|(name, value)| EnumEntry { name, value })
        .collect();
    enums.sort_by(|a, b| a.name.cmp(&b.name));
    enums
}

/// Order commands by introduced version, ties broken by name.
pub fn sort_commands(pool: HashMap<String, Command>) -> Vec<Command> {
    let mut commands: Vec<Command> = pool.into_values().collect();
    commands.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.name.cmp(&b.name)));
    commands
}
