//! Feature resolution.
//!
//! Walks the decoded feature blocks in document order and merges their
//! require/remove directives into working enum and command sets, gated by
//! the target API family, version and profile. Any directive that names an
//! entity missing from the all pools aborts the whole resolution; there is
//! no partial result.
//!
//! A command's recorded version is overwritten by every matching require,
//! so the last matching feature at or below the target version wins.
//! Registry documents declare features in ascending version order and that
//! order is trusted here, not re-checked.

use crate::error::RegistryError;
use crate::registry::{Command, Config, RawCatalogue, Registry, sort_commands, sort_enums};
use std::collections::HashMap;
use tracing::trace;

/// Resolve one target configuration against a decoded catalogue and
/// assemble the deterministic surface.
pub fn resolve(catalogue: &RawCatalogue, config: &Config) -> Result<Registry, RegistryError> {
    if catalogue.api != config.api {
        return Err(RegistryError::ApiMismatch {
            decoded: catalogue.api.clone(),
            requested: config.api.clone(),
        });
    }

    let mut enums: HashMap<String, String> = HashMap::new();
    let mut commands: HashMap<String, Command> = HashMap::new();

    for feature in &catalogue.features {
        if feature.api != config.api {
            continue;
        }
        if feature.number > config.version {
            continue;
        }

        for name in &feature.require_enums {
            let value = catalogue
                .enums
                .get(name)
                .ok_or_else(|| RegistryError::MissingEnum {
                    feature: feature.name.clone(),
                    name: name.clone(),
                })?;
            enums.insert(name.clone(), value.clone());
        }
        for name in &feature.require_commands {
            let mut command =
                catalogue
                    .commands
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RegistryError::MissingCommand {
                        feature: feature.name.clone(),
                        name: name.clone(),
                    })?;
            command.version = feature.number;
            commands.insert(name.clone(), command);
        }

        for removal in &feature.removals {
            if !removal.applies(config) {
                continue;
            }
            for name in &removal.enums {
                if !catalogue.enums.contains_key(name) {
                    return Err(RegistryError::MissingEnum {
                        feature: feature.name.clone(),
                        name: name.clone(),
                    });
                }
                // Absent from the working set is a no-op, not an error.
                enums.remove(name);
            }
            for name in &removal.commands {
                if !catalogue.commands.contains_key(name) {
                    return Err(RegistryError::MissingCommand {
                        feature: feature.name.clone(),
                        name: name.clone(),
                    });
                }
                commands.remove(name);
            }
        }

        trace!(
            feature = %feature.name,
            enums = enums.len(),
            commands = commands.len(),
            "merged feature"
        );
    }

    Ok(Registry {
        api: config.api.clone(),
        version: config.version,
        profile: config.profile.clone(),
        tags: config.tags.clone(),
        package: config.package.clone(),
        typedefs: catalogue.typedefs.clone(),
        enums: sort_enums(enums),
        commands: sort_commands(commands),
    })
}
