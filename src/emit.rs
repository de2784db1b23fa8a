//! Surface emission.
//!
//! Renders a resolved [`Registry`] as a self-contained C header (typedefs,
//! enum defines, function-pointer declarations) and, on request, as a JSON
//! dump for downstream tooling. Output is a pure function of the registry:
//! the same surface always produces byte-identical text.

use crate::registry::{Command, Registry};
use anyhow::{Context, Result};
use std::io::Write;

/// Write the C header for a resolved surface.
pub fn write_header<W: Write>(out: &mut W, registry: &Registry) -> Result<()> {
    writeln!(
        out,
        "/* Generated by glgen for {} {}{}. Do not edit. */",
        registry.api,
        registry.version,
        profile_note(&registry.profile)
    )?;
    writeln!(out, "#ifndef __glgen_{}_h_", registry.package)?;
    writeln!(out, "#define __glgen_{}_h_", registry.package)?;
    writeln!(out)?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out, "#include <stddef.h>")?;
    writeln!(out)?;
    writeln!(out, "#ifndef APIENTRY")?;
    writeln!(out, "#define APIENTRY")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "extern \"C\" {{")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;

    for typedef in &registry.typedefs {
        writeln!(out, "{typedef}")?;
    }
    writeln!(out)?;

    for entry in &registry.enums {
        writeln!(out, "#define {} {}", entry.name, entry.value)?;
    }
    writeln!(out)?;

    for command in &registry.commands {
        let pfn = pfn_name(command);
        writeln!(
            out,
            "typedef {} (APIENTRY *{})({});",
            command.return_type,
            pfn,
            param_list(command)
        )?;
        writeln!(out, "extern {} {};", pfn, command.name)?;
    }
    writeln!(out)?;

    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "#endif")?;
    Ok(())
}

/// Write the resolved surface as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, registry: &Registry) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, registry).context("serializing resolved surface")?;
    writeln!(out)?;
    Ok(())
}

fn pfn_name(command: &Command) -> String {
    format!("PFN{}PROC", command.name.to_uppercase())
}

fn param_list(command: &Command) -> String {
    if command.params.is_empty() {
        return "void".to_string();
    }
    command
        .params
        .iter()
        .map(|param| format!("{} {}", param.ctype, param.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn profile_note(profile: &str) -> String {
    if profile.is_empty() {
        String::new()
    } else {
        format!(" ({profile} profile)")
    }
}
