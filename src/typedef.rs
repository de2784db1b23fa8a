//! Typedef normalization.
//!
//! Registry typedefs for scalar GL types are written against the
//! `khronos_*` naming convention from `KHR/khrplatform.h`. Generated headers
//! should not pull in that header, so every `khronos_*` token is rewritten
//! to the ordinary `<stdint.h>` equivalent. The rewrite is purely textual:
//! only the token itself changes, everything around it is preserved.

use crate::error::RegistryError;

const PREFIX: &str = "khronos_";

fn substitute(suffix: &str) -> Result<&'static str, RegistryError> {
    Ok(match suffix {
        "int8_t" => "int8_t",
        "uint8_t" => "uint8_t",
        "int16_t" => "int16_t",
        "uint16_t" => "uint16_t",
        "int32_t" => "int32_t",
        "uint32_t" => "uint32_t",
        "int64_t" => "int64_t",
        "uint64_t" => "uint64_t",
        "intptr_t" => "intptr_t",
        "uintptr_t" => "uintptr_t",
        "float_t" => "float",
        "ssize_t" => "intptr_t",
        "usize_t" => "uintptr_t",
        _ => return Err(RegistryError::UnknownTypeFamily(suffix.to_string())),
    })
}

/// Rewrite every `khronos_*` token in a raw typedef string to its
/// fixed-width equivalent. Unknown token families are fatal: passing one
/// through would produce a header that cannot compile without
/// `khrplatform.h`. Output never contains the prefix, so normalizing twice
/// is a no-op.
pub fn normalize_typedef(raw: &str) -> Result<String, RegistryError> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(k) = rest.find(PREFIX) {
        out.push_str(&rest[..k]);
        let after = &rest[k + PREFIX.len()..];
        let end = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        out.push_str(substitute(&after[..end])?);
        rest = &after[end..];
    }
    out.push_str(rest);
    Ok(out)
}
