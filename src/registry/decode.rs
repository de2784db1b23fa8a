//! Streaming decoder for the XML registry document.
//!
//! One forward pass, no backtracking. Only four element kinds are
//! understood: `<types>`, `<enums>`, `<commands>` and `<feature>`; anything
//! else (comments, groups, extensions) is skipped wholesale. The decoder
//! returns a complete [`RawCatalogue`] or an error; callers never see a
//! partially filled catalogue.
//!
//! Enum declarations carrying an `api` tag for a different family are
//! dropped before they reach the pool, which is why a catalogue is bound to
//! the family it was decoded for. Feature blocks are kept raw and in
//! document order; all gating happens later in the resolver.

use crate::error::RegistryError;
use crate::registry::{Command, FeatureBlock, Param, RawCatalogue, Removal};
use crate::typedef::normalize_typedef;
use crate::types::{CType, sanitize_param_name};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use tracing::debug;

/// Decode the full registry document for one API family.
pub fn decode_registry(xml: &str, api: &str) -> Result<RawCatalogue, RegistryError> {
    let mut reader = Reader::from_str(xml);
    let mut catalogue = RawCatalogue {
        api: api.to_string(),
        ..RawCatalogue::default()
    };

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"registry" => {}
                b"types" => decode_types(&mut reader, &mut catalogue)?,
                b"enums" => decode_enums(&mut reader, &mut catalogue)?,
                b"commands" => decode_commands(&mut reader, &mut catalogue)?,
                b"feature" => decode_feature(&mut reader, &e, &mut catalogue)?,
                _ => skip_element(&mut reader, &e)?,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(
        api,
        enums = catalogue.enums.len(),
        commands = catalogue.commands.len(),
        typedefs = catalogue.typedefs.len(),
        features = catalogue.features.len(),
        "decoded registry"
    );
    Ok(catalogue)
}

fn decode_types(
    reader: &mut Reader<&[u8]>,
    catalogue: &mut RawCatalogue,
) -> Result<(), RegistryError> {
    let mut text = String::new();
    let mut in_type = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"type" => {
                    // khrplatform's own block is supplied by that header and
                    // excluded entirely.
                    if attr(&e, "name")?.as_deref() == Some("khrplatform") {
                        skip_element(reader, &e)?;
                    } else {
                        in_type = true;
                        text.clear();
                    }
                }
                b"apientry" if in_type => text.push_str("APIENTRY"),
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"apientry" && in_type {
                    text.push_str("APIENTRY");
                }
            }
            Event::Text(t) => {
                if in_type {
                    text.push_str(&unescape_text(&t)?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"type" if in_type => {
                    catalogue.typedefs.push(normalize_typedef(&text)?);
                    text.clear();
                    in_type = false;
                }
                b"types" => return Ok(()),
                _ => {}
            },
            Event::Eof => return Err(truncated("types")),
            _ => {}
        }
    }
}

fn decode_enums(
    reader: &mut Reader<&[u8]>,
    catalogue: &mut RawCatalogue,
) -> Result<(), RegistryError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref() != b"enum" {
                    continue;
                }
                let name = attr(&e, "name")?
                    .ok_or_else(|| malformed("enum declaration without a name"))?;
                let value = attr(&e, "value")?
                    .ok_or_else(|| malformed(format!("enum {name} without a value")))?;
                if let Some(api) = attr(&e, "api")? {
                    if api != catalogue.api {
                        continue;
                    }
                }
                if catalogue.enums.insert(name.clone(), value).is_some() {
                    return Err(RegistryError::DuplicateEnum { name });
                }
            }
            Event::End(e) if e.name().as_ref() == b"enums" => return Ok(()),
            Event::Eof => return Err(truncated("enums")),
            _ => {}
        }
    }
}

fn decode_commands(
    reader: &mut Reader<&[u8]>,
    catalogue: &mut RawCatalogue,
) -> Result<(), RegistryError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"command" => {
                    let command = decode_command(reader)?;
                    catalogue.commands.insert(command.name.clone(), command);
                }
                _ => skip_element(reader, &e)?,
            },
            Event::End(e) if e.name().as_ref() == b"commands" => return Ok(()),
            Event::Eof => return Err(truncated("commands")),
            _ => {}
        }
    }
}

fn decode_command(reader: &mut Reader<&[u8]>) -> Result<Command, RegistryError> {
    let mut name = String::new();
    let mut return_type = None;
    let mut params = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"proto" => {
                    let (ctype, proto_name) = decode_signature(reader, b"proto")?;
                    return_type = Some(ctype);
                    name = proto_name;
                }
                b"param" => {
                    let (ctype, param_name) = decode_signature(reader, b"param")?;
                    params.push(Param {
                        ctype,
                        name: sanitize_param_name(&param_name),
                    });
                }
                // alias, glx, vecequiv and friends
                _ => skip_element(reader, &e)?,
            },
            Event::End(e) if e.name().as_ref() == b"command" => break,
            Event::Eof => return Err(truncated("command")),
            _ => {}
        }
    }
    let return_type = return_type.ok_or_else(|| malformed("command without a prototype"))?;
    Ok(Command {
        name,
        return_type,
        params,
        version: Default::default(),
    })
}

/// Decode a `<proto>` or `<param>` body: character data around the `<ptype>`
/// and `<name>` children carries the pointer/qualifier fragment, `<ptype>`
/// the base type (absent for untyped pointers), `<name>` the identifier.
fn decode_signature(
    reader: &mut Reader<&[u8]>,
    end_tag: &[u8],
) -> Result<(CType, String), RegistryError> {
    #[derive(PartialEq)]
    enum Target {
        Fragment,
        Base,
        Name,
    }
    let mut target = Target::Fragment;
    let mut fragment = String::new();
    let mut base = String::new();
    let mut name = String::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"ptype" => target = Target::Base,
                b"name" => target = Target::Name,
                _ => skip_element(reader, &e)?,
            },
            Event::Text(t) => {
                let text = unescape_text(&t)?;
                match target {
                    Target::Fragment => fragment.push_str(&text),
                    Target::Base => base.push_str(&text),
                    Target::Name => name.push_str(&text),
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"ptype" | b"name" => target = Target::Fragment,
                tag if tag == end_tag => break,
                _ => {}
            },
            Event::Eof => return Err(truncated("command prototype")),
            _ => {}
        }
    }
    if name.is_empty() {
        return Err(malformed("command prototype or parameter without a name"));
    }
    Ok((CType::parse(&base, &fragment), name))
}

fn decode_feature(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    catalogue: &mut RawCatalogue,
) -> Result<(), RegistryError> {
    let api = attr(start, "api")?.unwrap_or_default();
    let name = attr(start, "name")?.unwrap_or_default();
    let number = attr(start, "number")?
        .ok_or_else(|| malformed(format!("feature {name} without a number")))?
        .parse()?;
    let mut feature = FeatureBlock {
        api,
        name,
        number,
        ..FeatureBlock::default()
    };
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"require" => decode_require(reader, &mut feature)?,
                b"remove" => {
                    let profile = attr(&e, "profile")?;
                    feature.removals.push(decode_remove(reader, profile)?);
                }
                _ => skip_element(reader, &e)?,
            },
            Event::End(e) if e.name().as_ref() == b"feature" => {
                catalogue.features.push(feature);
                return Ok(());
            }
            Event::Eof => return Err(truncated("feature")),
            _ => {}
        }
    }
}

fn decode_require(
    reader: &mut Reader<&[u8]>,
    feature: &mut FeatureBlock,
) -> Result<(), RegistryError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"enum" => feature.require_enums.push(required_name(&e)?),
                b"command" => feature.require_commands.push(required_name(&e)?),
                // <type> requires carry no resolution semantics here
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"require" => return Ok(()),
            Event::Eof => return Err(truncated("require")),
            _ => {}
        }
    }
}

fn decode_remove(
    reader: &mut Reader<&[u8]>,
    profile: Option<String>,
) -> Result<Removal, RegistryError> {
    let mut removal = Removal {
        profile,
        ..Removal::default()
    };
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"enum" => removal.enums.push(required_name(&e)?),
                b"command" => removal.commands.push(required_name(&e)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"remove" => return Ok(removal),
            Event::Eof => return Err(truncated("remove")),
            _ => {}
        }
    }
}

fn required_name(e: &BytesStart<'_>) -> Result<String, RegistryError> {
    attr(e, "name")?.ok_or_else(|| malformed("feature directive entry without a name"))
}

/// Skip an element and everything inside it.
fn skip_element(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<(), RegistryError> {
    let end = start.to_end().into_owned();
    reader.read_to_end(end.name())?;
    Ok(())
}

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, RegistryError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(format!("bad attribute: {err}")))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| malformed(format!("bad attribute value: {err}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn unescape_text(t: &BytesText<'_>) -> Result<String, RegistryError> {
    t.unescape()
        .map(|text| text.into_owned())
        .map_err(|err| malformed(format!("bad character data: {err}")))
}

fn malformed(msg: impl Into<String>) -> RegistryError {
    RegistryError::Decode(msg.into())
}

fn truncated(element: &str) -> RegistryError {
    RegistryError::Decode(format!("unexpected end of document inside <{element}>"))
}
