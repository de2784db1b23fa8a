// CLI smoke tests: run the glgen binary against the fixture registry.
mod support;

use anyhow::{Context, Result};
use std::fs;
use std::process::Command;
use support::MINI_REGISTRY;
use tempfile::TempDir;

fn glgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_glgen"))
}

fn write_fixture(dir: &TempDir) -> Result<std::path::PathBuf> {
    let path = dir.path().join("gl.xml");
    fs::write(&path, MINI_REGISTRY).context("writing fixture registry")?;
    Ok(path)
}

#[test]
fn generates_header_and_json_for_core_profile() -> Result<()> {
    let dir = TempDir::new()?;
    let registry_path = write_fixture(&dir)?;
    let out_dir = dir.path().join("out");

    let output = glgen()
        .arg("--registry")
        .arg(&registry_path)
        .arg("--gl")
        .arg("2.0")
        .arg("--profile")
        .arg("core")
        .arg("--json")
        .arg("-o")
        .arg(&out_dir)
        .output()
        .context("running glgen")?;
    assert!(
        output.status.success(),
        "glgen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let header = fs::read_to_string(out_dir.join("gl.h"))?;
    assert!(header.contains("#define GL_BETA 0x1907"));
    assert!(!header.contains("GL_ALPHA"), "core profile removed GL_ALPHA");
    assert!(header.contains("extern PFNGLFROBPROC glFrob;"));
    assert!(header.contains("typedef float GLclampf;"));

    let dump: serde_json::Value = serde_json::from_str(&fs::read_to_string(out_dir.join("gl.json"))?)?;
    assert_eq!(dump["api"], "gl");
    assert_eq!(dump["profile"], "core");
    assert_eq!(dump["enums"][0]["name"], "GL_BETA");
    Ok(())
}

#[test]
fn package_label_names_the_outputs() -> Result<()> {
    let dir = TempDir::new()?;
    let registry_path = write_fixture(&dir)?;
    let out_dir = dir.path().join("out");

    let output = glgen()
        .arg("--registry")
        .arg(&registry_path)
        .arg("--gl")
        .arg("1.0")
        .arg("-p")
        .arg("mygl")
        .arg("-o")
        .arg(&out_dir)
        .output()
        .context("running glgen")?;
    assert!(output.status.success());
    assert!(out_dir.join("mygl.h").is_file());
    Ok(())
}

#[test]
fn invalid_target_version_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let registry_path = write_fixture(&dir)?;

    let output = glgen()
        .arg("--registry")
        .arg(&registry_path)
        .arg("--gl")
        .arg("three.one")
        .output()
        .context("running glgen")?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid target version"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn missing_entity_aborts_with_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.xml");
    fs::write(
        &path,
        r#"<registry>
            <feature api="gl" name="GL_VERSION_1_0" number="1.0">
                <require><enum name="GL_NOWHERE"/></require>
            </feature>
        </registry>"#,
    )?;
    let out_dir = dir.path().join("out");

    let output = glgen()
        .arg("--registry")
        .arg(&path)
        .arg("--gl")
        .arg("1.0")
        .arg("-o")
        .arg(&out_dir)
        .output()
        .context("running glgen")?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GL_NOWHERE"), "stderr: {stderr}");
    assert!(
        !out_dir.join("gl.h").exists(),
        "no output may be produced on failure"
    );
    Ok(())
}
