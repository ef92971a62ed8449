//! Bakes the trusted tool table into the crate as compile-time constants.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

const CONFIG_FILE: &str = "trusted-tools.toml";

#[derive(Debug, Deserialize)]
struct TrustedConfig {
    tools: ToolsSection,
    environment: EnvironmentSection,
}

#[derive(Debug, Deserialize)]
struct ToolsSection {
    chroot: String,
    tar: String,
    chown: String,
    rm: String,
}

#[derive(Debug, Deserialize)]
struct EnvironmentSection {
    marker: String,
}

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_FILE}");

    let content = match fs::read_to_string(CONFIG_FILE) {
        Ok(c) => c,
        Err(e) => fail(&format!("failed to read {CONFIG_FILE}: {e}")),
    };
    let config: TrustedConfig = match toml::from_str(&content) {
        Ok(c) => c,
        Err(e) => fail(&format!("failed to parse {CONFIG_FILE}: {e}")),
    };

    emit_tool("HATCH_CHROOT_TOOL", config.tools.chroot);
    emit_tool("HATCH_TAR_TOOL", config.tools.tar);
    emit_tool("HATCH_CHOWN_TOOL", config.tools.chown);
    emit_tool("HATCH_RM_TOOL", config.tools.rm);

    let marker = overridden("HATCH_MARKER", config.environment.marker);
    if marker.is_empty() || marker.contains('/') || marker == "." || marker == ".." {
        fail(&format!("HATCH_MARKER `{marker}` must be a plain file name"));
    }
    println!("cargo:rustc-env=HATCH_MARKER={marker}");
}

/// Emits one tool path after applying any build environment override.
fn emit_tool(key: &str, configured: String) {
    let path = overridden(key, configured);
    let p = Path::new(&path);
    if !p.is_absolute() {
        fail(&format!("{key} `{path}` must be an absolute path"));
    }
    if p.file_name().is_none() {
        fail(&format!("{key} `{path}` does not name an executable"));
    }
    println!("cargo:rustc-env={key}={path}");
}

fn overridden(key: &str, configured: String) -> String {
    println!("cargo:rerun-if-env-changed={key}");
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => configured,
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
