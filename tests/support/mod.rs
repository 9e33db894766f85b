use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::{Command, Output};

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn golden_catalog_path() -> PathBuf {
    workspace_root().join("tests/mocks/tenets-golden.json")
}

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "tenet-check" => env!("CARGO_BIN_EXE_tenet-check"),
        "tenet-render" => env!("CARGO_BIN_EXE_tenet-render"),
        "tenet-show" => env!("CARGO_BIN_EXE_tenet-show"),
        "tenet-list" => env!("CARGO_BIN_EXE_tenet-list"),
        other => panic!("unknown helper binary {other}"),
    };
    PathBuf::from(path)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn run_command_expect_failure(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        bail!(
            "command {:?} unexpectedly succeeded\nstdout: {}",
            cmd,
            String::from_utf8_lossy(&output.stdout)
        )
    }
    Ok(output)
}
