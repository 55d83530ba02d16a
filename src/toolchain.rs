//! Drives the external assembler and linker.
//!
//! The generated NASM text is written to a temporary `.asm` file next
//! to the output, assembled with `nasm -f elf64`, linked with
//! `ld -s`, and the intermediates are removed. Failures from either
//! tool abort the build; cleanup of the temporaries is best-effort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("nasm failed with {status}: {stderr}")]
    Assembler { status: std::process::ExitStatus, stderr: String },

    #[error("ld failed with {status}: {stderr}")]
    Linker { status: std::process::ExitStatus, stderr: String },
}

/// Assembles and links `program` into a stripped executable at `out`.
pub fn build(program: &str, out: &Path) -> Result<(), ToolchainError> {
    let asm_path = temp_path(out, "asm");
    let obj_path = temp_path(out, "o");

    fs::write(&asm_path, program)?;
    debug!("wrote assembly to {}", asm_path.display());

    let result = assemble_and_link(&asm_path, &obj_path, out);

    // The intermediates are removed whether or not the tools
    // succeeded; their absence is not an error.
    let _ = fs::remove_file(&asm_path);
    let _ = fs::remove_file(&obj_path);

    result
}

fn assemble_and_link(
    asm_path: &Path,
    obj_path: &Path,
    out: &Path,
) -> Result<(), ToolchainError> {
    let output = Command::new("nasm")
        .arg("-f")
        .arg("elf64")
        .arg("-o")
        .arg(obj_path)
        .arg(asm_path)
        .output()?;
    if !output.status.success() {
        return Err(ToolchainError::Assembler {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    info!("assembled {}", asm_path.display());

    let output = Command::new("ld")
        .arg("-s")
        .arg("-o")
        .arg(out)
        .arg(obj_path)
        .output()?;
    if !output.status.success() {
        return Err(ToolchainError::Linker {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    info!("linked {}", out.display());

    Ok(())
}

/// Intermediate file path: `.tmp-<name>.scl.<ext>` in the output's
/// directory.
fn temp_path(out: &Path, ext: &str) -> PathBuf {
    let name = out
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    out.with_file_name(format!(".tmp-{}.scl.{}", name, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_naming() {
        let asm = temp_path(Path::new("hello"), "asm");
        assert_eq!(asm, PathBuf::from(".tmp-hello.scl.asm"));

        let obj = temp_path(Path::new("dir/hello"), "o");
        assert_eq!(obj, PathBuf::from("dir/.tmp-hello.scl.o"));
    }
}
