use std::{fs, path::Path, process::Command};

use super::codegen::CodegenError;

pub fn write_c_file(path: &Path, source: &str) -> Result<(), CodegenError> {
    fs::write(path, source).map_err(|source| CodegenError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Runs `<cc> <c_file> -o <output>`.
pub fn compile_and_link(c_file: &Path, output: &Path, cc: &str) -> Result<(), CodegenError> {
    let command = format!("{} {} -o {}", cc, c_file.display(), output.display());
    tracing::info!("Running {}", command);

    let result = Command::new(cc)
        .arg(c_file)
        .arg("-o")
        .arg(output)
        .output()
        .map_err(|error| CodegenError::Toolchain {
            command: command.clone(),
            reason: error.to_string(),
        })?;

    if !result.status.success() {
        return Err(CodegenError::Toolchain {
            command,
            reason: format!(
                "{}\n{}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim_end()
            ),
        });
    }

    Ok(())
}
