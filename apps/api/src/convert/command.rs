//! External-process converter (LibreOffice by default).
//!
//! Each call gets its own scratch directory holding `resume.docx` and the
//! expected `resume.pdf`. The directory is a `TempDir`: removed explicitly on
//! completion so removal errors surface, and removed by `Drop` if the future
//! is cancelled. The child leads its own process group, and a timeout or a
//! dropped request kills the whole group, including helpers it forked (the
//! `soffice` wrapper runs the real work in `soffice.bin`).

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::{Child, Command};
use tracing::{error, info, warn};

use crate::convert::{ConversionError, DocumentConverter};

pub const INPUT_FILE: &str = "resume.docx";
pub const OUTPUT_FILE: &str = "resume.pdf";

pub const DEFAULT_PROGRAM: &str = "soffice";
/// LibreOffice names its output after the input stem inside `--outdir`,
/// which lands on `{outdir}/resume.pdf`. Each call gets a throwaway profile in
/// its scratch directory; with a shared profile a second concurrent call hands
/// its job to the running instance and exits without writing anything.
pub const DEFAULT_ARGS: &[&str] = &[
    "-env:UserInstallation=file://{outdir}/lo-profile",
    "--headless",
    "--convert-to",
    "pdf",
    "--outdir",
    "{outdir}",
    "{input}",
];

const PDF_SIGNATURE: &[u8] = b"%PDF-";
const STDERR_LIMIT: usize = 2048;

#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    temp_root: Option<PathBuf>,
}

impl CommandConverter {
    /// `args` may contain `{input}`, `{output}` and `{outdir}` placeholders.
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            temp_root: None,
        }
    }

    /// Creates scratch directories under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    fn scratch_dir(&self) -> io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-convert-");
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    async fn run_in(&self, dir: &Path, docx: &[u8]) -> Result<Vec<u8>, ConversionError> {
        let input = dir.join(INPUT_FILE);
        let output = dir.join(OUTPUT_FILE);
        tokio::fs::write(&input, docx).await?;

        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| expand_arg(arg, &input, &output, dir))
            .collect();

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let child = command
            .spawn()
            .map_err(|source| ConversionError::Unavailable {
                program: self.program.clone(),
                source,
            })?;
        let group = GroupKill::new(&child);

        let finished = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ConversionError::TimedOut(self.timeout))?
            .map_err(|e| ConversionError::Failed {
                status: "unknown".to_string(),
                stderr: e.to_string(),
            })?;
        group.disarm();

        if !finished.status.success() {
            let mut stderr = String::from_utf8_lossy(&finished.stderr).trim().to_string();
            if stderr.len() > STDERR_LIMIT {
                let cut = (0..=STDERR_LIMIT)
                    .rev()
                    .find(|i| stderr.is_char_boundary(*i))
                    .unwrap_or(0);
                stderr.truncate(cut);
            }
            return Err(ConversionError::Failed {
                status: finished.status.to_string(),
                stderr,
            });
        }

        let pdf = match tokio::fs::read(&output).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConversionError::NoOutput)
            }
            Err(e) => return Err(ConversionError::TempResource(e)),
        };

        if pdf.is_empty() {
            return Err(ConversionError::NoOutput);
        }
        if !pdf.starts_with(PDF_SIGNATURE) {
            return Err(ConversionError::InvalidOutput);
        }
        Ok(pdf)
    }
}

#[async_trait]
impl DocumentConverter for CommandConverter {
    async fn convert(&self, docx: &[u8]) -> Result<Vec<u8>, ConversionError> {
        let started = Instant::now();
        let scratch = self.scratch_dir()?;

        let result = self.run_in(scratch.path(), docx).await;
        let cleanup = scratch.close();

        match (result, cleanup) {
            (Ok(pdf), Ok(())) => {
                info!(
                    program = %self.program,
                    bytes = pdf.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Converted DOCX to PDF"
                );
                Ok(pdf)
            }
            (Ok(_), Err(e)) => {
                error!("Failed to remove conversion scratch directory: {e}");
                Err(ConversionError::TempResource(e))
            }
            (Err(err), Ok(())) => {
                warn!(program = %self.program, "Conversion failed: {err}");
                Err(err)
            }
            (Err(err), Err(e)) => {
                error!("Failed to remove conversion scratch directory: {e}");
                warn!(program = %self.program, "Conversion failed: {err}");
                Err(err)
            }
        }
    }

    fn backend(&self) -> &str {
        &self.program
    }
}

/// Kills the child's process group on drop unless disarmed after a normal
/// exit. `kill_on_drop` alone only reaches the direct child.
struct GroupKill {
    pgid: Option<u32>,
}

impl GroupKill {
    fn new(child: &Child) -> Self {
        Self { pgid: child.id() }
    }

    fn disarm(mut self) {
        self.pgid = None;
    }
}

impl Drop for GroupKill {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            if let Some(pgid) = self.pgid.take() {
                // The child was spawned with process_group(0), so its pid is the pgid.
                let result = unsafe { libc::kill(-(pgid as i32), libc::SIGKILL) };
                if result == 0 {
                    warn!(pgid, "Killed converter process group");
                }
            }
        }
    }
}

fn expand_arg(arg: &str, input: &Path, output: &Path, outdir: &Path) -> String {
    arg.replace("{input}", &input.to_string_lossy())
        .replace("{output}", &output.to_string_lossy())
        .replace("{outdir}", &outdir.to_string_lossy())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
