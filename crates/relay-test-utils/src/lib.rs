//! Shared test utilities for relay integration tests.
//!
//! Provides two things every harness test ends up needing:
//! - **Fake agent binaries**: tiny `/bin/sh` scripts written into a temp
//!   directory that stand in for the real `claude` CLI and exit with a
//!   chosen status.
//! - **Log capture**: a `tracing` subscriber that writes into an in-memory
//!   buffer so tests can assert on emitted warnings.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

// -----------------------------------------------------------------------
// Fake agent binaries
// -----------------------------------------------------------------------

/// Write an executable shell script named `name` into `dir` and return its
/// path. `body` is everything after the shebang line.
pub fn write_fake_binary(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .unwrap_or_else(|e| panic!("failed to write fake binary {}: {e}", path.display()));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .unwrap_or_else(|e| panic!("failed to chmod fake binary {}: {e}", path.display()));
    }

    path
}

/// Write a fake agent binary that ignores its arguments and exits with
/// `code`.
pub fn fake_binary_exiting(dir: &Path, code: i32) -> PathBuf {
    write_fake_binary(dir, &format!("fake_claude_exit_{code}.sh"), &format!("exit {code}"))
}

/// Write a fake agent binary that prints a version string and exits 0,
/// like `claude --version` does.
pub fn fake_binary_healthy(dir: &Path) -> PathBuf {
    write_fake_binary(
        dir,
        "fake_claude.sh",
        "if [ \"$1\" = \"--version\" ]; then\n  echo '1.0.0 (Claude Code)'\n  exit 0\nfi\nexit 64",
    )
}

/// A path inside `dir` that is guaranteed not to exist.
pub fn missing_binary(dir: &Path) -> PathBuf {
    let path = dir.join("definitely-not-installed-claude");
    assert!(!path.exists(), "missing binary path unexpectedly exists");
    path
}

// -----------------------------------------------------------------------
// Log capture
// -----------------------------------------------------------------------

/// In-memory sink for `tracing` output.
///
/// Install it with [`LogCapture::set_default`]; the returned guard keeps it
/// active on the current thread. `#[tokio::test]` uses a current-thread
/// runtime, so everything awaited inside the test is captured.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make this capture the thread-local default subscriber (DEBUG and up).
    pub fn set_default(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything captured so far.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().expect("log capture mutex poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Number of captured lines that contain both `level` and `needle`.
    pub fn count(&self, level: &str, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(level) && line.contains(needle))
            .count()
    }
}

/// Writer handed out by [`LogCapture`] for each event.
pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .buf
            .lock()
            .map_err(|_| io::Error::other("log capture mutex poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: Arc::clone(&self.buf),
        }
    }
}
