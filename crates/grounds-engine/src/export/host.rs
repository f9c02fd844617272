use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::HostError;

/// Platform capabilities the exporter writes through.
///
/// Each call either completes or fails as a whole; implementations must not
/// leave a partially written file behind.
pub trait Host {
    /// Hands text to the user (normally the clipboard).
    fn write_text(&mut self, content: &str) -> Result<(), HostError>;

    /// Stores `contents` under `filename`.
    fn write_file(&mut self, contents: &[u8], filename: &str) -> Result<(), HostError>;

    /// Stores a text document under `filename`.
    fn write_text_file(&mut self, text: &str, filename: &str) -> Result<(), HostError> {
        self.write_file(text.as_bytes(), filename)
    }
}

/// Where [`DesktopHost`] sends `write_text` content.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextSink {
    /// The system clipboard, or stdout when no clipboard can be opened.
    ///
    /// On X11 the selection is served by this process; without a clipboard
    /// manager it is gone once the process exits.
    Clipboard,
    /// Standard output, one line per write (headless sessions, pipes).
    Stdout,
}

/// Files go to a directory on disk; text goes to the clipboard or stdout.
pub struct DesktopHost {
    out_dir: PathBuf,
    text_sink: TextSink,
    // Opened on first use so file-only sessions never touch the display server.
    clipboard: Option<arboard::Clipboard>,
}

impl DesktopHost {
    /// Creates `out_dir` if needed.
    pub fn new(out_dir: impl Into<PathBuf>, text_sink: TextSink) -> Result<Self> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;
        log::debug!("desktop host writing to {}", out_dir.display());
        Ok(Self { out_dir, text_sink, clipboard: None })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, HostError> {
        if self.clipboard.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| HostError::Clipboard(e.to_string()))?;
            self.clipboard = Some(cb);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| HostError::Clipboard("clipboard unavailable".to_string()))
    }
}

impl Host for DesktopHost {
    fn write_text(&mut self, content: &str) -> Result<(), HostError> {
        match self.text_sink {
            TextSink::Clipboard => match self.clipboard() {
                Ok(cb) => cb
                    .set_text(content.to_string())
                    .map_err(|e| HostError::Clipboard(e.to_string())),
                Err(e) => {
                    log::warn!("{}; writing text to stdout instead", e);
                    write_stdout(content)
                }
            },
            TextSink::Stdout => write_stdout(content),
        }
    }

    fn write_file(&mut self, contents: &[u8], filename: &str) -> Result<(), HostError> {
        write_atomic(&self.out_dir.join(filename), contents)
    }
}

fn write_stdout(content: &str) -> Result<(), HostError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", content)
        .and_then(|_| out.flush())
        .map_err(|source| HostError::Io { path: PathBuf::from("<stdout>"), source })
}

/// Writes to a hidden sibling first and renames it into place, so readers see
/// either the previous file or the complete new one.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), HostError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.part", file_name));

    let result = fs::write(&tmp, contents)
        .map_err(|source| HostError::Io { path: tmp.clone(), source })
        .and_then(|_| {
            fs::rename(&tmp, path).map_err(|source| HostError::Io { path: path.to_path_buf(), source })
        });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// In-memory host that records every write.
///
/// Useful for embedding (the caller decides what to do with the bytes) and for
/// tests. `fail_writes` makes every call fail without recording.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub texts: Vec<String>,
    pub files: Vec<(String, Vec<u8>)>,
    pub fail_writes: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose every write fails.
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    /// Bytes of the most recent file with this name.
    pub fn file(&self, filename: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == filename)
            .map(|(_, bytes)| bytes.as_slice())
    }

    fn refuse(&self, what: &str) -> Result<(), HostError> {
        if self.fail_writes {
            Err(HostError::Io {
                path: PathBuf::from(what),
                source: std::io::Error::new(std::io::ErrorKind::Other, "write refused"),
            })
        } else {
            Ok(())
        }
    }
}

impl Host for MemoryHost {
    fn write_text(&mut self, content: &str) -> Result<(), HostError> {
        self.refuse("<clipboard>")?;
        self.texts.push(content.to_string());
        Ok(())
    }

    fn write_file(&mut self, contents: &[u8], filename: &str) -> Result<(), HostError> {
        self.refuse(filename)?;
        self.files.push((filename.to_string(), contents.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("grounds-host-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn desktop_host_creates_dir_and_writes_atomically() {
        let dir = scratch_dir("write");
        let mut host = DesktopHost::new(&dir, TextSink::Stdout).unwrap();
        assert_eq!(host.out_dir(), dir.as_path());
        host.write_text_file("<svg/>", "a.svg").unwrap();
        assert_eq!(fs::read_to_string(dir.join("a.svg")).unwrap(), "<svg/>");
        assert!(!dir.join(".a.svg.part").exists());

        host.write_file(b"second", "a.svg").unwrap();
        assert_eq!(fs::read(dir.join("a.svg")).unwrap(), b"second");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = scratch_dir("fail");
        let mut host = DesktopHost::new(&dir, TextSink::Stdout).unwrap();
        let err = host.write_file(b"x", "missing/sub/dir.png").unwrap_err();
        assert!(matches!(err, HostError::Io { .. }));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn stdout_sink_writes_text() {
        let dir = scratch_dir("stdout");
        let mut host = DesktopHost::new(&dir, TextSink::Stdout).unwrap();
        assert!(host.write_text("background: none;").is_ok());
        assert!(host.clipboard.is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_host_records_in_order() {
        let mut host = MemoryHost::new();
        host.write_text("one").unwrap();
        host.write_file(b"1", "f").unwrap();
        host.write_file(b"2", "f").unwrap();
        assert_eq!(host.texts, vec!["one"]);
        assert_eq!(host.file("f"), Some(&b"2"[..]));
        assert_eq!(host.file("g"), None);
    }

    #[test]
    fn failing_memory_host_records_nothing() {
        let mut host = MemoryHost::failing();
        assert!(host.write_text("x").is_err());
        assert!(host.write_file(b"x", "f").is_err());
        assert!(host.texts.is_empty() && host.files.is_empty());
    }
}
