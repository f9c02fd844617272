use std::fmt;
use std::io;
use std::path::PathBuf;

/// A host capability (clipboard or file write) reported failure.
#[derive(Debug)]
pub enum HostError {
    /// Writing or renaming a file failed.
    Io { path: PathBuf, source: io::Error },
    /// The system clipboard was unavailable or refused the text.
    Clipboard(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Io { path, source } => write!(f, "writing {}: {}", path.display(), source),
            HostError::Clipboard(msg) => write!(f, "clipboard: {}", msg),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Io { source, .. } => Some(source),
            HostError::Clipboard(_) => None,
        }
    }
}

/// The single failure outcome of an export.
///
/// Whatever the cause, nothing was handed to the host (or the host's own write
/// failed atomically), so no partial output exists.
#[derive(Debug)]
pub enum ExportError {
    /// The requested surface is empty or larger than the rasterizer accepts.
    Surface { width: u32, height: u32 },
    /// The image encoder rejected the pixels.
    Encode(image::ImageError),
    /// The host could not store the result.
    Host(HostError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("export failed: ")?;
        match self {
            ExportError::Surface { width, height } => {
                write!(f, "cannot allocate a {}x{} surface", width, height)
            }
            ExportError::Encode(e) => write!(f, "encoding: {}", e),
            ExportError::Host(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Surface { .. } => None,
            ExportError::Encode(e) => Some(e),
            ExportError::Host(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Encode(e)
    }
}

impl From<HostError> for ExportError {
    fn from(e: HostError) -> Self {
        ExportError::Host(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn messages_are_prefixed_and_chain_sources() {
        let host = HostError::Io {
            path: PathBuf::from("out/x.png"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let err = ExportError::from(host);
        let text = err.to_string();
        assert!(text.starts_with("export failed: "), "{text}");
        assert!(text.contains("x.png"));
        assert!(err.source().and_then(|s| s.source()).is_some());
    }

    #[test]
    fn surface_error_names_the_size() {
        let err = ExportError::Surface { width: 0, height: 10 };
        assert_eq!(err.to_string(), "export failed: cannot allocate a 0x10 surface");
        assert!(err.source().is_none());
    }
}
