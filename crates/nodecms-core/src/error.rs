//! Error types for the nodecms core library.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Boxed low-level cause carried by a [`BuildError`].
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error types for nodecms.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// Frontmatter parsing error.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Pipeline stage at which a [`BuildError`] originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Reading or parsing a `.json` content file.
    JsonParsing,
    /// Reading a `.md` file or parsing its frontmatter.
    MarkdownConversion,
    /// The source file has an extension no loader handles.
    FileTypeValidation,
    /// The loaded content does not have the expected shape.
    DataValidation,
    /// Walking the content directory.
    FileDiscovery,
    /// Rendering the content tree to markup.
    SsrRendering,
    /// Validating the tags collected for the document head.
    HeadMetadataProcessing,
    /// Assembling the final HTML document.
    HtmlGeneration,
    /// Creating the output directory.
    DirectoryCreation,
    /// Writing the output file.
    FileWriting,
    /// Emitting the shared stylesheet.
    AssetCopying,
    /// Any unexpected failure while processing a page.
    PageProcessing,
}

impl Phase {
    /// Human readable phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsonParsing => "JSON Parsing",
            Self::MarkdownConversion => "Markdown Conversion",
            Self::FileTypeValidation => "File Type Validation",
            Self::DataValidation => "Data Validation",
            Self::FileDiscovery => "File Discovery",
            Self::SsrRendering => "SSR Rendering",
            Self::HeadMetadataProcessing => "Head-Metadata Processing",
            Self::HtmlGeneration => "HTML Generation",
            Self::DirectoryCreation => "Directory Creation",
            Self::FileWriting => "File Writing",
            Self::AssetCopying => "Asset Copying",
            Self::PageProcessing => "Page Processing",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phase-tagged failure of one step of the build pipeline.
///
/// Constructed once at the point of failure and never mutated afterwards.
/// The low-level error that triggered it is kept as the `source` so the full
/// cause chain stays available for diagnostics.
#[derive(Debug, Error)]
#[error("{phase} failed for {}: {message}", .file_path.display())]
pub struct BuildError {
    message: String,
    file_path: PathBuf,
    phase: Phase,
    timestamp: DateTime<Utc>,
    #[source]
    source: Option<Cause>,
}

impl BuildError {
    /// Create a build error without an underlying cause.
    pub fn new(phase: Phase, file_path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file_path: file_path.as_ref().to_path_buf(),
            phase,
            timestamp: Utc::now(),
            source: None,
        }
    }

    /// Create a build error wrapping the low-level failure that caused it.
    pub fn caused_by(
        phase: Phase,
        file_path: impl AsRef<Path>,
        message: impl Into<String>,
        source: impl Into<Cause>,
    ) -> Self {
        Self {
            message: message.into(),
            file_path: file_path.as_ref().to_path_buf(),
            phase,
            timestamp: Utc::now(),
            source: Some(source.into()),
        }
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file the error belongs to.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Phase at which the error originated.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// When the error was created.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The original low-level failure, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Full multi-line diagnostic: file, phase, time, message and cause chain.
    pub fn report(&self) -> String {
        let mut lines = vec![
            format!("BUILD ERROR in {}", self.file_path.display()),
            format!("  Phase:   {}", self.phase),
            format!(
                "  Time:    {}",
                self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            format!("  Message: {}", self.message),
        ];

        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            lines.push(format!("  Caused by: {err}"));
            cause = err.source();
        }

        lines.join("\n")
    }
}
