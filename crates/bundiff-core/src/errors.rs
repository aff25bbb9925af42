use bundiff_core_types::RunId;
use thiserror::Error;

/// Result type alias using BundiffError
pub type Result<T> = std::result::Result<T, BundiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Malformed input
    InvalidInput,
    InvalidHeader,
    InvalidVersion,
    InvalidPattern,
    InvalidTree,

    // Missing expected structure
    MissingManifest,
    MissingApi,

    // Tree invariants
    DuplicateIdentity,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidHeader => "ERR_INVALID_HEADER",
            ExErrorKind::InvalidVersion => "ERR_INVALID_VERSION",
            ExErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ExErrorKind::InvalidTree => "ERR_INVALID_TREE",
            ExErrorKind::MissingManifest => "ERR_MISSING_MANIFEST",
            ExErrorKind::MissingApi => "ERR_MISSING_API",
            ExErrorKind::DuplicateIdentity => "ERR_DUPLICATE_IDENTITY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    module: Option<String>,
    path: Option<String>,
    header: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            module: None,
            path: None,
            header: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add module name context
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Add resource path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add manifest header context
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the module name context, if any
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Get the resource path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the header context, if any
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(module) = &self.module {
            write!(f, " (module: {})", module)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(header) = &self.header {
            write!(f, " (header: {})", header)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for extraction and comparison
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BundiffError {
    // ===== I/O =====
    /// A resource could not be opened or read to the end
    #[error("Resource unreadable: {path}: {reason}")]
    ResourceUnreadable { path: String, reason: String },

    /// The module itself could not be opened
    #[error("Module unreadable: {location}: {reason}")]
    ModuleUnreadable { location: String, reason: String },

    // ===== Malformed input =====
    /// A structured header value violates the clause grammar
    #[error("Malformed header {header}: {reason} (value: {value:?})")]
    MalformedHeader {
        header: String,
        value: String,
        reason: String,
    },

    /// A version string could not be parsed
    #[error("Invalid version {value:?}: {reason}")]
    InvalidVersion { value: String, reason: String },

    /// An ignore pattern could not be compiled
    #[error("Invalid ignore pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The manifest text could not be read as a header section
    #[error("Malformed manifest at line {line}: {reason}")]
    MalformedManifest { line: usize, reason: String },

    // ===== Missing expected structure =====
    /// A manifest is declared by the module but could not be produced
    #[error("Manifest missing from module {module}: {reason}")]
    MissingManifest { module: String, reason: String },

    /// The API surface of a module with a manifest could not be resolved
    #[error("API unresolvable for module {module}: {reason}")]
    MissingApi { module: String, reason: String },

    /// Class metadata lookup failed for a compiled-code resource
    #[error("Class metadata unresolvable for {path}: {reason}")]
    ClassInfoUnavailable { path: String, reason: String },

    // ===== Tree invariants =====
    /// Two siblings share kind and name
    #[error("Duplicate {kind} identity {name:?} under {parent:?}")]
    DuplicateIdentity {
        parent: String,
        kind: String,
        name: String,
    },

    /// Tree data did not describe a valid structure or delta tree
    #[error("Invalid tree data: {reason}")]
    InvalidTree { reason: String },

    // ===== Generic Errors =====
    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for BundiffError {
    fn from(err: serde_json::Error) -> Self {
        BundiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<BundiffError> for ExError {
    fn from(err: BundiffError) -> Self {
        match err {
            BundiffError::ResourceUnreadable { path, reason } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(format!("Resource unreadable: {}", reason)),

            BundiffError::ModuleUnreadable { location, reason } => ExError::new(ExErrorKind::Io)
                .with_path(location)
                .with_message(format!("Module unreadable: {}", reason)),

            BundiffError::MalformedHeader {
                header,
                value,
                reason,
            } => ExError::new(ExErrorKind::InvalidHeader)
                .with_header(header)
                .with_message(format!("{} (value: {:?})", reason, value)),

            BundiffError::InvalidVersion { value, reason } => {
                ExError::new(ExErrorKind::InvalidVersion)
                    .with_message(format!("Invalid version {:?}: {}", value, reason))
            }

            BundiffError::InvalidPattern { pattern, reason } => {
                ExError::new(ExErrorKind::InvalidPattern)
                    .with_message(format!("Invalid ignore pattern {:?}: {}", pattern, reason))
            }

            BundiffError::MalformedManifest { line, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_path("META-INF/MANIFEST.MF")
                    .with_message(format!("line {}: {}", line, reason))
            }

            BundiffError::MissingManifest { module, reason } => {
                ExError::new(ExErrorKind::MissingManifest)
                    .with_module(module)
                    .with_message(reason)
            }

            BundiffError::MissingApi { module, reason } => ExError::new(ExErrorKind::MissingApi)
                .with_module(module)
                .with_message(reason),

            BundiffError::ClassInfoUnavailable { path, reason } => {
                ExError::new(ExErrorKind::MissingApi)
                    .with_path(path)
                    .with_message(reason)
            }

            BundiffError::DuplicateIdentity { parent, kind, name } => {
                ExError::new(ExErrorKind::DuplicateIdentity).with_message(format!(
                    "Duplicate {} {:?} under {:?}",
                    kind, name, parent
                ))
            }

            BundiffError::InvalidTree { reason } => {
                ExError::new(ExErrorKind::InvalidTree).with_message(reason)
            }

            BundiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}
