//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Content selection constants (character counts, not bytes)
pub mod selection {
    /// Stop reading code files once the running total exceeds this
    pub const MAX_TOTAL_CHARS: usize = 60_000;

    /// Code files at or below this length carry too little to be worth sending
    pub const MIN_FILE_CHARS: usize = 200;

    /// Code files at or above this length are treated as generated or data
    pub const MAX_FILE_CHARS: usize = 30_000;

    /// Selected code files are cut to this many characters
    pub const TRUNCATE_AT_CHARS: usize = 2_000;

    /// Appended after a truncated file body
    pub const TRUNCATION_MARKER: &str = "\n... [TRUNCATED]";

    /// Identity files (manifests, README) must be shorter than this
    pub const MAX_IDENTITY_FILE_CHARS: usize = 5_000;

    /// Version-control metadata directory skipped during enumeration
    pub const VCS_DIR: &str = ".git";

    /// Extensions classified as source code (matched case-insensitively)
    pub const CODE_EXTENSIONS: &[&str] = &[
        ".cs", ".ts", ".js", ".go", ".py", ".java", ".rs", ".cpp", ".h", ".tsx", ".jsx", ".swift",
        ".kt", ".vue", ".rb",
    ];

    /// Path substrings marking generated, minified, or vendored content
    pub const NOISE_PATH_MARKERS: &[&str] = &["node_modules", ".min.", "generated", "dist/"];

    /// Manifest suffixes collected as repository identity files
    pub const IDENTITY_SUFFIXES: &[&str] = &[
        "package.json",
        "go.mod",
        ".csproj",
        "Cargo.toml",
        "requirements.txt",
        "pom.xml",
    ];

    /// Root-level identity files matched by exact name (case-insensitive)
    pub const IDENTITY_ROOT_FILES: &[&str] = &["README.md", "Dockerfile"];
}

/// Prompt assembly constants
pub mod context {
    /// Hard cap on files rendered into one prompt
    pub const MAX_FILES: usize = 30;
}

/// Completion endpoint constants
pub mod completion {
    /// Default endpoint base URL (OpenAI-compatible proxy)
    pub const DEFAULT_API_BASE: &str = "http://localhost:8317";

    /// Default model identifier
    pub const DEFAULT_MODEL: &str = "gpt-5-codex-mini";

    /// Path appended to the base URL
    pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

    /// Low temperature for reproducible documentation
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;

    /// Output length ceiling
    pub const DEFAULT_MAX_TOKENS: u32 = 8192;
}

/// Repository fetch constants
pub mod fetch {
    /// Version-control executable
    pub const DEFAULT_GIT_PROGRAM: &str = "git";

    /// Code-hosting host used in the clone URL template
    pub const DEFAULT_HOST: &str = "github.com";

    /// Subdirectory of the workspace root holding per-run snapshots
    pub const WORKSPACE_DIR_NAME: &str = "openwiki-repos";
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}
