//! AI Integration Layer
//!
//! Completion endpoint client, the fixed documentation instruction, and the
//! tolerant parser that turns completion text into a document graph.

pub mod client;
pub mod extract;
pub mod parser;
pub mod prompt;

pub use client::{
    ChatMessage, CompletionClient, CompletionRequest, CompletionResult, HttpCompletionClient,
    SharedCompletionClient,
};
pub use extract::{extract_first_object, object_spans};
pub use parser::{ExtractionError, parse, parse_structured};
pub use prompt::SYSTEM_INSTRUCTION;
