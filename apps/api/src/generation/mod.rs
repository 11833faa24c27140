// AI text generation: cover letters and career-advice chat.
// Remote inference goes through `TextGenerator`; every entry point has a
// deterministic local fallback in `fallback`.

pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod request;

pub use request::{
    ChatRequest, CoverLetterRequest, GenerationFailure, GenerationKind, GenerationRequest,
    GenerationResult, Provenance, TextGenerator,
};
