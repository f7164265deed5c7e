//! Chat assistant presentation around the analytics responder

pub mod prompts;
pub mod stream;

pub use prompts::{GREETING, SUGGESTED_QUESTIONS, THINKING_STEPS};
pub use stream::{plan_chunks, AnswerStreamer, StreamChunk};
