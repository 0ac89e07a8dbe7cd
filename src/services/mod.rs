pub mod gemini_client;
pub mod prompts;
pub mod wire;

pub use gemini_client::{HttpTransport, ModelCall, ModelTransport};
