//! safar-rs: travel planning on top of a hosted generative-language model
//!
//! The crate is a thin, typed adapter. Chat turns go out as free text;
//! itineraries are requested with a response schema derived from
//! [`Itinerary`] and are only handed back after the reply has been validated
//! against that same schema and its day numbering checked.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use safar_rs::{Language, TravelAssistant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The key is read from `API_KEY` / `GEMINI_API_KEY` on every call.
//!     let assistant = TravelAssistant::from_env();
//!
//!     let plan = assistant.generate_itinerary("Kyoto", 3, Language::En).await?;
//!     assert_eq!(plan.days.len(), 3);
//!     println!("{plan}");
//!     Ok(())
//! }
//! ```

extern crate self as safar_rs;

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;

pub use config::{AssistantConfig, CredentialSource, RetryPolicy};
pub use core::{ChatSession, TravelAssistant};
pub use error::{Result, SafarError, TransportError};
pub use safar_macros::structured_output;
pub use schemas::{SchemaHandle, StructuredOutput};
pub use services::{HttpTransport, ModelCall, ModelTransport};
pub use types::{
    decode_structured_response, Activity, ChatTurn, Citation, DayPlan, FallbackMessage,
    GroundedAnswer, Itinerary, ItineraryRequest, Language, Role,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
