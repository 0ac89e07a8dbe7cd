pub mod conversation;
pub mod itinerary;
pub mod language;
pub mod response;
pub mod search;

pub use conversation::{ChatTurn, Role};
pub use itinerary::{Activity, DayPlan, Itinerary, ItineraryRequest};
pub use language::{FallbackMessage, Language};
pub use response::decode_structured_response;
pub use search::{Citation, GroundedAnswer};
