pub mod assistant;
pub mod session;

pub use assistant::TravelAssistant;
pub use session::ChatSession;
