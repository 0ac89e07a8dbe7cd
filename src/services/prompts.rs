use crate::types::language::Language;

/// Persona instruction for conversational turns. Varies only by language.
pub fn system_instruction(language: Language) -> String {
    format!(
        "You are Safar, an advanced AI travel assistant. Speak in {}. Be helpful, concise, and inspiring.\n\
         When asked about flights or hotels, provide realistic estimates or suggest checking the specific search tools in the app.\n\
         If asked to plan a trip, provide a structured day-by-day itinerary.",
        language.display_name()
    )
}

/// Prompt for schema-constrained itinerary generation.
pub fn itinerary_prompt(destination: &str, days: u32, language: Language) -> String {
    let base = format!(
        "Create a {}-day itinerary for a trip to {}.",
        days,
        destination.trim()
    );
    match language {
        Language::En => base,
        Language::Ar => format!("{base} Respond in Arabic."),
    }
}
