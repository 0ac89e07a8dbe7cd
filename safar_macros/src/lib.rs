mod schema_extraction;
mod structured_output;

use proc_macro::TokenStream;

/// Marks a response type as the target of schema-constrained generation.
///
/// The annotated struct must also derive `Deserialize` and `JsonSchema`. The
/// generated `StructuredOutput` impl derives the schema once from the type
/// itself, so the shape sent to the model and the shape decoded from the
/// reply can never drift apart.
///
/// ```ignore
/// #[derive(Deserialize, JsonSchema)]
/// #[structured_output(name = "Itinerary")]
/// pub struct Itinerary { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn structured_output(attr: TokenStream, item: TokenStream) -> TokenStream {
    structured_output::structured_output(attr, item)
}
