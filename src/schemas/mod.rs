pub mod response_schema;
pub mod schema;
pub mod validation;

pub use response_schema::to_response_schema;
pub use schema::{apply_root_metadata, SchemaHandle, StructuredOutput};
