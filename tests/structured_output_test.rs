use safar_rs::{decode_structured_response, structured_output, SafarError, StructuredOutput};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

/// Packing list suggested for a trip.
#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
#[structured_output]
struct PackingList {
    /// Items to bring
    items: Vec<String>,
    /// Checked-bag weight estimate in kilograms
    weight_kg: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[structured_output(name = "hotel_pick", description = "One recommended hotel")]
struct HotelPick {
    name: String,
    nights: u32,
}

#[test]
fn defaults_name_to_type_and_description_to_docs() {
    let handle = PackingList::schema();
    assert_eq!(handle.schema_name(), "PackingList");
    assert_eq!(
        handle.schema_json()["description"],
        "Packing list suggested for a trip."
    );

    let response = handle.response_schema();
    assert_eq!(response["properties"]["items"]["type"], "ARRAY");
    assert_eq!(response["properties"]["items"]["items"]["type"], "STRING");
    assert_eq!(response["properties"]["weight_kg"]["type"], "NUMBER");
    assert_eq!(response["properties"]["weight_kg"]["nullable"], true);
}

#[test]
fn explicit_arguments_win() {
    let handle = HotelPick::schema();
    assert_eq!(handle.schema_name(), "hotel_pick");
    assert_eq!(handle.type_name(), "HotelPick");
    assert_eq!(handle.schema_json()["description"], "One recommended hotel");
}

#[test]
fn decodes_any_structured_output_type() {
    let raw = json!({"name": "Al Bustan Palace", "nights": 2}).to_string();
    let pick: HotelPick = decode_structured_response(Some(&raw)).unwrap();
    assert_eq!(pick.name, "Al Bustan Palace");
    assert_eq!(pick.nights, 2);

    let raw = json!({"name": "Al Bustan Palace"}).to_string();
    let err = decode_structured_response::<HotelPick>(Some(&raw)).unwrap_err();
    assert!(matches!(err, SafarError::MalformedStructure(_)));
}
