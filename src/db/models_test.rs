//! Tests for domain models.

use crate::db::models::*;

fn valid_payload() -> NewItinerary {
    NewItinerary {
        name: "Phuket Weekend".to_string(),
        description: None,
        region: "Phuket".to_string(),
        duration_nights: 2,
        is_recommended: false,
        days: vec![NewItineraryDay {
            day_number: 1,
            transfer_id: None,
            hotel_id: 1,
            activity_ids: vec![],
        }],
    }
}

#[test]
fn transfer_type_deserializes_from_database_format() {
    let car: TransferType = serde_json::from_str("\"private_car\"").unwrap();
    assert_eq!(car, TransferType::PrivateCar);

    let ferry: TransferType = "ferry".parse().unwrap();
    assert_eq!(ferry, TransferType::Ferry);
}

#[test]
fn transfer_type_rejects_unknown_values() {
    let err = "rocket".parse::<TransferType>().unwrap_err();
    assert_eq!(err, "Invalid transfer type: rocket");
}

#[test]
fn transfer_type_display_matches_stored_value() {
    assert_eq!(TransferType::Airplane.to_string(), "airplane");
    assert_eq!(TransferType::PrivateCar.as_str(), "private_car");
}

#[test]
fn itinerary_query_defaults() {
    let query = ItineraryQuery::default();
    assert_eq!(query.skip, 0);
    assert_eq!(query.limit, DEFAULT_LIST_LIMIT);
    assert!(query.region.is_none());
    assert!(query.recommended.is_none());
}

#[test]
fn new_itinerary_accepts_integer_recommended_flag() {
    let json = r#"{"name":"A","region":"Krabi","duration_nights":1,"is_recommended":1,"days":[]}"#;
    let payload: NewItinerary = serde_json::from_str(json).unwrap();
    assert!(payload.is_recommended);

    let json = r#"{"name":"A","region":"Krabi","duration_nights":1,"is_recommended":0,"days":[]}"#;
    let payload: NewItinerary = serde_json::from_str(json).unwrap();
    assert!(!payload.is_recommended);
}

#[test]
fn new_itinerary_defaults_optional_fields() {
    let json = r#"{"name":"A","region":"Krabi","duration_nights":1,
                   "days":[{"day_number":1,"hotel_id":4}]}"#;
    let payload: NewItinerary = serde_json::from_str(json).unwrap();

    assert!(!payload.is_recommended);
    assert!(payload.description.is_none());
    assert!(payload.days[0].transfer_id.is_none());
    assert!(payload.days[0].activity_ids.is_empty());
}

#[test]
fn new_itinerary_requires_days() {
    let json = r#"{"name":"A","region":"Krabi","duration_nights":1}"#;
    assert!(serde_json::from_str::<NewItinerary>(json).is_err());
}

#[test]
fn validate_accepts_well_formed_payload() {
    assert!(valid_payload().validate().is_ok());
}

#[test]
fn validate_rejects_blank_name_and_region() {
    let mut payload = valid_payload();
    payload.name = "  ".to_string();
    assert_eq!(payload.validate().unwrap_err(), "name must not be empty");

    let mut payload = valid_payload();
    payload.region = String::new();
    assert_eq!(payload.validate().unwrap_err(), "region must not be empty");
}

#[test]
fn validate_rejects_negative_nights() {
    let mut payload = valid_payload();
    payload.duration_nights = -1;
    assert!(payload.validate().unwrap_err().contains("duration_nights"));
}

#[test]
fn validate_allows_duplicate_day_numbers() {
    let mut payload = valid_payload();
    payload.days.push(payload.days[0].clone());
    assert!(payload.validate().is_ok());
}

#[test]
fn detail_serializes_summary_fields_flat() {
    let detail = ItineraryDetail {
        summary: ItinerarySummary {
            id: 7,
            name: "Flat".to_string(),
            description: None,
            region: "Krabi".to_string(),
            duration_nights: 1,
            is_recommended: true,
        },
        days: vec![],
    };

    let value = serde_json::to_value(&detail).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["is_recommended"], true);
    assert!(value["days"].as_array().unwrap().is_empty());
    assert!(value.get("summary").is_none());
}
