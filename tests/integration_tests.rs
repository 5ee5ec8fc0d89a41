/// Integration tests for the encoding and classification pipeline
///
/// Run with: cargo test --test integration_tests -- --nocapture

use delay_predictor::{
    encode, Airport, Carrier, DayOfWeek, DelayClass, FeatureSchema, FlightQuery, InferenceError,
    PredictionResult, Scaler, Traffic, ValidationError, Weather,
};

/// Rebuild the column list the way training produced it: numeric columns
/// first, then one indicator block per categorical field.
fn training_schema() -> FeatureSchema {
    let mut cols: Vec<String> = [
        "day_of_week",
        "month",
        "hour",
        "distance",
        "airport_congestion_index",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for c in Carrier::ALL {
        cols.push(format!("carrier_name_{}", c.label()));
    }
    for a in Airport::ALL {
        cols.push(format!("airport_origin_{}", a.label()));
    }
    for a in Airport::ALL {
        cols.push(format!("airport_dest_{}", a.label()));
    }
    for w in Weather::ALL {
        cols.push(format!("weather_condition_{}", w.label()));
    }
    for t in Traffic::ALL {
        cols.push(format!("traffic_level_{}", t.label()));
    }
    FeatureSchema::new(cols)
}

fn base_query() -> FlightQuery {
    FlightQuery {
        carrier: Carrier::Delta,
        origin: Airport::Atl,
        destination: Airport::Lax,
        weather: Weather::Clear,
        traffic: Traffic::Low,
        day_of_week: DayOfWeek::Monday,
        month: 6,
        hour: 14,
        distance: 1900.0,
        congestion_index: 30.0,
    }
}

fn column_index(schema: &FeatureSchema, name: &str) -> usize {
    schema
        .columns()
        .iter()
        .position(|c| c == name)
        .unwrap_or_else(|| panic!("column {} not in schema", name))
}

#[test]
fn test_end_to_end_encoding() {
    println!("\n=== Test: End-to-End Encoding ===");
    let schema = training_schema();
    let vector = encode(&base_query(), &schema).expect("valid query should encode");

    assert_eq!(vector.len(), schema.len(), "vector must span the full schema");

    // Numeric columns carry raw values; Monday maps to 2
    assert_eq!(vector[column_index(&schema, "day_of_week")], 2.0);
    assert_eq!(vector[column_index(&schema, "month")], 6.0);
    assert_eq!(vector[column_index(&schema, "hour")], 14.0);
    assert_eq!(vector[column_index(&schema, "distance")], 1900.0);
    assert_eq!(vector[column_index(&schema, "airport_congestion_index")], 30.0);

    // Exactly one indicator per categorical field, five in total
    let ones = vector.iter().filter(|v| **v == 1.0).count();
    assert_eq!(ones, 5, "expected exactly five active indicators");
    for name in [
        "carrier_name_Delta Air Lines",
        "airport_origin_ATL - Hartsfield–Jackson Atlanta International",
        "airport_dest_LAX - Los Angeles International",
        "weather_condition_Clear",
        "traffic_level_Low",
    ] {
        assert_eq!(vector[column_index(&schema, name)], 1.0, "{} should be set", name);
    }

    println!("✓ {} columns, 5 indicators, numerics in place", vector.len());
}

#[test]
fn test_zero_fill_across_category_combinations() {
    println!("\n=== Test: Zero-Fill Across Category Combinations ===");
    let schema = training_schema();
    let mut checked = 0;

    for carrier in Carrier::ALL {
        for origin in Airport::ALL {
            for destination in Airport::ALL {
                if origin == destination {
                    continue;
                }
                let query = FlightQuery {
                    carrier,
                    origin,
                    destination,
                    weather: Weather::Snow,
                    traffic: Traffic::High,
                    ..base_query()
                };
                let vector = encode(&query, &schema).expect("valid query should encode");
                assert_eq!(vector.len(), schema.len());

                // The chosen value's column is 1; every sibling is exactly 0
                for c in Carrier::ALL {
                    let idx = column_index(&schema, &format!("carrier_name_{}", c.label()));
                    let expected = if c == carrier { 1.0 } else { 0.0 };
                    assert_eq!(vector[idx], expected, "carrier block for {:?}", c);
                }
                for a in Airport::ALL {
                    let idx = column_index(&schema, &format!("airport_origin_{}", a.label()));
                    let expected = if a == origin { 1.0 } else { 0.0 };
                    assert_eq!(vector[idx], expected, "origin block for {:?}", a);
                }
                for a in Airport::ALL {
                    let idx = column_index(&schema, &format!("airport_dest_{}", a.label()));
                    let expected = if a == destination { 1.0 } else { 0.0 };
                    assert_eq!(vector[idx], expected, "dest block for {:?}", a);
                }
                checked += 1;
            }
        }
    }

    println!("✓ {} carrier/origin/destination combinations verified", checked);
}

#[test]
fn test_same_airport_rejected() {
    println!("\n=== Test: Same-Airport Rejection ===");
    let schema = training_schema();
    let query = FlightQuery {
        origin: Airport::Atl,
        destination: Airport::Atl,
        ..base_query()
    };
    let err = encode(&query, &schema).expect_err("same-airport query must not encode");
    assert!(
        matches!(err, ValidationError::SameAirport(Airport::Atl)),
        "unexpected error: {:?}",
        err
    );
    println!("✓ rejected: {}", err);
}

#[test]
fn test_day_of_week_mapping() {
    println!("\n=== Test: Day-of-Week Mapping ===");
    let expected = [
        (DayOfWeek::Sunday, 1),
        (DayOfWeek::Monday, 2),
        (DayOfWeek::Tuesday, 3),
        (DayOfWeek::Wednesday, 4),
        (DayOfWeek::Thursday, 5),
        (DayOfWeek::Friday, 6),
        (DayOfWeek::Saturday, 7),
    ];
    for (day, num) in expected {
        assert_eq!(day.model_index(), num, "{:?} must map to {}", day, num);
    }
    // Not the ISO convention: Monday is 2 here, never 1
    assert_ne!(DayOfWeek::Monday.model_index(), 1);
    println!("✓ Sunday=1 … Saturday=7");
}

#[test]
fn test_classification_boundary() {
    println!("\n=== Test: Classification Boundary ===");
    assert_eq!(DelayClass::from_minutes(15.0), DelayClass::OnTime);
    assert_eq!(DelayClass::from_minutes(15.01), DelayClass::Delayed);
    assert_eq!(DelayClass::from_minutes(-3.2), DelayClass::OnTime);
    assert_eq!(DelayClass::from_minutes(120.0), DelayClass::Delayed);
    assert_eq!(DelayClass::OnTime.label(), "On-Time");
    assert_eq!(DelayClass::Delayed.label(), "Delayed");
    println!("✓ threshold inclusive on the on-time side");
}

#[test]
fn test_display_rounding_keeps_full_precision_for_class() {
    println!("\n=== Test: Display Rounding ===");
    let result = PredictionResult::from_raw(12.345);
    assert!((result.display_minutes() - 12.35).abs() < 1e-9);
    assert_eq!(result.delay_class, DelayClass::OnTime);

    // 15.004 displays as 15.0 but classifies on the raw value
    let borderline = PredictionResult::from_raw(15.004);
    assert!((borderline.display_minutes() - 15.0).abs() < 1e-9);
    assert_eq!(borderline.delay_class, DelayClass::Delayed);
    println!("✓ rounding is display-only");
}

#[test]
fn test_numeric_range_validation() {
    println!("\n=== Test: Numeric Range Validation ===");
    let schema = training_schema();

    let cases = [
        FlightQuery { month: 0, ..base_query() },
        FlightQuery { month: 13, ..base_query() },
        FlightQuery { hour: 24, ..base_query() },
        FlightQuery { distance: 49.9, ..base_query() },
        FlightQuery { distance: 5000.5, ..base_query() },
        FlightQuery { congestion_index: -1.0, ..base_query() },
        FlightQuery { congestion_index: 100.5, ..base_query() },
    ];
    for query in cases {
        let err = encode(&query, &schema).expect_err("out-of-range query must not encode");
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    // Boundary values are inside the domain
    let boundary = FlightQuery {
        month: 12,
        hour: 0,
        distance: 50.0,
        congestion_index: 100.0,
        ..base_query()
    };
    assert!(encode(&boundary, &schema).is_ok());
    println!("✓ bounds enforced, boundaries accepted");
}

#[test]
fn test_scaler_transform() {
    println!("\n=== Test: Scaler Transform ===");
    let scaler = Scaler::new(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 0.5]).unwrap();
    assert_eq!(scaler.width(), 3);

    let scaled = scaler.transform(&[3.0, 10.0, 4.0]).unwrap();
    assert_eq!(scaled, vec![1.0, 2.0, 2.0]);

    let err = scaler.transform(&[1.0, 2.0]).expect_err("width mismatch must fail");
    assert!(
        matches!(err, InferenceError::LengthMismatch { got: 2, expected: 3 }),
        "unexpected error: {:?}",
        err
    );

    assert!(Scaler::new(vec![0.0], vec![1.0, 1.0]).is_err());
    println!("✓ transform-only scaler behaves");
}

#[test]
fn test_schema_reindex_drops_and_fills() {
    println!("\n=== Test: Schema Reindex ===");
    // A schema that skips most expanded columns and carries one the
    // expansion never produces: extras drop, gaps fill with zero.
    let schema = FeatureSchema::new(vec![
        "month".to_string(),
        "wind_speed".to_string(),
        "carrier_name_Delta Air Lines".to_string(),
    ]);
    let vector = encode(&base_query(), &schema).unwrap();
    assert_eq!(vector, vec![6.0, 0.0, 1.0]);
    println!("✓ alignment follows the schema, not the expansion");
}

#[test]
fn test_serde_labels_match_training_vocabulary() {
    println!("\n=== Test: Serde Labels ===");
    assert_eq!(
        serde_json::to_string(&Carrier::Delta).unwrap(),
        "\"Delta Air Lines\""
    );
    assert_eq!(
        serde_json::to_string(&Airport::Sea).unwrap(),
        "\"SEA - Seattle–Tacoma International\""
    );

    let query: FlightQuery = serde_json::from_str(
        r#"{
            "carrier": "JetBlue Airways",
            "origin": "JFK - John F. Kennedy International",
            "destination": "SFO - San Francisco International",
            "weather": "Fog",
            "traffic": "Medium",
            "day_of_week": "Saturday",
            "month": 12,
            "hour": 6,
            "distance": 2586,
            "congestion_index": 75
        }"#,
    )
    .expect("well-formed query should deserialize");
    assert_eq!(query.carrier, Carrier::JetBlue);
    assert_eq!(query.day_of_week.model_index(), 7);

    // Labels outside the trained vocabulary never reach encoding
    let err = serde_json::from_str::<FlightQuery>(
        r#"{
            "carrier": "Acme Air",
            "origin": "JFK - John F. Kennedy International",
            "destination": "SFO - San Francisco International",
            "weather": "Fog",
            "traffic": "Medium",
            "day_of_week": "Saturday",
            "month": 12,
            "hour": 6,
            "distance": 2586,
            "congestion_index": 75
        }"#,
    );
    assert!(err.is_err(), "unknown carrier label must be rejected");
    println!("✓ vocabulary is closed at the serde boundary");
}

#[test]
fn test_alignment_length_for_every_day_and_weather() {
    println!("\n=== Test: Alignment Length ===");
    let schema = training_schema();
    for day in DayOfWeek::ALL {
        for weather in Weather::ALL {
            for traffic in Traffic::ALL {
                let query = FlightQuery {
                    day_of_week: day,
                    weather,
                    traffic,
                    ..base_query()
                };
                let vector = encode(&query, &schema).unwrap();
                assert_eq!(vector.len(), schema.len());
            }
        }
    }
    println!("✓ every valid query spans the full schema");
}
