// Integration tests for fieldscore
use fieldscore::prelude::*;
use fieldscore::FieldKind;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_schema() -> SchemaDescriptor {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("email_analysis.schema.json");
    SchemaDescriptor::from_path(path).unwrap()
}

fn ground_truth() -> Value {
    json!({
        "email_id": "EM-1042",
        "subject": "Honeymoon in Bali - booking question",
        "sender_email": "ana@example.com",
        "recipient_email": ["bookings@acai.travel"],
        "primary_purpose": "booking_inquiry",
        "secondary_purposes": ["customer_support"],
        "booking_type": "new_reservation",
        "support_type": "other",
        "language_detected": "en",
        "services_mentioned": {
            "flights": true, "hotels": true, "car_rental": false, "tours": true,
            "insurance": false, "visa_services": false, "transfers": true, "activities": false
        },
        "monetary_references": {"currency": "EUR", "mentioned_amount": 5000.0, "price_sensitivity": 0.4},
        "competitor_mentions": [],
        "sentiment": {"overall_tone": "very_positive", "urgency": "urgent", "satisfaction_score": 0.9},
        "trip_details": {
            "destination": "Bali",
            "alternative_destinations": ["Maldives"],
            "travel_dates": ["2025-05-10", "2025-05-24"],
            "flexibility": true,
            "group_size": 2,
            "duration": 14,
            "travel_type": "honeymoon",
            "budget_range": "luxury",
            "special_requirements": [],
            "accessibility_needs": []
        },
        "priority_score": 0.7,
        "contains_sensitive_data": false,
        "gdpr_relevant": true,
        "requires_immediate_attention": false,
        "confidence_score": 0.95,
        "follow_up_required": true,
        "received_at": "2025-01-15T09:30:00Z"
    })
}

#[test]
fn test_schema_fixture_introspection() {
    let index = SchemaIndex::build(&fixture_schema()).unwrap();

    assert_eq!(index.kind("trip_details.group_size"), Some(FieldKind::Numeric));
    assert_eq!(index.kind("services_mentioned.hotels"), Some(FieldKind::Boolean));
    assert_eq!(index.kind("competitor_mentions"), Some(FieldKind::List));
    assert_eq!(index.kind("received_at"), Some(FieldKind::Timestamp));

    let soft: Vec<&str> = index.soft_fields().into_iter().map(|(p, _)| p).collect();
    assert_eq!(
        soft,
        vec![
            "booking_type",
            "primary_purpose",
            "sentiment.overall_tone",
            "sentiment.urgency",
            "support_type",
            "trip_details.travel_type",
        ]
    );
    assert_eq!(index.soft_enum("sentiment.urgency").unwrap().cardinality(), 4);
}

#[test]
fn test_reflexive_comparison() {
    let comparator = Comparator::new(&fixture_schema()).unwrap();
    let report = comparator.evaluate(ground_truth(), ground_truth()).unwrap();

    assert_eq!(report.overall_accuracy, 1.0);
    assert!(report.field_accuracies.values().all(|s| *s == 1.0));
    assert!(report.field_accuracies.contains_key("trip_details.travel_type"));
    assert!(report.field_accuracies.contains_key("services_mentioned.activities"));
}

#[test]
fn test_realistic_prediction() {
    let comparator = Comparator::new(&fixture_schema()).unwrap();

    let mut predicted = ground_truth();
    predicted["sentiment"]["overall_tone"] = json!("neutral");
    predicted["sentiment"]["urgency"] = json!("immediate");
    predicted["monetary_references"]["mentioned_amount"] = json!(4000.0);
    predicted["recipient_email"] = json!(["bookings@acai.travel", "info@acai.travel"]);
    predicted["received_at"] = json!("2025-01-15T15:30:00Z");
    predicted["gdpr_relevant"] = json!(false);
    predicted["trip_details"]
        .as_object_mut()
        .unwrap()
        .remove("duration");
    predicted["model_notes"] = json!("not part of the truth");

    let report = comparator.evaluate(predicted, ground_truth()).unwrap();
    let f = &report.field_accuracies;

    assert!((f["sentiment.overall_tone"] - 0.5).abs() < 1e-9);
    assert!((f["sentiment.urgency"] - 2.0 / 3.0).abs() < 1e-9);
    assert!((f["monetary_references.mentioned_amount"] - 0.8).abs() < 1e-9);
    assert!((f["recipient_email"] - 0.5).abs() < 1e-9);
    assert!((f["received_at"] - 0.75).abs() < 1e-9);
    assert_eq!(f["gdpr_relevant"], 0.0);
    assert_eq!(f["trip_details.duration"], 0.0);
    assert!(!f.contains_key("model_notes"));

    let mean = f.values().sum::<f64>() / f.len() as f64;
    assert!((report.overall_accuracy - mean).abs() < 1e-12);
    assert!(report.overall_accuracy < 1.0 && report.overall_accuracy > 0.0);
}

#[test]
fn test_csv_quoted_inputs() {
    let comparator = Comparator::new(&fixture_schema()).unwrap();

    let truth_text = ground_truth().to_string();
    let quoted = format!("\"{}\"", truth_text.replace('"', "\"\""));

    let report = comparator.evaluate(quoted, truth_text).unwrap();
    assert_eq!(report.overall_accuracy, 1.0);
}

#[test]
fn test_report_log_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join(fieldscore::DEFAULT_LOG_FILE);
    let log = Arc::new(ReportLog::new(&log_path));
    let comparator = Comparator::new(&fixture_schema()).unwrap().with_sink(log.clone());

    let mut wrong = ground_truth();
    wrong["primary_purpose"] = json!("other");

    comparator.compare(ground_truth(), ground_truth()).unwrap();
    comparator.compare(wrong, ground_truth()).unwrap();
    assert!(comparator.compare("{oops", ground_truth()).is_err());

    let reports = log.read_reports().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].overall_accuracy, 1.0);
    assert_eq!(reports[1].field_accuracies["primary_purpose"], 0.0);

    let summary = BatchSummary::compute(&reports);
    assert_eq!(summary.reports_count, 2);
    assert_eq!(summary.weakest_field.as_deref(), Some("primary_purpose"));
}

#[test]
fn test_log_failure_keeps_report() {
    let dir = tempfile::tempdir().unwrap();
    // Appending to a directory fails
    let comparator = Comparator::new(&fixture_schema())
        .unwrap()
        .with_sink(Arc::new(ReportLog::new(dir.path())));

    let err = comparator.compare(ground_truth(), ground_truth()).unwrap_err();
    let report = err.into_report().unwrap();
    assert_eq!(report.overall_accuracy, 1.0);
}

#[test]
fn test_comparator_shared_across_threads() {
    let sink = Arc::new(MemorySink::new());
    let comparator = Comparator::new(&fixture_schema()).unwrap().with_sink(sink.clone());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let comparator = &comparator;
            scope.spawn(move || {
                let report = comparator.evaluate(ground_truth(), ground_truth()).unwrap();
                assert_eq!(report.overall_accuracy, 1.0);
            });
        }
    });

    // evaluate never records
    assert!(sink.is_empty());
}
