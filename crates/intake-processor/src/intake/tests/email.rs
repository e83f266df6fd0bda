use chrono::NaiveDate;

use super::common::*;
use crate::intake::email::EmailFormatter;

#[test]
fn subject_interpolates_process_and_requestor() {
    let record = valid_record("rec-042");
    let subject = EmailFormatter.subject(&record);
    assert_eq!(subject, "New Intake Request: Onboarding - Dana Field");
}

#[test]
fn body_contains_every_field_block_in_order() {
    let mut record = valid_record("rec-042");
    record.required_completion_date = NaiveDate::from_ymd_opt(2026, 4, 2);
    let body = EmailFormatter.body(&record);

    let labels = [
        "Record ID:",
        "Requestor Name:",
        "Requestor Email:",
        "Job Title:",
        "Process Requested:",
        "Required Completion Date:",
    ];
    let mut cursor = 0;
    for label in labels {
        let position = body[cursor..]
            .find(label)
            .unwrap_or_else(|| panic!("label '{label}' missing or out of order"));
        cursor += position;
    }

    assert!(body.contains("2026-04-02"));
    assert!(body.contains("mailto:dana.field@example.com"));
    assert!(body.starts_with("<!DOCTYPE html>"));
}

#[test]
fn markup_in_user_fields_is_entity_encoded() {
    let mut record = valid_record("rec-042");
    record.comments = Some("<script>alert('x')</script> & more".to_string());
    record.requestor_name = "Dana \"The Fixer\" Field".to_string();
    let body = EmailFormatter.body(&record);

    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    assert!(body.contains("Dana &quot;The Fixer&quot; Field"));
}

#[test]
fn comments_block_is_omitted_when_empty() {
    let mut record = valid_record("rec-042");
    record.comments = None;
    assert!(!EmailFormatter.body(&record).contains("Comments:"));

    record.comments = Some("   ".to_string());
    assert!(!EmailFormatter.body(&record).contains("Comments:"));

    record.comments = Some("expedite please".to_string());
    let body = EmailFormatter.body(&record);
    assert!(body.contains("Comments:"));
    assert!(body.contains("expedite please"));
}

#[test]
fn rendering_is_deterministic() {
    let record = valid_record("rec-042");
    assert_eq!(EmailFormatter.subject(&record), EmailFormatter.subject(&record));
    assert_eq!(EmailFormatter.body(&record), EmailFormatter.body(&record));
}
