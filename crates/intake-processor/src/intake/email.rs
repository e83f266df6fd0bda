use std::fmt::Write;

use super::domain::IntakeRequest;

/// Renders administrator notification content from a validated record.
///
/// Both methods are pure: the same record always produces byte-identical
/// output, and no I/O happens here.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailFormatter;

impl EmailFormatter {
    pub fn subject(&self, record: &IntakeRequest) -> String {
        format!(
            "New Intake Request: {} - {}",
            record.process_requested, record.requestor_name
        )
    }

    /// Builds a self-contained HTML document describing the record. Every
    /// user-supplied value is entity-encoded before insertion.
    pub fn body(&self, record: &IntakeRequest) -> String {
        let mut html = String::with_capacity(2048);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
        html.push_str("body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }\n");
        html.push_str(".container { max-width: 600px; margin: 20px auto; padding: 20px; border: 1px solid #ddd; border-radius: 5px; }\n");
        html.push_str("h2 { color: #0066cc; border-bottom: 2px solid #0066cc; padding-bottom: 10px; }\n");
        html.push_str(".field { margin: 15px 0; }\n");
        html.push_str(".label { font-weight: bold; color: #555; }\n");
        html.push_str(".value { margin-left: 10px; }\n");
        html.push_str(".record-id { background-color: #f0f8ff; padding: 10px; border-left: 4px solid #0066cc; margin: 20px 0; }\n");
        html.push_str(".footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #888; }\n");
        html.push_str("</style>\n</head>\n<body>\n<div class='container'>\n");
        html.push_str("<h2>New Intake Request</h2>\n");
        html.push_str("<p>A new intake request has been received and requires your attention.</p>\n");

        let _ = write!(
            html,
            "<div class='record-id'><span class='label'>Record ID:</span> <span class='value'>{}</span></div>\n",
            encode(record.id.as_str())
        );

        push_field(&mut html, "Requestor Name", &encode(&record.requestor_name));

        let email = encode(&record.requestor_email);
        let _ = write!(
            html,
            "<div class='field'><span class='label'>Requestor Email:</span> <span class='value'><a href='mailto:{email}'>{email}</a></span></div>\n"
        );

        push_field(&mut html, "Job Title", &encode(&record.job_title));
        push_field(
            &mut html,
            "Process Requested",
            &encode(&record.process_requested),
        );

        let completion_date = record
            .required_completion_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        push_field(&mut html, "Required Completion Date", &completion_date);

        if let Some(comments) = record.comments.as_deref() {
            if !comments.trim().is_empty() {
                let _ = write!(
                    html,
                    "<div class='field'><span class='label'>Comments:</span>\
                     <div class='value' style='margin-top: 5px; padding: 10px; background-color: #f5f5f5; border-radius: 3px;'>{}</div></div>\n",
                    encode(comments)
                );
            }
        }

        html.push_str("<div class='footer'>\n");
        html.push_str("<p>This is an automated notification from the Intake Processor system.</p>\n");
        html.push_str("</div>\n</div>\n</body>\n</html>\n");

        html
    }
}

fn push_field(html: &mut String, label: &str, encoded_value: &str) {
    let _ = write!(
        html,
        "<div class='field'><span class='label'>{label}:</span> <span class='value'>{encoded_value}</span></div>\n"
    );
}

/// Minimal HTML entity encoding covering the characters that can break out of
/// markup or an attribute value.
fn encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            '"' => encoded.push_str("&quot;"),
            '\'' => encoded.push_str("&#39;"),
            _ => encoded.push(ch),
        }
    }
    encoded
}
