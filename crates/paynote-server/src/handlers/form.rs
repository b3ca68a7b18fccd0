//! HTML form front end

use std::sync::Arc;

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::{AppState, MAX_MESSAGE_LEN};
use paynote_core::ExtractionResult;

/// Form body posted by the page
#[derive(Debug, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub message: String,
}

/// GET / - Empty form
pub async fn form_page() -> Html<String> {
    Html(render_page("", None))
}

/// POST / - Form plus the result table for the submitted message
pub async fn form_submit(
    State(state): State<Arc<AppState>>,
    Form(input): Form<FormInput>,
) -> Html<String> {
    let message = truncate_to_boundary(&input.message, MAX_MESSAGE_LEN);
    let result = state.snapshot().extractor.extract(message);
    Html(render_page(message, Some(&result)))
}

fn render_page(message: &str, result: Option<&ExtractionResult>) -> String {
    let mut html = String::from(PAGE_HEAD);

    html.push_str(r#"<form method="post" action="/">"#);
    html.push_str(r#"<label for="message">Enter the SMS message:</label>"#);
    html.push_str(&format!(
        r#"<textarea id="message" name="message" rows="5" required>{}</textarea>"#,
        escape_html(message)
    ));
    html.push_str(r#"<button type="submit">Extract</button></form>"#);

    if let Some(result) = result {
        html.push_str("<table>");
        for (label, value) in result.display_fields() {
            html.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                label,
                escape_html(&value)
            ));
        }
        html.push_str("</table>");
    }

    html.push_str("</main></body></html>");
    html
}

/// Escape text for HTML element content and attribute values
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Paynote</title>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 40rem; }
textarea { width: 100%; box-sizing: border-box; }
label, button { display: block; margin: 0.5rem 0; }
table { border-collapse: collapse; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.8rem; text-align: left; }
</style>
</head>
<body><main><h1>Paynote</h1>
"#;
