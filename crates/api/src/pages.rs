//! HTML Pages

use axum::http::StatusCode;
use feature_engine::categories::GROUPS;
use feature_engine::ScalarField;
use once_cell::sync::Lazy;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Player Market Value</title>
<style>
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
label { display: block; margin-top: 0.6rem; }
input, select { width: 100%; padding: 0.3rem; }
.value { font-size: 2rem; font-weight: bold; }
</style>
</head>
<body>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_form() -> String {
    let mut html = String::from("<h1>Player Market Value</h1>\n");
    html.push_str("<form action=\"/predict\" method=\"post\">\n");

    for field in ScalarField::ALL {
        html.push_str(&format!(
            "<label>{name}<input name=\"{name}\" required></label>\n",
            name = field.name()
        ));
    }

    // Selects only offer categories the model has columns for
    for group in &GROUPS {
        html.push_str(&format!(
            "<label>{name}<select name=\"{name}\">\n",
            name = group.field
        ));
        for category in group.categories {
            let value = escape_html(category);
            html.push_str(&format!(
                "<option value=\"{}\">{}</option>\n",
                value,
                escape_html(&category.replace('+', " "))
            ));
        }
        html.push_str("</select></label>\n");
    }

    html.push_str("<p><button type=\"submit\">Predict</button></p>\n</form>\n");
    html
}

static LANDING_PAGE: Lazy<String> = Lazy::new(|| format!("{}{}{}", HEAD, render_form(), TAIL));

/// Landing page with the player form
pub fn landing_page() -> &'static str {
    &LANDING_PAGE
}

/// Prediction rounded to three decimals
pub fn format_prediction(prediction: f64) -> String {
    format!("{:.3}", prediction)
}

pub fn result_page(prediction: f64) -> String {
    format!(
        "{}<h1>Predicted market value</h1>\n\
         <p class=\"value\">{}</p>\n\
         <p><a href=\"/\">Predict another player</a></p>\n{}",
        HEAD,
        format_prediction(prediction),
        TAIL
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        "{}<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>\n{}",
        HEAD,
        status,
        escape_html(message),
        TAIL
    )
}
