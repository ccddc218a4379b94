use colored::Colorize;

use crate::safe_truncate;
use intake_types::ChatRequest;

/// Bodies longer than this are truncated in console dumps
pub const MAX_LOGGED_BODY_CHARS: usize = 5000;

/// Build the console dump of an outbound chat request
pub fn format_request_dump(url: &str, request: &ChatRequest) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "═".repeat(80).bright_cyan()));
    out.push_str(&format!("{}\n", "🔍 CHAT REQUEST DEBUG".bright_cyan().bold()));
    out.push_str(&format!("{}\n", "═".repeat(80).bright_cyan()));

    // Parse URL to show host and port
    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        out.push_str(&format!("{}: {}\n", "URL".bright_yellow(), url));
        out.push_str(&format!(
            "{}: {}\n",
            "Host".bright_yellow(),
            parsed_url.host_str().unwrap_or("unknown")
        ));
        out.push_str(&format!(
            "{}: {}\n",
            "Port".bright_yellow(),
            parsed_url
                .port_or_known_default()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        ));
    } else {
        out.push_str(&format!("{}: {}\n", "URL".bright_yellow(), url));
    }

    out.push_str(&format!("\n{}\n", "Headers:".bright_yellow()));
    out.push_str("  Content-Type: application/json\n");
    out.push_str("  Accept: application/json\n");

    out.push_str(&format!(
        "\n{}: {} turns\n",
        "History".bright_yellow(),
        request.history.len()
    ));

    out.push_str(&format!("\n{}\n", "Request Body:".bright_yellow()));
    match serde_json::to_string_pretty(request) {
        Ok(json) => out.push_str(&truncate_body(&json)),
        Err(e) => out.push_str(&format!("{}", format!("Error serializing request: {}", e).red())),
    }

    out.push_str(&format!("\n{}\n", "═".repeat(80).bright_cyan()));
    out
}

/// Build the console dump of an inbound response
pub fn format_response_dump(url: &str, status: reqwest::StatusCode, body: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "═".repeat(80).bright_green()));
    out.push_str(&format!("{}\n", "📥 RESPONSE DEBUG".bright_green().bold()));
    out.push_str(&format!("{}\n", "═".repeat(80).bright_green()));

    out.push_str(&format!("{}: {}\n", "URL".bright_yellow(), url));
    out.push_str(&format!(
        "{}: {} {}\n",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    ));

    out.push_str(&format!("\n{}\n", "Response Body:".bright_yellow()));
    // Try to pretty-print JSON, fall back to raw text
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok());
    match pretty {
        Some(pretty) => out.push_str(&truncate_body(&pretty)),
        None => out.push_str(&truncate_body(body)),
    }

    out.push_str(&format!("\n{}\n", "═".repeat(80).bright_green()));
    out
}

/// Log an outbound chat request.
///
/// The full dump goes to stderr only when `verbose` is set; otherwise a one-line
/// summary goes through `log` at debug level.
pub fn log_request(url: &str, request: &ChatRequest, verbose: bool) {
    if verbose {
        eprintln!("{}", format_request_dump(url, request));
    } else {
        log::debug!(
            "POST {} ({} chars, {} history turns)",
            url,
            request.message.chars().count(),
            request.history.len()
        );
    }
}

/// Log an inbound response, see [`log_request`]
pub fn log_response(url: &str, status: reqwest::StatusCode, body: &str, verbose: bool) {
    if verbose {
        eprintln!("{}", format_response_dump(url, status, body));
    } else {
        log::debug!("{} from {} ({} bytes)", status, url, body.len());
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_LOGGED_BODY_CHARS {
        format!(
            "{}\n\n{}",
            safe_truncate(body, MAX_LOGGED_BODY_CHARS),
            format!("... (truncated, total {} bytes)", body.len()).bright_black()
        )
    } else {
        body.to_string()
    }
}
