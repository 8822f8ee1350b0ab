//! User-facing wording for failures

use shared::GatewayError;

/// Format a gateway failure with troubleshooting hints
pub fn describe_failure(error: &GatewayError) -> String {
    match error {
        GatewayError::MissingCredential => "No Gemini API key is configured. \
            Open Settings to add one, or set GEMINI_API_KEY before launching."
            .to_string(),
        GatewayError::Status { status: 401 | 403, .. } => format!(
            "The AI service rejected the API key - check it in Settings.\n\nError: {}",
            error
        ),
        GatewayError::Status { status: 429, .. } => format!(
            "The AI service is temporarily busy. Please wait a moment and try again.\n\nError: {}",
            error
        ),
        GatewayError::Status { .. } => format_error_message(&error.to_string()),
        GatewayError::Transport(_) => format!(
            "I'm having trouble connecting to the AI service. Please check your network connection.\n\nError: {}",
            error
        ),
        GatewayError::Parse(_) => format!(
            "The vision from this dimension was unreadable. Try again.\n\nError: {}",
            error
        ),
        GatewayError::Join(_) => format_error_message(&error.to_string()),
    }
}

pub fn format_error_message(error: &str) -> String {
    format!(
        "Sorry, I ran into an issue. Here's what happened:\n\n{}\n\n\
        If this keeps happening, try restarting the app.",
        error
    )
}
