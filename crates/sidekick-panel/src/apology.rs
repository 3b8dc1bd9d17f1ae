//! User-facing text for failed chat requests.

use sidekick_protocols::DeliveryError;

const GENERIC: &str = "Sorry, there was an error processing your request.";
const UNAVAILABLE: &str =
    "Sorry, the chat service is not available right now. Please try again later.";
const UNREACHABLE: &str = "Unable to connect to the chat service. Please check your internet connection and try again.";
const INVALID_RESPONSE: &str =
    "Received an invalid response from the server. Please try again later.";

/// Apology shown in place of a reply when a user message could not be answered.
pub fn apology_for(error: &DeliveryError) -> &'static str {
    match error {
        DeliveryError::HttpStatus { status: 404, .. } => UNAVAILABLE,
        DeliveryError::HttpStatus { .. } => GENERIC,
        DeliveryError::Transport(_) => UNREACHABLE,
        DeliveryError::Decode(_) => INVALID_RESPONSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> DeliveryError {
        DeliveryError::HttpStatus {
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_not_found_means_unavailable() {
        assert!(apology_for(&status(404)).contains("not available"));
    }

    #[test]
    fn test_other_status_is_generic() {
        assert_eq!(apology_for(&status(500)), GENERIC);
        assert_eq!(apology_for(&status(400)), GENERIC);
    }

    #[test]
    fn test_transport_means_unreachable() {
        let err = DeliveryError::Transport("connection refused".to_string());
        assert!(apology_for(&err).starts_with("Unable to connect"));
    }

    #[test]
    fn test_decode_means_invalid_response() {
        let err = DeliveryError::Decode("expected value".to_string());
        assert!(apology_for(&err).contains("invalid response"));
    }
}
