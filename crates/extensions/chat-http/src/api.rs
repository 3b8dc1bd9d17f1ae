//! Chat service wire types.

use serde::{Deserialize, Serialize};
use sidekick_protocols::ChatMessage;

/// Body of `POST /chat_api/chat`.
#[derive(Debug, Serialize)]
pub struct ApiRequest<'a> {
    pub message: &'a str,
    pub conversation_history: &'a [ChatMessage],
}

/// Successful response body. Extra fields the service sends back
/// (such as its own copy of the history) are ignored.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_serialization() {
        let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello!")];
        let request = ApiRequest {
            message: "how are you?",
            conversation_history: &history,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "how are you?");
        assert_eq!(json["conversation_history"][0]["role"], "user");
        assert_eq!(json["conversation_history"][1]["content"], "hello!");
    }

    #[test]
    fn test_api_request_empty_history() {
        let request = ApiRequest {
            message: "<ACTIVITY ALERT: https://example.com>",
            conversation_history: &[],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["conversation_history"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_api_response_ignores_extra_fields() {
        let json = serde_json::json!({
            "reply": "Nice tab!",
            "conversation_history": [{"role": "user", "content": "x"}]
        });
        let response: ApiResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.reply, "Nice tab!");
    }

    #[test]
    fn test_api_response_missing_reply() {
        let json = serde_json::json!({"error": "An error occurred during the chat"});
        assert!(serde_json::from_value::<ApiResponse>(json).is_err());
    }
}
