//! Dispatcher tests against a local fake chatbot.

use crate::core::dispatch::{ACCEPT_VALUE, ChatbotClient, DispatchError};
use crate::core::normalize::NO_DATA_FALLBACK;
use crate::test_support::{spawn_fake_chatbot, unreachable_endpoint};

#[tokio::test]
async fn blank_question_is_rejected_without_request() {
    // Nothing listens here: reaching the network would yield Network, not EmptyInput.
    let client = ChatbotClient::new(unreachable_endpoint().await);
    assert_eq!(client.fetch_answer("").await, Err(DispatchError::EmptyInput));
    assert_eq!(
        client.fetch_answer("  \t").await,
        Err(DispatchError::EmptyInput)
    );
}

#[tokio::test]
async fn json_answer_is_normalized() {
    let client = ChatbotClient::new(spawn_fake_chatbot().await);
    assert_eq!(client.fetch_answer("capital").await.unwrap(), "Paris");
}

#[tokio::test]
async fn question_is_url_encoded() {
    let client = ChatbotClient::new(spawn_fake_chatbot().await);
    let answer = client.fetch_answer("what & why? 100%").await.unwrap();
    assert_eq!(answer, "echo: what & why? 100%");
}

#[tokio::test]
async fn request_sends_accept_header() {
    let client = ChatbotClient::new(spawn_fake_chatbot().await);
    assert_eq!(client.fetch_answer("accept").await.unwrap(), ACCEPT_VALUE);
}

#[tokio::test]
async fn plain_text_body_is_passed_through() {
    let client = ChatbotClient::new(spawn_fake_chatbot().await);
    assert_eq!(client.fetch_answer("plain").await.unwrap(), "just text");
}

#[tokio::test]
async fn unknown_json_shape_is_serialized() {
    let client = ChatbotClient::new(spawn_fake_chatbot().await);
    assert_eq!(
        client.fetch_answer("object").await.unwrap(),
        r#"{"data":{"x":1}}"#
    );
    assert_ne!(client.fetch_answer("object").await.unwrap(), NO_DATA_FALLBACK);
}

#[tokio::test]
async fn empty_body_is_empty_response() {
    let client = ChatbotClient::new(spawn_fake_chatbot().await);
    let err = client.fetch_answer("empty").await.unwrap_err();
    assert_eq!(err, DispatchError::EmptyResponse);
    assert_eq!(
        err.user_message(),
        "Something went wrong. Please try again later."
    );
    assert_eq!(
        client.fetch_answer("blank").await,
        Err(DispatchError::EmptyResponse)
    );
}

#[tokio::test]
async fn error_status_is_http_status_failure() {
    let client = ChatbotClient::new(spawn_fake_chatbot().await);
    let err = client.fetch_answer("down").await.unwrap_err();
    assert_eq!(
        err,
        DispatchError::HttpStatus {
            status: 503,
            status_text: "Service Unavailable".to_string()
        }
    );
    let text = err.user_message();
    assert!(text.contains("Server error"), "{text}");
    assert!(text.contains("503"), "{text}");
}

#[tokio::test]
async fn refused_connection_is_network_failure() {
    let client = ChatbotClient::new(unreachable_endpoint().await);
    let err = client.fetch_answer("hello").await.unwrap_err();
    assert!(matches!(err, DispatchError::Network(_)), "{err:?}");
    assert!(err.user_message().starts_with("Network error"));
}
