//! Request dispatch to the chatbot endpoint and failure classification.

use reqwest::header::ACCEPT;

use super::normalize::{self, NormalizeError};

/// Accept header sent with every chatbot request.
pub const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// Query parameter carrying the question.
pub const QUESTION_PARAM: &str = "user_input_question";

/// Number of characters of the body kept in debug logs.
const LOG_PREVIEW_CHARS: usize = 200;

const GENERIC_ERROR_TEXT: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Question is empty")]
    EmptyInput,
    #[error("Failed to fetch: {0}")]
    Network(String),
    #[error("HTTP error! status: {status} - {status_text}")]
    HttpStatus { status: u16, status_text: String },
    #[error("Empty response received from server")]
    EmptyResponse,
    #[error("Could not normalize response: {0}")]
    #[allow(dead_code)]
    Normalization(String),
    #[error("Request cancelled")]
    Cancelled,
}

impl DispatchError {
    /// Human-readable text shown in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Network(_) => {
                "Network error. Could not reach the chatbot server.".to_string()
            }
            DispatchError::HttpStatus { .. } => format!("Server error: {}", self),
            DispatchError::Cancelled => "Request cancelled.".to_string(),
            DispatchError::EmptyInput => "Please enter a question.".to_string(),
            DispatchError::EmptyResponse | DispatchError::Normalization(_) => {
                GENERIC_ERROR_TEXT.to_string()
            }
        }
    }
}

impl From<NormalizeError> for DispatchError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::EmptyResponse => DispatchError::EmptyResponse,
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Client for one resolved chatbot endpoint (upstream route or relay proxy).
#[derive(Debug, Clone)]
pub struct ChatbotClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatbotClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), endpoint)
    }

    pub fn with_http(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask one question and return the normalized answer.
    pub async fn fetch_answer(&self, question: &str) -> Result<String, DispatchError> {
        if question.trim().is_empty() {
            return Err(DispatchError::EmptyInput);
        }

        log::debug!("GET {} ({}={:?})", self.endpoint, QUESTION_PARAM, question);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[(QUESTION_PARAM, question)])
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Chatbot request failed: {}", e);
                DispatchError::Network(e.to_string())
            })?;

        let status = response.status();
        log::debug!("Response status: {}", status);
        if !status.is_success() {
            let err = DispatchError::HttpStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            };
            log::warn!("Chatbot returned {}", err);
            return Err(err);
        }

        let body = response.text().await.map_err(|e| {
            log::warn!("Failed to read chatbot response body: {}", e);
            DispatchError::Network(e.to_string())
        })?;
        log::debug!("Raw response length: {}", body.len());
        log::debug!("Raw response preview: {}", preview(&body));

        let answer = normalize::normalize(&body)?;
        Ok(answer)
    }
}

#[cfg(test)]
mod tests;
