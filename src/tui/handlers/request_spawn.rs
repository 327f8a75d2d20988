//! Spawns chatbot requests in a background thread with a result channel.

use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::chat_log::MessageId;
use crate::core::dispatch::{ChatbotClient, DispatchError};

use super::PendingRequest;

/// Spawn a request for `question`. The answer is delivered on `result_rx`.
pub fn spawn_request(
    rt: &Arc<Runtime>,
    client: ChatbotClient,
    placeholder: MessageId,
    question: String,
) -> PendingRequest {
    let (result_tx, result_rx) = mpsc::channel();
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        let result = rt_clone.block_on(async {
            tokio::select! {
                _ = cancel_token_clone.cancelled() => Err(DispatchError::Cancelled),
                answer = client.fetch_answer(&question) => answer,
            }
        });
        let _ = result_tx.send(result);
    });

    PendingRequest {
        placeholder,
        result_rx,
        cancel_token,
    }
}
