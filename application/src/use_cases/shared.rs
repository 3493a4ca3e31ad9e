//! Shared utilities for use cases.
//!
//! Contains the bounded, retrying backend call used by delegated evaluators
//! and the consensus moderator.

use crate::config::CallPolicy;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use tag_quorum_domain::{DegradedReason, Model};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Send one prompt on a fresh session, retrying per `policy`.
///
/// Every attempt is bounded by `policy.timeout`. The reason of the last
/// failed attempt is returned once all attempts are used up.
pub(crate) async fn ask_backend<G: LlmGateway + ?Sized>(
    gateway: &G,
    model: &Model,
    system_prompt: &str,
    prompt: &str,
    policy: &CallPolicy,
    caller: &str,
) -> Result<String, DegradedReason> {
    let mut last_failure = DegradedReason::Timeout;

    for attempt in 1..=policy.attempts() {
        debug!(caller, attempt, model = %model, "Sending prompt to backend");

        match timeout(policy.timeout, send_once(gateway, model, system_prompt, prompt)).await {
            Ok(Ok(reply)) => return Ok(reply),
            Ok(Err(e)) => {
                warn!(caller, attempt, "Backend call failed: {}", e);
                last_failure = DegradedReason::Backend(e.to_string());
            }
            Err(_) => {
                warn!(
                    caller,
                    attempt,
                    "Backend call timed out after {:?}",
                    policy.timeout
                );
                last_failure = DegradedReason::Timeout;
            }
        }
    }

    Err(last_failure)
}

async fn send_once<G: LlmGateway + ?Sized>(
    gateway: &G,
    model: &Model,
    system_prompt: &str,
    prompt: &str,
) -> Result<String, GatewayError> {
    let session = gateway
        .create_session_with_system_prompt(model, system_prompt)
        .await?;
    session.send(prompt).await
}
