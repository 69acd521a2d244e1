//! One-shot yes/no gate bound to a single actor.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::error::AppError;
use crate::interaction::router::{InteractionRouter, SessionEvent};
use crate::platform::{
    ButtonStyle, ChannelRef, ChatPlatform, Component, MessageRef, RenderedPage,
};

pub const CONTROL_CONFIRM: &str = "confirm";
pub const CONTROL_DENY: &str = "deny";

/// Lifecycle of a confirmation session.
///
/// Exactly one transition out of `Pending` is valid; every event after
/// resolution or expiry is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Pending,
    Resolved(bool),
    Expired,
}

impl ConfirmState {
    /// Applies a response. Returns whether it was accepted.
    pub fn respond(&mut self, choice: bool) -> bool {
        match self {
            ConfirmState::Pending => {
                *self = ConfirmState::Resolved(choice);
                true
            }
            _ => false,
        }
    }

    /// Marks the session expired. Returns whether the state changed.
    pub fn expire(&mut self) -> bool {
        match self {
            ConfirmState::Pending => {
                *self = ConfirmState::Expired;
                true
            }
            _ => false,
        }
    }
}

pub struct Confirmation;

impl Confirmation {
    /// Sends `prompt` with confirm/deny controls answerable only by
    /// `actor_id` and spawns the session task.
    pub async fn start(
        platform: Arc<dyn ChatPlatform>,
        router: &InteractionRouter,
        channel: ChannelRef,
        actor_id: u64,
        prompt: RenderedPage,
        timeout: Duration,
    ) -> Result<ConfirmationHandle, AppError> {
        let controls = confirm_controls(false);
        let message = platform.send_message(channel, &prompt, &controls).await?;

        let (events_tx, events_rx) = mpsc::channel(16);
        router.register(message, events_tx);

        let (decision_tx, decision_rx) = oneshot::channel();

        let session = ConfirmSession {
            platform,
            router: router.clone(),
            message,
            actor_id,
            prompt,
            timeout,
        };
        tokio::spawn(session.run(events_rx, decision_tx));

        Ok(ConfirmationHandle {
            message,
            decision: decision_rx,
        })
    }
}

/// Handle to a pending confirmation.
pub struct ConfirmationHandle {
    pub message: MessageRef,
    decision: oneshot::Receiver<bool>,
}

impl ConfirmationHandle {
    /// Waits for the actor's decision.
    ///
    /// Expiry without a response resolves to `false`, exactly like an
    /// explicit deny; the caller cannot tell the two apart. This is a
    /// deliberate simplification: the "never answered" case is folded
    /// into the safe default rather than propagated as a third outcome.
    pub async fn await_decision(self) -> bool {
        self.decision.await.unwrap_or(false)
    }
}

struct ConfirmSession {
    platform: Arc<dyn ChatPlatform>,
    router: InteractionRouter,
    message: MessageRef,
    actor_id: u64,
    prompt: RenderedPage,
    timeout: Duration,
}

impl ConfirmSession {
    async fn run(self, mut events: mpsc::Receiver<SessionEvent>, decision_tx: oneshot::Sender<bool>) {
        let deadline = Instant::now() + self.timeout;
        let mut state = ConfirmState::Pending;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    None => {
                        state.expire();
                        break;
                    }
                    Some(SessionEvent::Stop) => {
                        state.expire();
                        break;
                    }
                    Some(SessionEvent::Component { actor_id, component_id }) => {
                        if actor_id != self.actor_id {
                            tracing::debug!(
                                "Ignoring response from {} on confirmation bound to {}",
                                actor_id,
                                self.actor_id
                            );
                            continue;
                        }
                        let choice = match component_id.as_str() {
                            CONTROL_CONFIRM => true,
                            CONTROL_DENY => false,
                            _ => continue,
                        };
                        if state.respond(choice) {
                            break;
                        }
                    }
                },
                _ = tokio::time::sleep_until(deadline) => {
                    state.expire();
                    break;
                }
            }
        }

        self.router.unregister(self.message);

        // Disable both controls in the final render; the message may
        // already be gone.
        let controls = confirm_controls(true);
        if let Err(err) = self
            .platform
            .edit_message(self.message, &self.prompt, &controls)
            .await
        {
            tracing::debug!("Failed to disable confirmation controls: {}", err);
        }

        let _ = decision_tx.send(matches!(state, ConfirmState::Resolved(true)));
    }
}

fn confirm_controls(disabled: bool) -> Vec<Component> {
    let mut controls = vec![
        Component::button(CONTROL_CONFIRM, "Confirm", ButtonStyle::Primary),
        Component::button(CONTROL_DENY, "Deny", ButtonStyle::Danger),
    ];
    for control in &mut controls {
        control.set_disabled(disabled);
    }
    controls
}
