//! Routing of component interactions to live sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::platform::MessageRef;

/// Event delivered to a session's task.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A component on the bound message was activated.
    Component { actor_id: u64, component_id: String },
    /// External request to end the session.
    Stop,
}

/// Registry mapping a bound message to its session's event channel.
///
/// The lock guards only map operations and is never held across an await;
/// event delivery happens on a cloned sender.
#[derive(Clone, Default)]
pub struct InteractionRouter {
    sessions: Arc<Mutex<HashMap<u64, mpsc::Sender<SessionEvent>>>>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, message: MessageRef, events: mpsc::Sender<SessionEvent>) {
        self.sessions
            .lock()
            .unwrap()
            .insert(message.message_id, events);
    }

    pub(crate) fn unregister(&self, message: MessageRef) {
        self.sessions.lock().unwrap().remove(&message.message_id);
    }

    /// Routes a component interaction to the session bound to the message.
    ///
    /// Returns whether a live session consumed the event. A closed channel
    /// means the session ended without unregistering yet; the stale entry
    /// is dropped here.
    pub async fn dispatch(&self, message_id: u64, actor_id: u64, component_id: String) -> bool {
        let events = self.sessions.lock().unwrap().get(&message_id).cloned();

        let Some(events) = events else {
            return false;
        };

        let delivered = events
            .send(SessionEvent::Component {
                actor_id,
                component_id,
            })
            .await
            .is_ok();

        if !delivered {
            self.sessions.lock().unwrap().remove(&message_id);
        }

        delivered
    }

    #[cfg(test)]
    pub(crate) fn is_bound(&self, message_id: u64) -> bool {
        self.sessions.lock().unwrap().contains_key(&message_id)
    }
}
