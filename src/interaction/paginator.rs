//! Paginated interactive view bound to one message.
//!
//! The session slices its collection into pages once, renders each page
//! through a caller-supplied formatter, and edits the bound message in
//! place as the actor navigates. Control dispatch is table-driven by
//! component id: the built-in navigation and stop bindings plus any
//! caller-attached custom controls.

use serenity::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::AppError;
use crate::interaction::page::{NavState, NavTarget, PageSet};
use crate::interaction::router::{InteractionRouter, SessionEvent};
use crate::interaction::DEFAULT_SESSION_TIMEOUT;
use crate::platform::{
    ButtonStyle, ChannelRef, ChatPlatform, Component, MessageRef, RenderedPage,
};

pub const CONTROL_FIRST: &str = "first";
pub const CONTROL_PREVIOUS: &str = "previous";
pub const CONTROL_STOP: &str = "stop";
pub const CONTROL_NEXT: &str = "next";
pub const CONTROL_LAST: &str = "last";

/// Position information handed to the formatter, 1-based for display.
#[derive(Clone, Copy, Debug)]
pub struct PageContext {
    pub page: usize,
    pub page_count: usize,
}

/// Projects one page of items into rendered output.
///
/// Must handle an empty slice: an empty collection still renders one page.
#[async_trait]
pub trait PageFormatter<T>: Send + Sync {
    async fn format_page(&self, items: &[T], page: PageContext) -> RenderedPage;
}

/// Outcome of a custom control activation.
pub struct ControlOutcome {
    /// Replacement content for the bound message, if any.
    pub replace: Option<RenderedPage>,
    /// Whether the session should end after this activation.
    pub terminal: bool,
}

/// Caller-attached behavior behind a custom control.
#[async_trait]
pub trait ControlHandler: Send {
    async fn activate(&mut self, actor_id: u64) -> Result<ControlOutcome, AppError>;
}

/// Builder for a paginated view session.
pub struct PaginatorBuilder<T> {
    items: Vec<T>,
    formatter: Arc<dyn PageFormatter<T>>,
    per_page: usize,
    timeout: Duration,
    bound_actor: Option<u64>,
    extras: Vec<(Component, Box<dyn ControlHandler>)>,
}

impl<T: Send + Sync + 'static> PaginatorBuilder<T> {
    pub fn new(items: Vec<T>, formatter: Arc<dyn PageFormatter<T>>) -> Self {
        Self {
            items,
            formatter,
            per_page: 1,
            timeout: DEFAULT_SESSION_TIMEOUT,
            bound_actor: None,
            extras: Vec::new(),
        }
    }

    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Restricts navigation to one actor; interactions from anyone else
    /// are ignored.
    pub fn bound_to(mut self, actor_id: u64) -> Self {
        self.bound_actor = Some(actor_id);
        self
    }

    /// Attaches a custom control dispatched by its component id.
    pub fn control(mut self, component: Component, handler: Box<dyn ControlHandler>) -> Self {
        self.extras.push((component, handler));
        self
    }

    /// Sends the first page and spawns the session task.
    pub async fn start(
        self,
        platform: Arc<dyn ChatPlatform>,
        router: &InteractionRouter,
        channel: ChannelRef,
    ) -> Result<PaginatorHandle, AppError> {
        let pages = PageSet::build(self.items, self.per_page)?;
        let nav = NavState::new(pages.page_count());

        let content = self
            .formatter
            .format_page(
                pages.page(0),
                PageContext {
                    page: 1,
                    page_count: pages.page_count(),
                },
            )
            .await;

        let mut extra_components = Vec::new();
        let mut handlers: HashMap<String, Box<dyn ControlHandler>> = HashMap::new();
        for (component, handler) in self.extras {
            handlers.insert(component.id().to_string(), handler);
            extra_components.push(component);
        }

        let controls = nav_controls(&nav, false, &extra_components);
        let message = platform.send_message(channel, &content, &controls).await?;

        let (events_tx, events_rx) = mpsc::channel(16);
        router.register(message, events_tx.clone());

        let session = PaginatorSession {
            platform,
            router: router.clone(),
            message,
            pages,
            nav,
            formatter: self.formatter,
            bound_actor: self.bound_actor,
            timeout: self.timeout,
            handlers,
            extra_components,
        };
        tokio::spawn(session.run(events_rx));

        Ok(PaginatorHandle {
            message,
            events: events_tx,
        })
    }
}

/// Handle to a running paginated view.
pub struct PaginatorHandle {
    pub message: MessageRef,
    events: mpsc::Sender<SessionEvent>,
}

impl PaginatorHandle {
    /// Asks the session to stop. Safe to call after it already ended.
    pub async fn stop(&self) {
        let _ = self.events.send(SessionEvent::Stop).await;
    }
}

/// How a session run ended, deciding the final state of the bound message.
enum SessionEnd {
    /// Explicit stop: keep the last render, strip the controls.
    Stopped,
    /// Inactivity: keep the last render, disable every control.
    TimedOut,
    /// A terminal control already wrote the final message state.
    Completed,
    /// The event channel closed without a stop; nothing left to edit.
    Detached,
}

enum Handled {
    Accepted,
    Ignored,
    End(SessionEnd),
}

struct PaginatorSession<T> {
    platform: Arc<dyn ChatPlatform>,
    router: InteractionRouter,
    message: MessageRef,
    pages: PageSet<T>,
    nav: NavState,
    formatter: Arc<dyn PageFormatter<T>>,
    bound_actor: Option<u64>,
    timeout: Duration,
    handlers: HashMap<String, Box<dyn ControlHandler>>,
    extra_components: Vec<Component>,
}

impl<T: Send + Sync + 'static> PaginatorSession<T> {
    async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) {
        let mut deadline = Instant::now() + self.timeout;

        let end = loop {
            tokio::select! {
                event = events.recv() => match event {
                    None => break SessionEnd::Detached,
                    Some(SessionEvent::Stop) => break SessionEnd::Stopped,
                    Some(SessionEvent::Component { actor_id, component_id }) => {
                        match self.handle(actor_id, &component_id).await {
                            // The inactivity window resets only on accepted
                            // interactions.
                            Handled::Accepted => deadline = Instant::now() + self.timeout,
                            Handled::Ignored => {}
                            Handled::End(end) => break end,
                        }
                    }
                },
                _ = tokio::time::sleep_until(deadline) => break SessionEnd::TimedOut,
            }
        };

        self.finish(end).await;
    }

    async fn handle(&mut self, actor_id: u64, component_id: &str) -> Handled {
        if let Some(bound) = self.bound_actor {
            if actor_id != bound {
                tracing::debug!(
                    "Ignoring interaction from {} on session bound to {}",
                    actor_id,
                    bound
                );
                return Handled::Ignored;
            }
        }

        let target = match component_id {
            CONTROL_FIRST => Some(NavTarget::First),
            CONTROL_PREVIOUS => Some(NavTarget::Previous),
            CONTROL_NEXT => Some(NavTarget::Next),
            CONTROL_LAST => Some(NavTarget::Last),
            CONTROL_STOP => return Handled::End(SessionEnd::Stopped),
            _ => None,
        };

        if let Some(target) = target {
            return self.navigate(target).await;
        }

        if self.handlers.contains_key(component_id) {
            return self.activate_custom(actor_id, component_id).await;
        }

        tracing::debug!("Unknown component id {} on paginated view", component_id);
        Handled::Ignored
    }

    async fn navigate(&mut self, target: NavTarget) -> Handled {
        let Some(next) = self.nav.resolve(target) else {
            tracing::debug!("Rejected out-of-range navigation {:?}", target);
            return Handled::Ignored;
        };

        let content = self
            .formatter
            .format_page(
                self.pages.page(next),
                PageContext {
                    page: next + 1,
                    page_count: self.pages.page_count(),
                },
            )
            .await;
        let controls = self.controls_for(next, false);

        // Commit the index only after the edit succeeds, so a failed edit
        // leaves the session on the page the message still shows.
        match self
            .platform
            .edit_message(self.message, &content, &controls)
            .await
        {
            Ok(()) => {
                self.nav.set_index(next);
                Handled::Accepted
            }
            Err(err) => {
                tracing::warn!("Failed to edit paginated view: {}", err);
                Handled::Ignored
            }
        }
    }

    async fn activate_custom(&mut self, actor_id: u64, component_id: &str) -> Handled {
        let handler = self
            .handlers
            .get_mut(component_id)
            .expect("checked by caller");

        let outcome = match handler.activate(actor_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("Custom control {} failed: {}", component_id, err);
                return Handled::Ignored;
            }
        };

        if let Some(content) = outcome.replace {
            let controls = if outcome.terminal {
                Vec::new()
            } else {
                self.controls_for(self.nav.index(), false)
            };
            if let Err(err) = self
                .platform
                .edit_message(self.message, &content, &controls)
                .await
            {
                tracing::warn!("Failed to apply control outcome: {}", err);
            }
            if outcome.terminal {
                return Handled::End(SessionEnd::Completed);
            }
        } else if outcome.terminal {
            return Handled::End(SessionEnd::Stopped);
        }

        Handled::Accepted
    }

    fn controls_for(&self, index: usize, all_disabled: bool) -> Vec<Component> {
        let mut nav = self.nav;
        nav.set_index(index);
        nav_controls(&nav, all_disabled, &self.extra_components)
    }

    async fn finish(self, end: SessionEnd) {
        self.router.unregister(self.message);

        let context = PageContext {
            page: self.nav.index() + 1,
            page_count: self.pages.page_count(),
        };

        match end {
            SessionEnd::Stopped => {
                let content = self
                    .formatter
                    .format_page(self.pages.page(self.nav.index()), context)
                    .await;
                if let Err(err) = self.platform.edit_message(self.message, &content, &[]).await {
                    tracing::debug!("Failed to strip controls on stop: {}", err);
                }
            }
            SessionEnd::TimedOut => {
                let content = self
                    .formatter
                    .format_page(self.pages.page(self.nav.index()), context)
                    .await;
                let controls = self.controls_for(self.nav.index(), true);
                // The message may be gone by now; expiry is best-effort.
                if let Err(err) = self
                    .platform
                    .edit_message(self.message, &content, &controls)
                    .await
                {
                    tracing::debug!("Failed to disable controls on timeout: {}", err);
                }
            }
            SessionEnd::Completed | SessionEnd::Detached => {}
        }
    }
}

/// Builds the navigation control row for the given position.
///
/// First/previous are disabled on the first page and next/last on the
/// final page, which disables all four on a single-page view while the
/// stop control and any custom controls stay active.
fn nav_controls(nav: &NavState, all_disabled: bool, extras: &[Component]) -> Vec<Component> {
    let mut controls = vec![
        Component::button(CONTROL_FIRST, "<<", ButtonStyle::Secondary),
        Component::button(CONTROL_PREVIOUS, "<", ButtonStyle::Secondary),
        Component::button(CONTROL_STOP, "■", ButtonStyle::Danger),
        Component::button(CONTROL_NEXT, ">", ButtonStyle::Secondary),
        Component::button(CONTROL_LAST, ">>", ButtonStyle::Secondary),
    ];

    controls[0].set_disabled(all_disabled || nav.at_first());
    controls[1].set_disabled(all_disabled || nav.at_first());
    controls[2].set_disabled(all_disabled);
    controls[3].set_disabled(all_disabled || nav.at_last());
    controls[4].set_disabled(all_disabled || nav.at_last());

    for extra in extras {
        let mut component = extra.clone();
        if all_disabled {
            component.set_disabled(true);
        }
        controls.push(component);
    }

    controls
}
