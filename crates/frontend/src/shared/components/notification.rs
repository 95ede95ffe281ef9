//! Toast notifications for mutation results.
//!
//! ```rust,no_run
//! # use frontend::shared::components::notification::use_notifications;
//! # let e = "error";
//! let notifications = use_notifications();
//! notifications.success("Charge point updated");
//! notifications.error(format!("Failed: {}", e));
//! ```

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::TOAST_TIMEOUT_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl NotificationLevel {
    fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "toast toast--info",
            NotificationLevel::Success => "toast toast--success",
            NotificationLevel::Error => "toast toast--error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✕",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub level: NotificationLevel,
    pub message: String,
}

/// Ordered list of visible notifications, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    next_id: u32,
    items: Vec<Notification>,
}

impl NotificationQueue {
    /// Maximum number of toasts on screen; older ones are dropped.
    pub const CAPACITY: usize = 5;

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Notification {
            id,
            level,
            message: message.into(),
        });
        if self.items.len() > Self::CAPACITY {
            let overflow = self.items.len() - Self::CAPACITY;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u32) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct NotificationContext {
    queue: RwSignal<NotificationQueue>,
}

impl NotificationContext {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::default()),
        }
    }

    pub fn push(&self, level: NotificationLevel, message: impl Into<String>) {
        let mut id = 0;
        self.queue.update(|q| id = q.push(level, message));

        let queue = self.queue;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            queue.update(|q| q.dismiss(id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    pub fn dismiss(&self, id: u32) {
        self.queue.update(|q| q.dismiss(id));
    }
}

impl Default for NotificationContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationContext {
    use_context::<NotificationContext>().expect("NotificationContext not provided")
}

/// Renders the toast stack in the bottom-right corner.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let ctx = use_notifications();

    view! {
        <div class="toast-stack">
            <For
                each=move || ctx.queue.with(|q| q.items().to_vec())
                key=|n| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class=n.level.css_class() role="status">
                            <span class="toast__icon">{n.level.icon()}</span>
                            <span class="toast__message">{n.message.clone()}</span>
                            <button class="toast__close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_dismiss_removes_one() {
        let mut queue = NotificationQueue::default();
        let a = queue.push(NotificationLevel::Success, "saved");
        let b = queue.push(NotificationLevel::Error, "failed");
        assert_ne!(a, b);

        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].message, "failed");
    }

    #[test]
    fn oldest_toasts_are_dropped_over_capacity() {
        let mut queue = NotificationQueue::default();
        for i in 0..7 {
            queue.push(NotificationLevel::Info, format!("n{}", i));
        }
        let messages: Vec<_> = queue.items().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4", "n5", "n6"]);
    }
}
