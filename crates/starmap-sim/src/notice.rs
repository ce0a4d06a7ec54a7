//! Transient on-screen messages with cancellable dismissal timers.

use serde::{Deserialize, Serialize};

use starmap_core::events::SceneEvent;

/// Handle for a scheduled dismissal. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissTimer {
    pub id: u64,
    pub fires_at_tick: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub timer: DismissTimer,
}

/// Holds at most one message and the timer that will clear it.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
    next_timer_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` for `duration` ticks, cancelling any pending timer first.
    pub fn show(
        &mut self,
        text: impl Into<String>,
        duration: u64,
        now: u64,
        events: &mut Vec<SceneEvent>,
    ) -> DismissTimer {
        if let Some(old) = self.current.take() {
            log::debug!("Cancelled notice timer {}", old.timer.id);
            events.push(SceneEvent::NoticeCancelled {
                timer_id: old.timer.id,
            });
        }
        self.next_timer_id += 1;
        let timer = DismissTimer {
            id: self.next_timer_id,
            fires_at_tick: now.saturating_add(duration),
        };
        let text = text.into();
        events.push(SceneEvent::NoticeShown {
            timer_id: timer.id,
            text: text.clone(),
        });
        self.current = Some(Notice { text, timer });
        timer
    }

    /// Fire `timer_id`. Only the timer of the current message can clear it.
    pub fn fire(&mut self, timer_id: u64, events: &mut Vec<SceneEvent>) -> bool {
        match &self.current {
            Some(notice) if notice.timer.id == timer_id => {
                self.current = None;
                events.push(SceneEvent::NoticeDismissed { timer_id });
                true
            }
            _ => false,
        }
    }

    /// Fire the pending timer if it is due.
    pub fn tick(&mut self, now: u64, events: &mut Vec<SceneEvent>) {
        let due = self
            .current
            .as_ref()
            .filter(|n| now >= n.timer.fires_at_tick)
            .map(|n| n.timer.id);
        if let Some(id) = due {
            self.fire(id, events);
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.text.as_str())
    }

    pub fn pending(&self) -> Option<DismissTimer> {
        self.current.as_ref().map(|n| n.timer)
    }
}
