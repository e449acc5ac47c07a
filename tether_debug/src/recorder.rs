// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording and JSON-lines export.
//!
//! A [`Recorder`] hands out [`RecorderSink`]s that append to a shared log.
//! The sink moves into the handle's [`Tracer`]; the recorder stays with the
//! caller for inspection after (or during) the handle's lifetime.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use serde_json::{Value, json};
use tether_core::trace::{
    DisposeEvent, FrameSampleEvent, PollHaltedEvent, SubscribeEvent, TraceSink, Tracer,
    UpdateEvent, UpdateSource, WatcherFiringEvent,
};

use crate::pretty::{source_name, strategy_name};

/// One recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_subscribe`].
    Subscribe(SubscribeEvent),
    /// See [`TraceSink::on_update`].
    Update(UpdateEvent),
    /// See [`TraceSink::on_watcher_firing`].
    WatcherFiring(WatcherFiringEvent),
    /// See [`TraceSink::on_frame_sample`].
    FrameSample(FrameSampleEvent),
    /// See [`TraceSink::on_poll_halted`].
    PollHalted(PollHaltedEvent),
    /// See [`TraceSink::on_dispose`].
    Dispose(DisposeEvent),
}

impl RecordedEvent {
    /// The event as a JSON object with an `"event"` tag.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Subscribe(e) => json!({
                "event": "subscribe",
                "ancestors": e.ancestors,
                "scroll_listeners": e.scroll_listeners,
                "resize_listeners": e.resize_listeners,
                "watched_elements": e.watched_elements,
            }),
            Self::Update(e) => json!({
                "event": "update",
                "source": source_name(e.source),
            }),
            Self::WatcherFiring(e) => json!({
                "event": "watcher_firing",
                "firing": e.firing,
                "suppressed": e.suppressed,
            }),
            Self::FrameSample(e) => json!({
                "event": "frame_sample",
                "frame_index": e.frame_index,
                "x": e.rect.x0,
                "y": e.rect.y0,
                "width": e.rect.width(),
                "height": e.rect.height(),
                "changed": e.changed,
                "strategy": strategy_name(e.strategy),
            }),
            Self::PollHalted(e) => json!({
                "event": "poll_halted",
                "frame_index": e.frame_index,
            }),
            Self::Dispose(e) => json!({
                "event": "dispose",
                "listeners": e.listeners,
                "watcher": e.watcher,
                "trigger": e.trigger,
                "frame_loop": e.frame_loop,
            }),
        }
    }
}

type Log = Rc<RefCell<Vec<RecordedEvent>>>;

/// Shared in-memory event log.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Log,
}

impl Recorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a sink appending to this recorder.
    #[must_use]
    pub fn sink(&self) -> RecorderSink {
        RecorderSink {
            events: Rc::clone(&self.events),
        }
    }

    /// Returns a [`Tracer`] wrapping a new [`sink`](Self::sink).
    #[must_use]
    pub fn tracer(&self) -> Tracer {
        Tracer::new(self.sink())
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// The sources of every recorded update, in order.
    #[must_use]
    pub fn updates(&self) -> Vec<UpdateSource> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Update(e) => Some(e.source),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Discards every recorded event.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Writes one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_json_lines(&self, writer: &mut dyn Write) -> io::Result<()> {
        for event in self.events.borrow().iter() {
            serde_json::to_writer(&mut *writer, &event.to_json())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// The log as JSON lines.
    #[must_use]
    pub fn to_json_lines(&self) -> String {
        let mut out = String::new();
        for event in self.events.borrow().iter() {
            out.push_str(&event.to_json().to_string());
            out.push('\n');
        }
        out
    }
}

/// A [`TraceSink`] appending to a [`Recorder`].
pub struct RecorderSink {
    events: Log,
}

impl std::fmt::Debug for RecorderSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecorderSink")
            .field("recorded", &self.events.try_borrow().map(|e| e.len()).ok())
            .finish()
    }
}

impl RecorderSink {
    fn push(&self, event: RecordedEvent) {
        // A snapshot held across a callback would otherwise panic here.
        if let Ok(mut events) = self.events.try_borrow_mut() {
            events.push(event);
        }
    }
}

impl TraceSink for RecorderSink {
    fn on_subscribe(&mut self, e: &SubscribeEvent) {
        self.push(RecordedEvent::Subscribe(*e));
    }

    fn on_update(&mut self, e: &UpdateEvent) {
        self.push(RecordedEvent::Update(*e));
    }

    fn on_watcher_firing(&mut self, e: &WatcherFiringEvent) {
        self.push(RecordedEvent::WatcherFiring(*e));
    }

    fn on_frame_sample(&mut self, e: &FrameSampleEvent) {
        self.push(RecordedEvent::FrameSample(*e));
    }

    fn on_poll_halted(&mut self, e: &PollHaltedEvent) {
        self.push(RecordedEvent::PollHalted(*e));
    }

    fn on_dispose(&mut self, e: &DisposeEvent) {
        self.push(RecordedEvent::Dispose(*e));
    }
}
