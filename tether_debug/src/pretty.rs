// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tether_core::Rect;
use tether_core::trace::{
    DisposeEvent, FrameSampleEvent, PollHaltedEvent, SampleStrategy, SubscribeEvent, TraceSink,
    UpdateEvent, UpdateSource, WatcherFiringEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub(crate) fn source_name(source: UpdateSource) -> &'static str {
    match source {
        UpdateSource::Initial => "initial",
        UpdateSource::AncestorScroll => "ancestor-scroll",
        UpdateSource::AncestorResize => "ancestor-resize",
        UpdateSource::ElementResize => "element-resize",
        UpdateSource::AnimationFrame => "animation-frame",
    }
}

pub(crate) fn strategy_name(strategy: SampleStrategy) -> &'static str {
    match strategy {
        SampleStrategy::Intersection => "intersection",
        SampleStrategy::Direct => "direct",
    }
}

fn rect_fields(r: Rect) -> String {
    format!(
        "x={:.1} y={:.1} w={:.1} h={:.1}",
        r.x0,
        r.y0,
        r.width(),
        r.height()
    )
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_subscribe(&mut self, e: &SubscribeEvent) {
        let _ = writeln!(
            self.writer,
            "[subscribe] ancestors={} scroll={} resize={} watched={}",
            e.ancestors, e.scroll_listeners, e.resize_listeners, e.watched_elements,
        );
    }

    fn on_update(&mut self, e: &UpdateEvent) {
        let _ = writeln!(self.writer, "[update] source={}", source_name(e.source));
    }

    fn on_watcher_firing(&mut self, e: &WatcherFiringEvent) {
        let outcome = if e.suppressed { "dropped" } else { "passed" };
        let _ = writeln!(self.writer, "[watcher] firing={} {outcome}", e.firing);
    }

    fn on_frame_sample(&mut self, e: &FrameSampleEvent) {
        let changed = if e.changed { "CHANGED" } else { "same" };
        let _ = writeln!(
            self.writer,
            "[frame] index={} {} via={} {changed}",
            e.frame_index,
            rect_fields(e.rect),
            strategy_name(e.strategy),
        );
    }

    fn on_poll_halted(&mut self, e: &PollHaltedEvent) {
        let _ = writeln!(self.writer, "[halted] frame={}", e.frame_index);
    }

    fn on_dispose(&mut self, e: &DisposeEvent) {
        let _ = writeln!(
            self.writer,
            "[dispose] listeners={} watcher={} trigger={} frame_loop={}",
            e.listeners, e.watcher, e.trigger, e.frame_loop,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_frame_sample() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame_sample(&FrameSampleEvent {
            frame_index: 3,
            rect: Rect::new(10.0, 20.0, 110.0, 70.0),
            changed: true,
            strategy: SampleStrategy::Intersection,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[frame] index=3"), "got: {output}");
        assert!(output.contains("w=100.0 h=50.0"), "got: {output}");
        assert!(output.contains("via=intersection CHANGED"), "got: {output}");
    }

    #[test]
    fn one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_update(&UpdateEvent {
            source: UpdateSource::Initial,
        });
        sink.on_watcher_firing(&WatcherFiringEvent {
            firing: 0,
            suppressed: true,
        });
        sink.on_dispose(&DisposeEvent {
            listeners: 4,
            watcher: true,
            trigger: false,
            frame_loop: false,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[update] source=initial",
                "[watcher] firing=0 dropped",
                "[dispose] listeners=4 watcher=true trigger=false frame_loop=false",
            ]
        );
    }
}
