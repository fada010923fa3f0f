//! Best-effort progress side channel for long redraws.
//!
//! The render loop publishes into a [`ProgressState`] (lock-free atomics); a display thread
//! polls it with [`run_display`] and pushes `(label, percent)` pairs to a [`ProgressSink`].
//! Nothing here feeds back into the rendered pixels.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::time::Duration;

/// Stage index used for the background pass.
pub const BACKGROUND_STAGE: i64 = -1;

/// Receiver of progress updates.
pub trait ProgressSink: Send + Sync {
    fn update(&self, label: &str, percent: f32);

    /// Called after each batch of updates.
    fn flush(&self) {}

    /// Called once after the final update of a redraw.
    fn finish(&self) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&str, f32) + Send + Sync,
{
    fn update(&self, label: &str, percent: f32) {
        self(label, percent)
    }
}

/// Progress published by the render loop.
#[derive(Debug)]
pub struct ProgressState {
    shape_count: usize,
    stage: AtomicI64,
    current: AtomicU32,
    total: AtomicU32,
    done: AtomicBool,
}

/// A consistent-enough copy of [`ProgressState`] for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSnapshot {
    pub shape_count: usize,
    pub stage: i64,
    pub current: f32,
    pub total: f32,
    pub done: bool,
}

impl ProgressState {
    pub fn new(shape_count: usize) -> Self {
        Self {
            shape_count,
            stage: AtomicI64::new(BACKGROUND_STAGE),
            current: AtomicU32::new(0f32.to_bits()),
            total: AtomicU32::new(0f32.to_bits()),
            done: AtomicBool::new(false),
        }
    }

    /// Record that `scanned` of `area` pixels of `stage` are finished.
    ///
    /// The background is stage `-1`; shape `i` is stage `i`. Each stage is worth
    /// `1 / (shape_count + 1)` of the total.
    pub fn publish(&self, stage: i64, scanned: u64, area: u64) {
        let percent = if area == 0 {
            1.0
        } else {
            (scanned as f64 / area as f64) as f32
        };
        let stages = (self.shape_count + 1) as f32;
        let total = ((stage + 1) as f32 + percent) / stages;
        self.stage.store(stage, Ordering::Relaxed);
        self.current.store(percent.to_bits(), Ordering::Relaxed);
        self.total.store(total.min(1.0).to_bits(), Ordering::Relaxed);
    }

    pub fn finish(&self) {
        self.stage.store(self.shape_count as i64, Ordering::Relaxed);
        self.current.store(1f32.to_bits(), Ordering::Relaxed);
        self.total.store(1f32.to_bits(), Ordering::Relaxed);
        self.done.store(true, Ordering::Release);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let done = self.done.load(Ordering::Acquire);
        ProgressSnapshot {
            shape_count: self.shape_count,
            stage: self.stage.load(Ordering::Relaxed),
            current: f32::from_bits(self.current.load(Ordering::Relaxed)),
            total: f32::from_bits(self.total.load(Ordering::Relaxed)),
            done,
        }
    }
}

impl ProgressSnapshot {
    /// Label of the current-pass segment.
    pub fn current_label(&self) -> String {
        if self.done || self.stage >= self.shape_count as i64 {
            "current: done".to_string()
        } else if self.stage < 0 {
            "current: drawing background...".to_string()
        } else {
            format!(
                "current: drawing shapes... {}/{}",
                self.stage + 1,
                self.shape_count
            )
        }
    }

    fn push_to(&self, sink: &dyn ProgressSink) {
        sink.update(&self.current_label(), self.current);
        sink.update("total:", self.total);
        sink.flush();
    }
}

/// Poll `state` every `interval` until it is finished, forwarding each snapshot to `sink`.
///
/// Intended to run on its own thread; wake it early with `Thread::unpark` after
/// [`ProgressState::finish`].
pub fn run_display(state: &ProgressState, sink: &dyn ProgressSink, interval: Duration) {
    loop {
        let snap = state.snapshot();
        snap.push_to(sink);
        if snap.done {
            break;
        }
        std::thread::park_timeout(interval);
    }
    sink.finish();
}

/// Single-line text progress bar.
pub struct TextProgressBar<W: Write + Send> {
    out: Mutex<W>,
    width: usize,
    pending: Mutex<Vec<(String, f32)>>,
}

impl TextProgressBar<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> TextProgressBar<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            width: 20,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn bar(&self, percent: f32) -> String {
        let filled = ((percent.clamp(0.0, 1.0) * self.width as f32) as usize).min(self.width);
        format!("[{}{}]", "#".repeat(filled), " ".repeat(self.width - filled))
    }
}

impl<W: Write + Send> ProgressSink for TextProgressBar<W> {
    fn update(&self, label: &str, percent: f32) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push((label.to_string(), percent));
        }
    }

    fn flush(&self) {
        let segments: Vec<(String, f32)> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return,
        };
        let line = segments
            .iter()
            .map(|(label, pct)| format!("{label} {} {:5.1}%", self.bar(*pct), pct * 100.0))
            .collect::<Vec<_>>()
            .join("  ");
        if let Ok(mut out) = self.out.lock() {
            // Display output is cosmetic; write failures are ignored.
            let _ = write!(out, "\r\x1b[2K{line}");
            let _ = out.flush();
        }
    }

    fn finish(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out);
            let _ = out.flush();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;
