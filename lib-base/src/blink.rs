// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use beacon_hid::{Color, ColorDriver, LightError};
use log::{debug, error};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::timeout;

/// Generation value meaning "only the command path may write"
const GEN_NONE: u64 = 0;

/// One blink pattern, immutable once constructed
#[derive(Debug, Clone)]
pub struct BlinkSpec {
    pub color: Color,
    pub on_duration: Duration,
    pub off_duration: Duration,
    pub count: i32,
}

impl BlinkSpec {
    /// Negative durations are clamped to zero. `count <= 0` blinks until
    /// stopped or superseded.
    pub fn new(color: Color, on_ms: i64, off_ms: i64, count: i32) -> Self {
        Self {
            color,
            on_duration: Duration::from_millis(on_ms.max(0) as u64),
            off_duration: Duration::from_millis(off_ms.max(0) as u64),
            count,
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.count <= 0
    }
}

/// Handle to the running blink generation, held while it is current
struct ActiveBlink {
    id: u64,
    cancel: watch::Sender<bool>,
}

struct Inner {
    driver: ColorDriver,
    /// Current generation. Locked for the whole supersede-and-act sequence of
    /// every command, which serializes command handling.
    current: Mutex<Option<ActiveBlink>>,
    /// Generation currently allowed to write to the light
    write_gen: AtomicU64,
    next_gen: AtomicU64,
}

impl Inner {
    /// Cancel the current generation, if any. Signal-only: never waits for
    /// the superseded loop to unwind.
    fn supersede(&self, current: &mut Option<ActiveBlink>) {
        self.write_gen.store(GEN_NONE, Ordering::Release);
        if let Some(active) = current.take() {
            debug!("Superseding blink generation {}", active.id);
            let _ = active.cancel.send(true);
        }
    }

    fn is_current(&self, id: u64) -> bool {
        self.write_gen.load(Ordering::Acquire) == id
    }

    /// Natural completion: clear the slot only if it still belongs to `id`
    async fn finish(&self, id: u64) {
        let mut current = self.current.lock().await;
        if current.as_ref().map(|a| a.id) == Some(id) {
            *current = None;
            self.write_gen.store(GEN_NONE, Ordering::Release);
        }
    }
}

/// Owns the single "current blink" lifecycle: start, supersede, stop.
///
/// Every command first supersedes the active generation, so no two blink
/// generations are ever concurrently current and a stale loop can never write
/// past the next generation's first write.
#[derive(Clone)]
pub struct BlinkController {
    inner: Arc<Inner>,
}

impl BlinkController {
    pub fn new(driver: ColorDriver) -> Self {
        Self {
            inner: Arc::new(Inner {
                driver,
                current: Mutex::new(None),
                write_gen: AtomicU64::new(GEN_NONE),
                next_gen: AtomicU64::new(GEN_NONE + 1),
            }),
        }
    }

    /// Supersede any active blink and assert a steady color. The write
    /// failure, if any, is the caller's to report; the blink is cancelled
    /// regardless.
    pub async fn set_steady(&self, color: &Color) -> Result<(), LightError> {
        let mut current = self.inner.current.lock().await;
        self.inner.supersede(&mut current);
        self.inner.driver.set_color(color)
    }

    /// Supersede any active blink and start a new generation. Returns as soon
    /// as the loop is spawned; never waits for the blink to finish.
    pub async fn start_blink(&self, spec: BlinkSpec) {
        let mut current = self.inner.current.lock().await;
        self.inner.supersede(&mut current);

        let id = self.inner.next_gen.fetch_add(1, Ordering::Relaxed);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        *current = Some(ActiveBlink {
            id,
            cancel: cancel_tx,
        });
        self.inner.write_gen.store(id, Ordering::Release);

        debug!("Starting blink generation {}: {:?}", id, spec);
        let inner = self.inner.clone();
        tokio::spawn(blink_loop(inner, spec, id, cancel_rx));
    }

    /// Supersede any active blink, no replacement, and force the light dark.
    /// The explicit off write covers the case where the cancelled loop was
    /// stopped mid-cycle with the light on.
    pub async fn stop_blink(&self) -> Result<(), LightError> {
        let mut current = self.inner.current.lock().await;
        self.inner.supersede(&mut current);
        self.inner.driver.set_color(&Color::Off)
    }

    /// True when no blink generation is current
    pub async fn is_idle(&self) -> bool {
        self.inner.current.lock().await.is_none()
    }
}

/// Sleep for `duration`, returning the moment cancellation is signaled rather
/// than at the next full-duration boundary. Returns true when cancelled.
async fn wait_cancellable(cancelled: &mut watch::Receiver<bool>, duration: Duration) -> bool {
    if *cancelled.borrow() {
        return true;
    }
    match timeout(duration, cancelled.changed()).await {
        // Cancel signal, or the controller dropped the handle
        Ok(_) => true,
        Err(_) => *cancelled.borrow(),
    }
}

/// Detached blink loop for one generation. The generation check immediately
/// before every write keeps a stale loop from racing the generation that
/// superseded it.
async fn blink_loop(
    inner: Arc<Inner>,
    spec: BlinkSpec,
    id: u64,
    mut cancelled: watch::Receiver<bool>,
) {
    let mut cycle: i32 = 0;
    loop {
        if !inner.is_current(id) {
            return;
        }
        if let Err(e) = inner.driver.set_color(&spec.color) {
            error!("Blink write failed: {}", e);
        }
        if wait_cancellable(&mut cancelled, spec.on_duration).await {
            return;
        }

        if !inner.is_current(id) {
            return;
        }
        if let Err(e) = inner.driver.set_color(&Color::Off) {
            error!("Blink write failed: {}", e);
        }
        if wait_cancellable(&mut cancelled, spec.off_duration).await {
            return;
        }

        cycle += 1;
        if !spec.is_infinite() && cycle >= spec.count {
            break;
        }
    }

    debug!("Blink generation {} completed after {} cycles", id, cycle);
    inner.finish(id).await;
}
