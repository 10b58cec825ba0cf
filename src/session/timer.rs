// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use log::debug;

use super::{RefreshTrigger, SessionManager};

/// Background thread that refreshes the session when its deadline comes up.
pub struct RefreshTimer {
    manager: Arc<SessionManager>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn spawn(manager: Arc<SessionManager>) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_manager = Arc::clone(&manager);
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("moneydash-refresh".into())
            .spawn(move || {
                while thread_manager.wait_for_due_refresh(&thread_stop) {
                    // Failures already tore the session down.
                    let _ = thread_manager.refresh(RefreshTrigger::Timer);
                }
                debug!("refresh timer stopped");
            })
            .context("Failed to start refresh timer")?;
        Ok(Self {
            manager,
            stop,
            handle: Some(handle),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.manager.wake_timer();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
