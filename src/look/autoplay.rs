//! Auto-advance timer
//!
//! Each mounted session owns one background task that ticks its deck
//! every period. The task only holds a weak reference to the session
//! map and is aborted when the session is dropped.

use super::state::SessionMap;
use std::{
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::{sync::Notify, task::JoinHandle, time};
use tracing::{debug, warn};

/// Handle to a session's auto-advance task
pub struct AutoAdvance {
    handle: JoinHandle<()>,
    rearm: Arc<Notify>,
}

impl AutoAdvance {
    /// Spawns the timer on the current tokio runtime.
    ///
    /// Returns `None` outside a runtime; the deck then only moves manually.
    pub fn spawn(sessions: Weak<SessionMap>, session_id: String, period: Duration) -> Option<Self> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(session_id = %session_id, "no tokio runtime, auto-advance disabled");
                return None;
            }
        };

        let rearm = Arc::new(Notify::new());
        let handle = runtime.spawn(run(sessions, session_id, period, rearm.clone()));
        Some(Self { handle, rearm })
    }

    /// Restarts the current period from zero
    pub fn rearm(&self) {
        self.rearm.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(sessions: Weak<SessionMap>, session_id: String, period: Duration, rearm: Arc<Notify>) {
    loop {
        tokio::select! {
            _ = time::sleep(period) => {}
            _ = rearm.notified() => continue,
        }

        let Some(map) = sessions.upgrade() else {
            break;
        };
        let Some(mut session) = map.get_mut(&session_id) else {
            break;
        };
        if session.widget.tick() {
            debug!(
                session_id = %session_id,
                active_index = session.widget.controller().active_index(),
                "auto-advanced"
            );
        }
    }
    debug!(session_id = %session_id, "auto-advance stopped");
}
