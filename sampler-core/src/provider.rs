use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::frame::{FrameOutput, FrameRequest, FrameSampler};
use crate::state::WorldSnapshot;

/// Pluggable prediction backend. The optional external sampling service
/// implements this behind whatever transport it likes; `None` means "no
/// answer" and is never an error.
pub trait TrajectoryProvider: Send {
    fn predict(&mut self, snapshot: &WorldSnapshot, request: FrameRequest) -> Option<FrameOutput>;
}

impl TrajectoryProvider for FrameSampler {
    fn predict(&mut self, snapshot: &WorldSnapshot, request: FrameRequest) -> Option<FrameOutput> {
        Some(self.run_frame(snapshot, request))
    }
}

type SharedProvider = Arc<Mutex<Box<dyn TrajectoryProvider>>>;

/// Races an optional remote provider against a fixed per-frame budget and
/// falls back to the local approximation when the remote is absent, late, or
/// answers with nothing. The frame never blocks past the budget.
pub struct FallbackSampler {
    local: FrameSampler,
    remote: Option<SharedProvider>,
    remote_budget: Duration,
}

impl FallbackSampler {
    pub fn local_only(local: FrameSampler) -> Self {
        Self {
            local,
            remote: None,
            remote_budget: Duration::ZERO,
        }
    }

    pub fn with_remote(
        local: FrameSampler,
        remote: Box<dyn TrajectoryProvider>,
        remote_budget: Duration,
    ) -> Self {
        Self {
            local,
            remote: Some(Arc::new(Mutex::new(remote))),
            remote_budget,
        }
    }

    pub fn run_frame(&mut self, snapshot: &WorldSnapshot, request: FrameRequest) -> FrameOutput {
        if let Some(remote) = &self.remote {
            let (tx, rx) = mpsc::channel();
            let remote = Arc::clone(remote);
            let snapshot = snapshot.clone();
            // A response arriving after the deadline lands on a dead channel
            // and is discarded; the worker exits on its own.
            thread::spawn(move || {
                let answer = remote
                    .lock()
                    .ok()
                    .and_then(|mut guard| guard.predict(&snapshot, request));
                let _ = tx.send(answer);
            });
            if let Ok(Some(output)) = rx.recv_timeout(self.remote_budget) {
                return output;
            }
        }
        self.local.run_frame(snapshot, request)
    }
}
