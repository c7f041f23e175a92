use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::search::AbortFlag;

/// Supervises a running search against a wall-clock deadline.
///
/// Mirrors the source's `std::thread`/`std::mutex`/`std::condition_variable`
/// timeout protocol directly: a companion thread waits on a condvar for
/// either the deadline or a "the search already finished" notification,
/// whichever comes first, and sets the shared [`AbortFlag`] only if the
/// deadline won the race.
pub struct TimeoutGuard {
    handle: Option<JoinHandle<()>>,
    done: Arc<(Mutex<bool>, Condvar)>,
    timed_out: Arc<Mutex<bool>>,
}

impl TimeoutGuard {
    /// Spawns the companion thread. `timeout_secs == 0` disables it; `stop`
    /// then always reports "no timeout".
    pub fn start(timeout_secs: u64, abort: AbortFlag) -> Self {
        let done = Arc::new((Mutex::new(false), Condvar::new()));
        let timed_out = Arc::new(Mutex::new(false));

        let handle = if timeout_secs > 0 {
            let done = Arc::clone(&done);
            let timed_out = Arc::clone(&timed_out);
            let deadline = Duration::from_secs(timeout_secs);

            Some(thread::spawn(move || {
                let (lock, cvar) = &*done;
                let guard = lock.lock().unwrap();
                let (_guard, result) = cvar
                    .wait_timeout_while(guard, deadline, |finished| !*finished)
                    .unwrap();
                if result.timed_out() {
                    *timed_out.lock().unwrap() = true;
                    abort.set();
                }
            }))
        } else {
            None
        };

        TimeoutGuard { handle, done, timed_out }
    }

    /// Tells the companion thread the search is over, joins it, and returns
    /// whether the deadline fired before this call.
    pub fn stop(mut self) -> bool {
        {
            let (lock, cvar) = &*self.done;
            let mut finished = lock.lock().unwrap();
            *finished = true;
            cvar.notify_one();
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        *self.timed_out.lock().unwrap()
    }
}
