/*!
The background TTL sweeper (spec.md §5 "periodic sweeper"): a detached thread that wakes up every
`sweep_interval`, collects sessions whose `last_accessed_at + ttl` has elapsed, and removes them
from the shared map. Mirrors the teacher's pattern of a small owned worker thread with a stop
flag checked each tick rather than a cancellation channel, since there is nothing to hand back on
stop besides "thread has exited".
*/

use super::Session;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub struct Sweeper {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    pub fn spawn(sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let handle = std::thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                std::thread::sleep(interval);
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }
                sweep_once(&sessions);
            }
        });
        Sweeper { stop, handle: Some(handle) }
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn sweep_once(sessions: &Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>) {
    let now = Instant::now();
    let expired: Vec<Uuid> = {
        let map = sessions.read().expect("session map lock poisoned");
        map.iter()
            .filter(|(_, handle)| handle.lock().expect("session lock poisoned").is_expired(now))
            .map(|(id, _)| *id)
            .collect()
    };
    if expired.is_empty() {
        return;
    }
    let mut map = sessions.write().expect("session map lock poisoned");
    for id in expired {
        if let Some(handle) = map.get(&id) {
            if handle.lock().expect("session lock poisoned").is_expired(Instant::now()) {
                map.remove(&id);
                log::debug!(target: "fol_core::session", "swept expired session {id}");
            }
        }
    }
}
