use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use shared::items::Item;
use shared::{SpinResult, WheelError, WheelSession};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

struct UserSpin {
    wheel: WheelSession,
    last_spin: Instant,
}

impl UserSpin {
    fn new() -> Self {
        Self {
            wheel: WheelSession::new(),
            last_spin: Instant::now(),
        }
    }
}

/// Per-user wheel sessions. Each user may have one spin animating at a time; the flag is
/// cleared by a single delayed task scheduled when the spin starts. A session is dropped
/// once it has been idle for `idle_timeout`, after which the user's wheel starts from rest.
#[derive(Clone)]
pub struct SpinSessions {
    sessions: Arc<Mutex<HashMap<Uuid, UserSpin>>>,
    window: Duration,
    idle_timeout: Duration,
}

impl SpinSessions {
    pub fn new(window: Duration, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            window,
            idle_timeout,
        }
    }

    /// Rebuilds the user's segments from `items` and spins. `Ok(None)` means a spin is
    /// already animating and this trigger was dropped.
    pub async fn spin(&self, user_id: Uuid, items: &[Item]) -> Result<Option<SpinResult>, WheelError> {
        let result = {
            let mut sessions = self.sessions.lock().await;
            let known = sessions.contains_key(&user_id);
            let session = sessions.entry(user_id).or_insert_with(UserSpin::new);
            session.wheel.replace_items(items);
            let result = session.wheel.trigger_spin();
            if let Ok(Some(_)) = result {
                session.last_spin = Instant::now();
            }
            // A failed first spin leaves nothing behind.
            if result.is_err() && !known {
                sessions.remove(&user_id);
            }
            result?
        };

        if result.is_some() {
            self.schedule_completion(user_id);
        }
        Ok(result)
    }

    pub async fn is_animating(&self, user_id: Uuid) -> bool {
        self.sessions
            .lock()
            .await
            .get(&user_id)
            .map(|session| session.wheel.is_animating())
            .unwrap_or(false)
    }

    pub async fn complete(&self, user_id: Uuid) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&user_id) {
            session.wheel.complete_spin();
            debug!("Spin window closed for user {}", user_id);
        }
        self.prune(&mut sessions);
    }

    /// Drops every session that is not animating and has been idle past the timeout.
    pub async fn cleanup_idle_sessions(&self) {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, UserSpin>) {
        let before = sessions.len();
        sessions.retain(|_, session| {
            session.wheel.is_animating() || session.last_spin.elapsed() < self.idle_timeout
        });
        let dropped = before - sessions.len();
        if dropped > 0 {
            debug!("Dropped {} idle wheel sessions", dropped);
        }
    }

    fn schedule_completion(&self, user_id: Uuid) {
        let sessions = self.clone();
        let window = self.window;
        let idle_timeout = self.idle_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            sessions.complete(user_id).await;
            tokio::time::sleep(idle_timeout).await;
            sessions.cleanup_idle_sessions().await;
        });
    }

    #[cfg(test)]
    async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
