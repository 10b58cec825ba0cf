// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authentication session lifecycle.
//!
//! One `SessionManager` is shared (behind an `Arc`) by the API client and the
//! refresh timer. It owns the in-memory session, mirrors it into a
//! [`SessionStore`], and guarantees that at most one refresh request is in
//! flight: later triggers wait for the running one and share its outcome.

pub mod auth;
pub mod store;
pub mod timer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::ApiError;
use crate::models::{AuthPayload, User};
use crate::routes::Route;

pub use auth::{Authenticator, Credentials, HttpAuthenticator, Registration};
pub use store::{MemoryStore, Session, SessionStore};
pub use timer::RefreshTimer;

/// Longest single sleep of the refresh timer, so wall-clock jumps are noticed.
const MAX_TIMER_WAIT_SECS: i64 = 30;

/// Shortest gap between scheduled refreshes. Tokens that live less than the
/// margin would otherwise be refreshed back to back.
pub const MIN_REFRESH_INTERVAL_SECS: i64 = 30;

pub trait Clock: Send + Sync {
    /// Current time in epoch seconds.
    fn now(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Bootstrap,
    Timer,
    Unauthorized,
}

struct State {
    session: Option<Session>,
    status: SessionStatus,
    next_refresh_at: Option<i64>,
    /// Bumped whenever the session is replaced or cleared; a refresh that
    /// started under an older epoch must not write its result.
    epoch: u64,
}

#[derive(Default)]
struct RefreshGate {
    in_flight: bool,
    waiters: usize,
    generation: u64,
    last_outcome: Option<Result<String, ApiError>>,
}

type RedirectListener = Arc<dyn Fn(Route) + Send + Sync>;

pub struct SessionManager {
    auth: Arc<dyn Authenticator>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    margin: i64,
    state: Mutex<State>,
    schedule_cv: Condvar,
    gate: Mutex<RefreshGate>,
    gate_cv: Condvar,
    listeners: Mutex<Vec<RedirectListener>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl SessionManager {
    pub fn new(
        auth: Arc<dyn Authenticator>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        margin: i64,
    ) -> Self {
        Self {
            auth,
            store,
            clock,
            margin,
            state: Mutex::new(State {
                session: None,
                status: SessionStatus::Loading,
                next_refresh_at: None,
                epoch: 0,
            }),
            schedule_cv: Condvar::new(),
            gate: Mutex::new(RefreshGate::default()),
            gate_cv: Condvar::new(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn status(&self) -> SessionStatus {
        lock(&self.state).status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.status() == SessionStatus::Loading
    }

    pub fn user(&self) -> Option<User> {
        lock(&self.state).session.as_ref().map(|s| s.user.clone())
    }

    pub fn session(&self) -> Option<Session> {
        lock(&self.state).session.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        lock(&self.state)
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// When the refresh timer will fire next, in epoch seconds.
    pub fn next_refresh_at(&self) -> Option<i64> {
        lock(&self.state).next_refresh_at
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Callers currently blocked on someone else's refresh.
    pub fn pending_refresh_waiters(&self) -> usize {
        lock(&self.gate).waiters
    }

    pub fn is_refreshing(&self) -> bool {
        lock(&self.gate).in_flight
    }

    /// Called with the target route whenever the session is torn down.
    pub fn on_redirect<F>(&self, f: F)
    where
        F: Fn(Route) + Send + Sync + 'static,
    {
        lock(&self.listeners).push(Arc::new(f));
    }

    pub fn bootstrap(&self) -> SessionStatus {
        lock(&self.state).status = SessionStatus::Loading;

        let stored = store::load_session(self.store.as_ref()).unwrap_or_else(|e| {
            warn!("could not read stored session: {}", e);
            None
        });
        let Some(stored) = stored else {
            // Drop any half-written leftovers.
            if let Err(e) = store::clear_session(self.store.as_ref()) {
                warn!("could not clear stored session: {}", e);
            }
            let mut st = lock(&self.state);
            st.session = None;
            st.status = SessionStatus::Unauthenticated;
            debug!("no stored session");
            return st.status;
        };

        let remaining = stored.expires_at - self.clock.now();
        if remaining < self.margin {
            info!("stored session expires in {}s, refreshing", remaining);
            lock(&self.state).session = Some(stored);
            return match self.refresh(RefreshTrigger::Bootstrap) {
                Ok(_) => SessionStatus::Authenticated,
                Err(_) => SessionStatus::Unauthenticated,
            };
        }

        let mut st = lock(&self.state);
        info!("restored session for {}", stored.user.email);
        st.session = Some(stored);
        st.status = SessionStatus::Authenticated;
        self.schedule_locked(&mut st);
        st.status
    }

    pub fn login(&self, creds: &Credentials) -> Result<User, ApiError> {
        let payload = self.auth.login(creds)?;
        self.establish(payload)
    }

    pub fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let payload = self.auth.register(registration)?;
        self.establish(payload)
    }

    pub fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.auth.forgot_password(email)
    }

    /// Remote invalidation is best effort; the local session is always cleared.
    pub fn logout(&self) {
        let tokens = lock(&self.state)
            .session
            .as_ref()
            .map(|s| (s.access_token.clone(), s.refresh_token.clone()));
        if let Some((access, refresh)) = tokens {
            if let Err(e) = self.auth.logout(&access, &refresh) {
                warn!("remote logout failed, clearing local session anyway: {}", e);
            }
        }
        self.terminate(true);
        info!("signed out");
    }

    /// Exchange the refresh token for a new access token, returning it.
    ///
    /// If another refresh is already running, waits for it instead of
    /// issuing a second request. Any failure ends the session.
    pub fn refresh(&self, trigger: RefreshTrigger) -> Result<String, ApiError> {
        {
            let mut gate = lock(&self.gate);
            if gate.in_flight {
                let generation = gate.generation;
                gate.waiters += 1;
                debug!("{:?} refresh joined the one in flight", trigger);
                while gate.in_flight && gate.generation == generation {
                    gate = self
                        .gate_cv
                        .wait(gate)
                        .unwrap_or_else(|e| e.into_inner());
                }
                gate.waiters -= 1;
                return gate
                    .last_outcome
                    .clone()
                    .unwrap_or(Err(ApiError::SessionExpired));
            }
            gate.in_flight = true;
        }

        let outcome = self.perform_refresh(trigger);

        let mut gate = lock(&self.gate);
        gate.in_flight = false;
        gate.generation += 1;
        gate.last_outcome = Some(outcome.clone());
        self.gate_cv.notify_all();
        outcome
    }

    fn perform_refresh(&self, trigger: RefreshTrigger) -> Result<String, ApiError> {
        let (refresh_token, epoch) = {
            let st = lock(&self.state);
            (
                st.session.as_ref().map(|s| s.refresh_token.clone()),
                st.epoch,
            )
        };
        let Some(refresh_token) = refresh_token else {
            debug!("{:?} refresh with no session", trigger);
            self.terminate(trigger != RefreshTrigger::Bootstrap);
            return Err(ApiError::SessionExpired);
        };

        debug!("{:?} refresh started", trigger);
        let result = self
            .auth
            .refresh(&refresh_token)
            .and_then(|payload| self.session_from_refresh(payload));

        match result {
            Ok(session) => {
                let mut st = lock(&self.state);
                if st.epoch != epoch {
                    info!("session ended during refresh; dropping the new tokens");
                    return Err(ApiError::SessionExpired);
                }
                if let Err(e) = store::save_session(self.store.as_ref(), &session) {
                    warn!("could not persist refreshed session: {}", e);
                }
                let token = session.access_token.clone();
                st.session = Some(session);
                st.status = SessionStatus::Authenticated;
                self.schedule_locked(&mut st);
                info!("{:?} refresh succeeded", trigger);
                Ok(token)
            }
            Err(e) => {
                warn!("{:?} refresh failed: {}", trigger, e);
                if lock(&self.state).epoch == epoch {
                    self.terminate(trigger != RefreshTrigger::Bootstrap);
                }
                Err(ApiError::SessionExpired)
            }
        }
    }

    fn session_from_refresh(&self, payload: AuthPayload) -> Result<Session, ApiError> {
        let previous = lock(&self.state)
            .session
            .clone()
            .ok_or(ApiError::SessionExpired)?;
        let now = self.clock.now();
        let expires_at = payload
            .expiry(now)
            .ok_or_else(|| ApiError::Decode("refresh response carried no expiry".into()))?;
        Ok(Session {
            user: payload.user.unwrap_or(previous.user),
            access_token: payload.access_token,
            refresh_token: payload.refresh_token.unwrap_or(previous.refresh_token),
            expires_at,
        })
    }

    fn establish(&self, payload: AuthPayload) -> Result<User, ApiError> {
        let now = self.clock.now();
        let expires_at = payload
            .expiry(now)
            .ok_or_else(|| ApiError::Decode("sign-in response carried no expiry".into()))?;
        let refresh_token = payload
            .refresh_token
            .ok_or_else(|| ApiError::Decode("sign-in response carried no refresh token".into()))?;
        let user = payload
            .user
            .ok_or_else(|| ApiError::Decode("sign-in response carried no user".into()))?;
        let session = Session {
            user: user.clone(),
            access_token: payload.access_token,
            refresh_token,
            expires_at,
        };
        store::save_session(self.store.as_ref(), &session)?;

        let mut st = lock(&self.state);
        st.epoch += 1;
        st.session = Some(session);
        st.status = SessionStatus::Authenticated;
        self.schedule_locked(&mut st);
        info!("signed in as {}", user.email);
        Ok(user)
    }

    fn schedule_locked(&self, st: &mut State) {
        if let Some(s) = &st.session {
            let now = self.clock.now();
            let at = (s.expires_at - self.margin).max(now + MIN_REFRESH_INTERVAL_SECS);
            debug!("next refresh in {}s", at - now);
            st.next_refresh_at = Some(at);
            self.schedule_cv.notify_all();
        }
    }

    fn terminate(&self, redirect: bool) {
        {
            let mut st = lock(&self.state);
            st.session = None;
            st.status = SessionStatus::Unauthenticated;
            st.next_refresh_at = None;
            st.epoch += 1;
            self.schedule_cv.notify_all();
        }
        if let Err(e) = store::clear_session(self.store.as_ref()) {
            warn!("could not clear stored session: {}", e);
        }
        if redirect {
            // Listeners may register more listeners, so call them unlocked.
            let listeners: Vec<RedirectListener> = lock(&self.listeners).clone();
            for listener in listeners {
                listener(Route::Login);
            }
        }
    }

    /// Blocks until a scheduled refresh is due (true) or `stop` is set (false).
    /// Consumes the due deadline; a successful refresh sets the next one.
    pub(crate) fn wait_for_due_refresh(&self, stop: &AtomicBool) -> bool {
        let mut st = lock(&self.state);
        loop {
            if stop.load(Ordering::SeqCst) {
                return false;
            }
            match st.next_refresh_at {
                None => {
                    st = self
                        .schedule_cv
                        .wait(st)
                        .unwrap_or_else(|e| e.into_inner());
                }
                Some(at) => {
                    let now = self.clock.now();
                    if at <= now {
                        st.next_refresh_at = None;
                        return true;
                    }
                    let secs = (at - now).min(MAX_TIMER_WAIT_SECS) as u64;
                    st = self
                        .schedule_cv
                        .wait_timeout(st, Duration::from_secs(secs))
                        .map(|(g, _)| g)
                        .unwrap_or_else(|e| e.into_inner().0);
                }
            }
        }
    }

    pub(crate) fn wake_timer(&self) {
        let _st = lock(&self.state);
        self.schedule_cv.notify_all();
    }
}
