// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};

use moneydash::api::{ApiClient, ApiRequest, RawResponse, Transport};
use moneydash::error::ApiError;
use moneydash::models::{AuthPayload, User};
use moneydash::session::store::{self, Session};
use moneydash::session::{
    Authenticator, Clock, Credentials, MemoryStore, Registration, SessionManager, SessionStore,
};

pub const NOW: i64 = 1_750_000_000;
pub const MARGIN: i64 = 300;

pub struct ManualClock(pub AtomicI64);

impl ManualClock {
    pub fn at(t: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(t)))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn user() -> User {
    User {
        id: "u1".into(),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        avatar_url: None,
    }
}

pub fn payload(access: &str, expires_at: i64) -> AuthPayload {
    AuthPayload {
        user: Some(user()),
        access_token: access.into(),
        refresh_token: Some(format!("{}-refresh", access)),
        expires_at: Some(expires_at),
        expires_in: None,
    }
}

pub fn stored(store: &dyn SessionStore, access: &str, expires_at: i64) {
    store::save_session(
        store,
        &Session {
            user: user(),
            access_token: access.into(),
            refresh_token: format!("{}-refresh", access),
            expires_at,
        },
    )
    .unwrap();
}

pub struct MockAuth {
    pub refresh_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    refresh_result: Mutex<Result<AuthPayload, ApiError>>,
    logout_fails: bool,
    hold: Mutex<Option<(Sender<()>, Receiver<()>)>>,
}

impl MockAuth {
    pub fn refreshing_to(result: Result<AuthPayload, ApiError>) -> Arc<Self> {
        Arc::new(Self {
            refresh_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            refresh_result: Mutex::new(result),
            logout_fails: false,
            hold: Mutex::new(None),
        })
    }

    pub fn failing_logout() -> Arc<Self> {
        Arc::new(Self {
            refresh_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            refresh_result: Mutex::new(Err(ApiError::Unauthorized)),
            logout_fails: true,
            hold: Mutex::new(None),
        })
    }

    /// Refresh blocks until released. Returns (auth, entered, release).
    pub fn blocking(result: AuthPayload) -> (Arc<Self>, Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let auth = Arc::new(Self {
            refresh_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            refresh_result: Mutex::new(Ok(result)),
            logout_fails: false,
            hold: Mutex::new(Some((entered_tx, release_rx))),
        });
        (auth, entered_rx, release_tx)
    }

    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for MockAuth {
    fn login(&self, creds: &Credentials) -> Result<AuthPayload, ApiError> {
        if creds.password == "secret123" {
            Ok(payload("login-token", NOW + 3600))
        } else {
            Err(ApiError::Api {
                status: 400,
                message: "Invalid credentials".into(),
            })
        }
    }

    fn register(&self, _registration: &Registration) -> Result<AuthPayload, ApiError> {
        Ok(payload("register-token", NOW + 3600))
    }

    fn refresh(&self, _refresh_token: &str) -> Result<AuthPayload, ApiError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((entered, release)) = self.hold.lock().unwrap().as_ref() {
            entered.send(()).unwrap();
            release.recv().unwrap();
        }
        self.refresh_result.lock().unwrap().clone()
    }

    fn logout(&self, _access_token: &str, _refresh_token: &str) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails {
            Err(ApiError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }

    fn forgot_password(&self, _email: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

type Responder = Box<dyn Fn(&ApiRequest) -> RawResponse + Send + Sync>;

pub struct MockTransport {
    responder: Responder,
    pub requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new<F>(f: F) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> RawResponse + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(f),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, req: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(req.clone());
        Ok((self.responder)(req))
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub auth: Arc<MockAuth>,
    pub clock: Arc<ManualClock>,
    pub session: Arc<SessionManager>,
}

pub fn harness(auth: Arc<MockAuth>) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = ManualClock::at(NOW);
    let session = Arc::new(SessionManager::new(
        auth.clone(),
        store.clone(),
        clock.clone(),
        MARGIN,
    ));
    Harness {
        store,
        auth,
        clock,
        session,
    }
}

/// Signed-in client whose transport answers with `f`.
pub fn signed_in_client<F>(
    auth: Arc<MockAuth>,
    f: F,
) -> (Harness, Arc<MockTransport>, ApiClient)
where
    F: Fn(&ApiRequest) -> RawResponse + Send + Sync + 'static,
{
    let h = harness(auth);
    stored(h.store.as_ref(), "old-token", NOW + 3600);
    h.session.bootstrap();
    let transport = MockTransport::new(f);
    let api = ApiClient::new(transport.clone(), h.session.clone());
    (h, transport, api)
}
