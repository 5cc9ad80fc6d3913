//! Stub for the `GoogleTokenClient` port.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reserva_core::GoogleTokenClient;
use reserva_domain::{ReservaError, Result, TokenSet};

/// Token client stub that mints a fresh token per refresh, or fails.
#[derive(Default, Clone)]
pub struct StubTokenClient {
    refreshes: Arc<Mutex<u32>>,
    fail: Arc<Mutex<bool>>,
}

impl StubTokenClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    pub fn refresh_count(&self) -> u32 {
        *self.refreshes.lock().unwrap()
    }
}

#[async_trait]
impl GoogleTokenClient for StubTokenClient {
    async fn refresh_access_token(&self, _refresh_token: &str) -> Result<TokenSet> {
        if *self.fail.lock().unwrap() {
            return Err(ReservaError::Network("token endpoint unreachable".into()));
        }
        let mut refreshes = self.refreshes.lock().unwrap();
        *refreshes += 1;
        Ok(TokenSet::new(format!("minted-{refreshes}"), None, None, 3600))
    }

    async fn exchange_code(&self, _code: &str, _redirect_uri: &str) -> Result<TokenSet> {
        Ok(TokenSet::new("exchanged".into(), Some("refresh".into()), None, 3600))
    }

    fn profile_from(&self, _tokens: &TokenSet) -> Result<reserva_core::OAuthProfile> {
        Ok(reserva_core::OAuthProfile {
            sub: "sub-stub".into(),
            email: "ana@example.org".into(),
            name: Some("Ana".into()),
            avatar_url: None,
        })
    }
}
