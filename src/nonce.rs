//! Anti-forgery tokens for the manual generation request.
//!
//! A token is issued per user session and must accompany every manual
//! trigger. Tokens stay valid until re-issued for the same user.

use crate::models::UserId;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;

const TOKEN_LEN: usize = 20;

#[derive(Default)]
pub struct NonceStore {
    tokens: Mutex<HashMap<UserId, String>>,
}

impl NonceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a user, replacing any previous one.
    pub fn issue(&self, user: UserId) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        self.tokens.lock().unwrap().insert(user, token.clone());
        token
    }

    pub fn verify(&self, user: UserId, token: &str) -> bool {
        self.tokens
            .lock()
            .unwrap()
            .get(&user)
            .is_some_and(|stored| stored.as_str() == token)
    }
}
