//! Credential checking for HTTP Basic authentication

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{
    error::{AppError, AppResult},
    models::{Principal, Role, UserAccount},
};

/// Username/password pair taken from an `Authorization: Basic` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse an `Authorization` header value. Returns `None` for other
    /// schemes and for malformed payloads.
    pub fn parse(header: &str) -> Option<Self> {
        let (scheme, payload) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(payload.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Header value for these credentials
    pub fn to_header_value(&self) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", self.username, self.password))
        )
    }
}

#[derive(Clone)]
struct StoredAccount {
    password_hash: Arc<str>,
    roles: Vec<Role>,
}

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<HashMap<String, StoredAccount>>,
    /// Verified in place of a real hash for unknown usernames
    dummy_hash: Arc<str>,
    realm: String,
    verifications: Arc<AtomicU64>,
}

impl AuthService {
    /// Build the service from configured accounts, hashing every password
    pub fn new(accounts: &[UserAccount], realm: impl Into<String>) -> AppResult<Self> {
        let mut stored = HashMap::with_capacity(accounts.len());
        for account in accounts {
            let password_hash: Arc<str> = hash_password(&account.password)?.into();
            if stored
                .insert(
                    account.username.clone(),
                    StoredAccount {
                        password_hash,
                        roles: account.roles.clone(),
                    },
                )
                .is_some()
            {
                tracing::warn!("Account {} declared twice, keeping the last one", account.username);
            }
        }

        tracing::info!("Loaded {} user accounts", stored.len());

        // Random secret nobody knows, only its hashing cost matters
        let dummy_secret = SaltString::generate(&mut OsRng);
        let dummy_hash = hash_password(dummy_secret.as_str())?;

        Ok(Self {
            accounts: Arc::new(stored),
            dummy_hash: dummy_hash.into(),
            realm: realm.into(),
            verifications: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Number of Argon2 verifications performed so far
    pub fn verifications(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }

    /// Check credentials, returning the matching principal.
    ///
    /// Unknown usernames are verified against a dummy hash so they cost the
    /// same as a wrong password. Verification runs on the blocking pool.
    pub async fn authenticate(&self, credentials: &BasicCredentials) -> AppResult<Option<Principal>> {
        let account = self.accounts.get(&credentials.username);
        let hash = match account {
            Some(account) => account.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };

        let password = credentials.password.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&hash, &password))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;
        self.verifications.fetch_add(1, Ordering::Relaxed);

        match account {
            Some(account) if verified => Ok(Some(Principal::authenticated(
                credentials.username.clone(),
                account.roles.iter().copied(),
            ))),
            _ => Ok(None),
        }
    }

    /// Resolve the principal of a request from its `Authorization` header.
    /// Missing or rejected credentials yield the anonymous principal.
    pub async fn resolve(&self, header: Option<&str>) -> AppResult<Principal> {
        let Some(credentials) = header.and_then(BasicCredentials::parse) else {
            return Ok(Principal::anonymous());
        };

        match self.authenticate(&credentials).await? {
            Some(principal) => Ok(principal),
            None => {
                tracing::debug!("Rejected credentials for {}", credentials.username);
                Ok(Principal::anonymous())
            }
        }
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
