//! Server-side sessions in Redis, addressed by a signed cookie.
//!
//! The cookie carries `<session uuid>.<hex HMAC-SHA256(secret, uuid)>`; the session
//! document lives under `session:<uuid>` with a TTL. A cookie whose signature
//! does not verify is treated as absent.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use serde::{Deserialize, Serialize};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;
use uuid::Uuid;

use crate::assessment::service::JobGapResult;
use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "skillbridge_session";

type HmacSha256 = Hmac<Sha256>;

/// Everything the dashboard and scheme pages need between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Uuid,
    pub user_name: String,
    #[serde(default)]
    pub latest_results: Vec<JobGapResult>,
    #[serde(default)]
    pub latest_missing_skills: Vec<String>,
    #[serde(default)]
    pub target_job: Option<String>,
}

impl SessionData {
    pub fn new(user_id: Uuid, user_name: String) -> Self {
        Self {
            user_id,
            user_name,
            latest_results: Vec::new(),
            latest_missing_skills: Vec::new(),
            target_job: None,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    redis: redis::Client,
    secret: String,
    ttl_secs: u64,
}

impl SessionStore {
    pub fn new(redis: redis::Client, secret: String, ttl_secs: u64) -> Self {
        Self {
            redis,
            secret,
            ttl_secs,
        }
    }

    /// Stores a fresh session and returns the signed cookie value.
    pub async fn create(&self, data: &SessionData) -> Result<String, AppError> {
        let id = Uuid::new_v4();
        self.save(id, data).await?;
        Ok(self.sign(id))
    }

    /// Writes `data` and resets the TTL.
    pub async fn save(&self, id: Uuid, data: &SessionData) -> Result<(), AppError> {
        let payload = serde_json::to_string(data).map_err(|e| AppError::Internal(e.into()))?;
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(session_key(id))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    /// Resolves a cookie value to its session, if the signature holds and the session is live.
    pub async fn load(&self, cookie_value: &str) -> Result<Option<(Uuid, SessionData)>, AppError> {
        let Some(id) = self.verify(cookie_value) else {
            return Ok(None);
        };
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let payload: Option<String> = redis::cmd("GET")
            .arg(session_key(id))
            .query_async(&mut conn)
            .await?;

        Ok(payload.and_then(|raw| match serde_json::from_str::<SessionData>(&raw) {
            Ok(data) => Some((id, data)),
            Err(e) => {
                warn!(session_id = %id, "Discarding unreadable session: {e}");
                None
            }
        }))
    }

    pub async fn destroy(&self, cookie_value: &str) -> Result<(), AppError> {
        let Some(id) = self.verify(cookie_value) else {
            return Ok(());
        };
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        redis::cmd("DEL")
            .arg(session_key(id))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    pub fn sign(&self, id: Uuid) -> String {
        let tag = self.mac(id).finalize().into_bytes();
        format!("{id}.{}", hex::encode(tag))
    }

    pub fn verify(&self, cookie_value: &str) -> Option<Uuid> {
        let (raw_id, signature) = cookie_value.split_once('.')?;
        let id = Uuid::parse_str(raw_id).ok()?;
        let tag = hex::decode(signature).ok()?;
        self.mac(id).verify_slice(&tag).ok().map(|_| id)
    }

    /// `Set-Cookie` value carrying a signed session id.
    pub fn set_cookie(&self, cookie_value: &str) -> String {
        format!(
            "{SESSION_COOKIE}={cookie_value}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            self.ttl_secs
        )
    }

    /// `Set-Cookie` value that expires the session cookie.
    pub fn clear_cookie() -> String {
        format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
    }

    fn mac(&self, id: Uuid) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(id.as_bytes());
        mac
    }
}

fn session_key(id: Uuid) -> String {
    format!("session:{id}")
}

/// Value of the session cookie in a request's `Cookie` headers.
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// The signed-in user, resolved from the session cookie. Rejects with 401.
pub struct CurrentUser {
    pub session_id: Uuid,
    pub session: SessionData,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookie = session_cookie(&parts.headers).ok_or_else(AppError::login_required)?;
        let (session_id, session) = state
            .sessions
            .load(cookie)
            .await?
            .ok_or_else(AppError::login_required)?;
        Ok(CurrentUser {
            session_id,
            session,
        })
    }
}
