//! Session authentication module.
//!
//! Logins and flash messages both travel as HS256 JWTs in HttpOnly cookies,
//! signed with `SECRET_KEY`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Cookies                                 │
//! │                                                                         │
//! │  kala_session  { sub: user_id, token_type: "session", exp: +7d }       │
//! │       │                                                                 │
//! │       └──► CurrentUser extractor ──► users.get_by_id(sub)              │
//! │                 │ missing/invalid                                       │
//! │                 └──► 303 /login                                         │
//! │                                                                         │
//! │  kala_flash    { messages: [...], token_type: "flash", exp: +5min }    │
//! │       │                                                                 │
//! │       └──► take_flashes() on the next rendered page, then removed      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use kala_core::User;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "kala_session";
pub const FLASH_COOKIE: &str = "kala_flash";

/// Flash messages only need to survive one redirect.
const FLASH_LIFETIME_SECS: i64 = 5 * 60;

const SESSION_TOKEN: &str = "session";
const FLASH_TOKEN: &str = "flash";

// =============================================================================
// Claims
// =============================================================================

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    /// Always "session"
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FlashClaims {
    messages: Vec<Flash>,
    exp: i64,
    token_type: String,
}

// =============================================================================
// Flash messages
// =============================================================================

/// Severity of a flash message, rendered as the alert colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Danger,
}

impl FlashLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }
}

/// A one-shot message shown on the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Flash {
            level: FlashLevel::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Flash {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

// =============================================================================
// Session manager
// =============================================================================

/// Signs and checks session and flash tokens.
pub struct SessionManager {
    secret: String,
    lifetime_secs: i64,
}

impl SessionManager {
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        SessionManager {
            secret,
            lifetime_secs,
        }
    }

    /// Generate a session token for a user.
    pub fn issue_session(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: SESSION_TOKEN.to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    /// Validate a session token. Expired, forged and flash tokens are all
    /// rejected the same way.
    pub fn validate_session(&self, token: &str) -> Option<Claims> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| debug!(error = %e, "Rejected session token"))
        .ok()?
        .claims;

        (claims.token_type == SESSION_TOKEN).then_some(claims)
    }

    /// Adds the session cookie for `user_id`.
    pub fn login(&self, jar: CookieJar, user_id: &str) -> AppResult<CookieJar> {
        let token = self.issue_session(user_id)?;
        Ok(jar.add(cookie(SESSION_COOKIE, token)))
    }

    /// Removes the session cookie.
    pub fn logout(&self, jar: CookieJar) -> CookieJar {
        jar.remove(removal(SESSION_COOKIE))
    }

    /// The logged-in user id, if the session cookie is valid.
    pub fn session_user_id(&self, jar: &CookieJar) -> Option<String> {
        let cookie = jar.get(SESSION_COOKIE)?;
        self.validate_session(cookie.value()).map(|claims| claims.sub)
    }

    /// Queues a flash message for the next rendered page.
    pub fn push_flash(&self, jar: CookieJar, flash: Flash) -> AppResult<CookieJar> {
        let mut messages = self.read_flashes(&jar);
        messages.push(flash);

        let claims = FlashClaims {
            messages,
            exp: (Utc::now() + Duration::seconds(FLASH_LIFETIME_SECS)).timestamp(),
            token_type: FLASH_TOKEN.to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(jar.add(cookie(FLASH_COOKIE, token)))
    }

    /// Returns queued flash messages and clears them.
    pub fn take_flashes(&self, jar: CookieJar) -> (CookieJar, Vec<Flash>) {
        if jar.get(FLASH_COOKIE).is_none() {
            return (jar, Vec::new());
        }

        let messages = self.read_flashes(&jar);
        (jar.remove(removal(FLASH_COOKIE)), messages)
    }

    fn read_flashes(&self, jar: &CookieJar) -> Vec<Flash> {
        let Some(cookie) = jar.get(FLASH_COOKIE) else {
            return Vec::new();
        };

        decode::<FlashClaims>(
            cookie.value(),
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .ok()
        .map(|data| data.claims)
        .filter(|claims| claims.token_type == FLASH_TOKEN)
        .map(|claims| claims.messages)
        .unwrap_or_default()
    }
}

fn cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

// =============================================================================
// Extractors
// =============================================================================

/// Any logged-in user. Anonymous requests are redirected to `/login`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(user_id) = state.sessions.session_user_id(&jar) else {
            return Err(Redirect::to("/login").into_response());
        };

        match state.db.users().get_by_id(&user_id).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => {
                warn!(user_id = %user_id, "Session for a user that no longer exists");
                Err((state.sessions.logout(jar), Redirect::to("/login")).into_response())
            }
            Err(e) => Err(AppError::from(e).into_response()),
        }
    }
}

/// A logged-in admin. Employees get a "Solo admin." warning and are sent
/// back to the dashboard.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.is_admin() {
            return Ok(AdminUser(user));
        }

        warn!(user_id = %user.id, path = %parts.uri.path(), "Admin page refused");

        let jar = CookieJar::from_headers(&parts.headers);
        match state.sessions.push_flash(jar, Flash::warning("Solo admin.")) {
            Ok(jar) => Err((jar, Redirect::to("/")).into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new("test-secret".to_string(), 3600)
    }

    #[test]
    fn test_session_roundtrip() {
        let manager = manager();
        let token = manager.issue_session("user-001").unwrap();

        let claims = manager.validate_session(&token).unwrap();
        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.token_type, "session");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = manager().issue_session("user-001").unwrap();
        let other = SessionManager::new("other-secret".to_string(), 3600);
        assert!(other.validate_session(&token).is_none());
    }

    #[test]
    fn test_expired_session_rejected() {
        let manager = SessionManager::new("test-secret".to_string(), -3600);
        let token = manager.issue_session("user-001").unwrap();
        assert!(manager.validate_session(&token).is_none());
    }

    #[test]
    fn test_login_cookie_identifies_user() {
        let manager = manager();
        let jar = manager.login(CookieJar::new(), "user-001").unwrap();
        assert_eq!(manager.session_user_id(&jar).as_deref(), Some("user-001"));

        let jar = manager.logout(jar);
        assert!(manager.session_user_id(&jar).is_none());
    }

    #[test]
    fn test_flashes_accumulate_and_clear() {
        let manager = manager();
        let jar = manager.push_flash(CookieJar::new(), Flash::success("Guardado")).unwrap();
        let jar = manager.push_flash(jar, Flash::warning("Solo admin.")).unwrap();

        let (jar, flashes) = manager.take_flashes(jar);
        assert_eq!(flashes, vec![Flash::success("Guardado"), Flash::warning("Solo admin.")]);

        let (_, flashes) = manager.take_flashes(jar);
        assert!(flashes.is_empty());
    }

    #[test]
    fn test_flash_token_is_not_a_session() {
        let manager = manager();
        let jar = manager.push_flash(CookieJar::new(), Flash::danger("x")).unwrap();
        let flash_token = jar.get(FLASH_COOKIE).unwrap().value().to_string();
        assert!(manager.validate_session(&flash_token).is_none());
    }
}
