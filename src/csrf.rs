use axum_extra::extract::cookie::SignedCookieJar;
use cookie::{Cookie, SameSite};

use crate::error::{AppError, AppResult};

const COOKIE_NAME: &str = "movierank_csrf";

/// Issues a fresh token, stored in a signed cookie and echoed in the form.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::hours(2))
        .build();
    (jar.add(cookie), token)
}

/// The submitted form token must equal the value of the signed cookie.
pub fn verify(jar: &SignedCookieJar, submitted: &str) -> AppResult<()> {
    match jar.get(COOKIE_NAME) {
        Some(cookie) if !submitted.is_empty() && cookie.value() == submitted => Ok(()),
        _ => Err(AppError::FormTampered),
    }
}
