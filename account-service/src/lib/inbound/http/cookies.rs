use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

use crate::config::CookieConfig;
use crate::config::SameSitePolicy;
use crate::domain::session::models::SessionCookie;
use crate::domain::session::models::SessionCookies;

/// Transport attributes applied to every session cookie.
///
/// Session cookies are always HttpOnly; `Secure` and `SameSite` come from
/// configuration so local HTTP development keeps working.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl From<&CookieConfig> for CookieSettings {
    fn from(config: &CookieConfig) -> Self {
        let same_site = match config.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        };

        Self {
            secure: config.secure,
            same_site,
            path: "/".to_string(),
        }
    }
}

impl CookieSettings {
    /// Build the `Set-Cookie` value for one session cookie.
    pub fn build(&self, cookie: SessionCookie) -> Cookie<'static> {
        Cookie::build((cookie.name, cookie.value))
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path(self.path.clone())
            .max_age(time::Duration::seconds(cookie.max_age_seconds))
            .build()
    }

    /// Add both session cookies to the response jar.
    pub fn apply(&self, jar: CookieJar, cookies: SessionCookies) -> CookieJar {
        cookies
            .into_array()
            .into_iter()
            .fold(jar, |jar, cookie| jar.add(self.build(cookie)))
    }
}

/// Non-empty value of a request cookie.
///
/// A cleared session cookie that a client keeps sending counts as absent.
pub fn cookie_value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}
