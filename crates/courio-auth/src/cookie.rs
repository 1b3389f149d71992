//! Transport-neutral description of the session cookie.

use chrono::{DateTime, Utc};

/// Attributes of the `Set-Cookie` header carrying (or clearing) a
/// session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub path: &'static str,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: &'static str,
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<i64>,
}

impl SessionCookie {
    /// Cookie carrying `token` until `expires_at`.
    pub fn issue(name: &str, token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value: token.into(),
            path: "/",
            http_only: true,
            secure: true,
            same_site: "Lax",
            expires: Some(expires_at),
            max_age: None,
        }
    }

    /// Cookie that makes the client drop the session token.
    pub fn removal(name: &str) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            path: "/",
            http_only: true,
            secure: true,
            same_site: "Lax",
            expires: None,
            max_age: Some(0),
        }
    }

    /// Render as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        let mut header = format!("{}={}; Path={}", self.name, self.value, self.path);
        if let Some(expires) = self.expires {
            header.push_str("; Expires=");
            header.push_str(&expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
        }
        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header.push_str("; SameSite=");
        header.push_str(self.same_site);
        header
    }
}
