//! CSRF token lookup.
//!
//! The backend issues its token as a same-origin cookie; mutating requests
//! must echo it in a header. The cookie string is read fresh for every
//! request since the backend may rotate the token at login.

/// Source of the page's cookie string (`name=value; other=value`).
pub trait CookieSource {
    /// Current cookie string, or `None` when cookies are unavailable.
    fn cookie_string(&self) -> Option<String>;
}

/// A fixed cookie string, for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticCookies(pub String);

impl StaticCookies {
    pub fn new(cookies: impl Into<String>) -> Self {
        Self(cookies.into())
    }
}

impl CookieSource for StaticCookies {
    fn cookie_string(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Find a cookie by exact name and return its URI-decoded value.
///
/// A value that fails to decode is returned as-is.
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key != name {
            return None;
        }
        Some(
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cookie() {
        let cookies = "sessionid=abc; csrftoken=tok123; theme=dark";
        assert_eq!(find_cookie(cookies, "csrftoken"), Some("tok123".to_string()));
        assert_eq!(find_cookie(cookies, "theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_prefix_name_does_not_match() {
        let cookies = "xcsrftoken=wrong; csrftoken2=also; csrftoken=right";
        assert_eq!(find_cookie(cookies, "csrftoken"), Some("right".to_string()));
    }

    #[test]
    fn test_missing_cookie() {
        assert_eq!(find_cookie("", "csrftoken"), None);
        assert_eq!(find_cookie("a=1", "csrftoken"), None);
        assert_eq!(find_cookie("a=1", ""), None);
    }

    #[test]
    fn test_value_is_decoded() {
        assert_eq!(find_cookie("csrftoken=a%20b%3D", "csrftoken"), Some("a b=".to_string()));
    }

    #[test]
    fn test_value_containing_equals() {
        assert_eq!(find_cookie("csrftoken=a=b", "csrftoken"), Some("a=b".to_string()));
    }
}
