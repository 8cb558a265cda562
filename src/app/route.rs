//! In-process routing.

use std::fmt;

/// Which view is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Listing,
    Detail {
        slug: String,
    },
    Login,
    Register,
}

impl Route {
    /// Web-style path, used in the header breadcrumb and in logs.
    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::Detail { slug } => format!("/blog/{}", slug),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
        }
    }

    /// Inverse of [`Route::path`]. Unknown paths are `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Listing),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            other => other
                .strip_prefix("/blog/")
                .filter(|slug| !slug.is_empty() && !slug.contains('/'))
                .map(|slug| Route::Detail {
                    slug: slug.to_string(),
                }),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Listing.path(), "/");
        assert_eq!(
            Route::Detail {
                slug: "hello-world".to_string()
            }
            .path(),
            "/blog/hello-world"
        );
        assert_eq!(Route::Login.to_string(), "/login");
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Listing));
        assert_eq!(Route::from_path("/register"), Some(Route::Register));
        assert_eq!(
            Route::from_path("/blog/hello-world"),
            Some(Route::Detail {
                slug: "hello-world".to_string()
            })
        );
        assert_eq!(Route::from_path("/blog/"), None);
        assert_eq!(Route::from_path("/admin"), None);
    }
}
