//! Error types for the site behaviour layer.

use miette::Diagnostic;

/// Main error type for mounting site components.
///
/// Missing optional markup is not an error: a component whose elements are
/// absent simply isn't mounted. These variants cover the environment itself
/// misbehaving.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum SiteError {
    /// There is no global `window` (not running in a browser main thread)
    #[error("no global `window` exists")]
    #[diagnostic(code(shakes::no_window))]
    NoWindow,

    /// The window has no document attached
    #[error("window has no `document`")]
    #[diagnostic(code(shakes::no_document))]
    NoDocument,

    /// A DOM call threw
    #[error("{context}: {message}")]
    #[diagnostic(code(shakes::js))]
    Js {
        context: &'static str,
        message: String,
    },

    /// Configuration could not be parsed or is out of range
    #[error("invalid site configuration: {0}")]
    #[diagnostic(
        code(shakes::config),
        help("omitted fields fall back to their defaults")
    )]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_error_display() {
        let err = SiteError::Js {
            context: "querying .menu-item",
            message: "SyntaxError".to_string(),
        };
        assert_eq!(err.to_string(), "querying .menu-item: SyntaxError");
    }

    #[test]
    fn test_config_error_has_code() {
        let err = SiteError::Config("autoplay interval must be positive".into());
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("shakes::config"));
    }
}
