//! Error types for route template compilation.

use thiserror::Error;

/// Errors that can occur while compiling a route template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// An inline placeholder constraint is not a valid regular expression.
    #[error("invalid pattern in route '{template}': {reason}")]
    InvalidPattern {
        /// The route template being compiled.
        template: String,
        /// The regex compiler's explanation.
        reason: String,
    },

    /// An inline constraint contains a capturing group, which would shift
    /// the positional binding of later placeholders.
    #[error("placeholder '{name}' in route '{template}' contains a capturing group")]
    CapturingGroup {
        /// The route template being compiled.
        template: String,
        /// The placeholder whose constraint captures.
        name: String,
    },

    /// A `{` without its closing `}` or vice versa.
    #[error("unbalanced braces in route '{template}'")]
    UnbalancedBraces {
        /// The route template being compiled.
        template: String,
    },

    /// A placeholder name is empty or contains unsupported characters.
    #[error("invalid placeholder name '{name}' in route '{template}'")]
    InvalidPlaceholder {
        /// The route template being compiled.
        template: String,
        /// The offending placeholder name.
        name: String,
    },

    /// The same variable name appears twice in one template.
    #[error("variable '{name}' is declared twice in route '{template}'")]
    DuplicateVariable {
        /// The route template being compiled.
        template: String,
        /// The duplicated name.
        name: String,
    },

    /// The HTTP method token could not be parsed.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;
