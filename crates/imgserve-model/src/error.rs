use thiserror::Error;

/// Failure of a [`crate::Params`] lookup.
///
/// `param` is the full dotted path of the offending key, so an error raised
/// inside a nested map still names the outer key it was reached through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing param: {param}")]
    Missing { param: String },

    #[error("invalid param {param}: expected {expected}")]
    InvalidType {
        param: String,
        expected: &'static str,
    },
}

impl ParamError {
    /// Name (dotted path) of the param this error refers to.
    pub fn param(&self) -> &str {
        match self {
            ParamError::Missing { param } | ParamError::InvalidType { param, .. } => param,
        }
    }

    /// Returns `true` if the param was absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, ParamError::Missing { .. })
    }

    /// Prepend `prefix` to the param path (`inner` -> `prefix.inner`).
    pub fn prefixed(self, prefix: &str) -> Self {
        let join = |param: String| format!("{prefix}.{param}");
        match self {
            ParamError::Missing { param } => ParamError::Missing {
                param: join(param),
            },
            ParamError::InvalidType { param, expected } => ParamError::InvalidType {
                param: join(param),
                expected,
            },
        }
    }
}

pub type ParamResult<T> = Result<T, ParamError>;

#[cfg(test)]
mod tests {
    use super::ParamError;

    #[test]
    fn prefixed_builds_dotted_path() {
        let err = ParamError::Missing {
            param: "width".into(),
        }
        .prefixed("resize")
        .prefixed("ops");

        assert_eq!(err.param(), "ops.resize.width");
        assert!(err.is_missing());
        assert_eq!(err.to_string(), "missing param: ops.resize.width");
    }

    #[test]
    fn invalid_type_keeps_expected_kind() {
        let err = ParamError::InvalidType {
            param: "q".into(),
            expected: "int",
        }
        .prefixed("jpeg");

        assert!(!err.is_missing());
        assert_eq!(err.to_string(), "invalid param jpeg.q: expected int");
    }
}
