#[derive(Debug, thiserror::Error)]
pub enum CapsuleError {
    #[error("At least one option must be passed but `options` is empty.")]
    EmptyOptions,

    #[error(
        "The number of options and icons must be equal but `options` has {options} elements and `icons` has {icons} elements."
    )]
    IconCountMismatch { options: usize, icons: usize },

    #[error("The default value '{value}' is not included in the options.")]
    DefaultNotInOptions { value: String },

    #[error(
        "`label_visibility` must be one of 'visible', 'hidden' or 'collapsed' but it is {value}."
    )]
    InvalidLabelVisibility { value: String },

    #[error("`selection_mode` must be 'single' or 'multi' but it is {value}.")]
    InvalidSelectionMode { value: String },

    #[error("Malformed render payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CapsuleError>;

impl CapsuleError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CapsuleError::EmptyOptions => "CAPSULES_EMPTY_OPTIONS",
            CapsuleError::IconCountMismatch { .. } => "CAPSULES_ICON_COUNT_MISMATCH",
            CapsuleError::DefaultNotInOptions { .. } => "CAPSULES_DEFAULT_NOT_IN_OPTIONS",
            CapsuleError::InvalidLabelVisibility { .. } => "CAPSULES_INVALID_LABEL_VISIBILITY",
            CapsuleError::InvalidSelectionMode { .. } => "CAPSULES_INVALID_SELECTION_MODE",
            CapsuleError::Payload(_) => "CAPSULES_PAYLOAD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_counts() {
        let err = CapsuleError::IconCountMismatch {
            options: 3,
            icons: 2,
        };
        assert!(err.to_string().contains("`options` has 3 elements"));
        assert_eq!(err.error_code(), "CAPSULES_ICON_COUNT_MISMATCH");
    }
}
