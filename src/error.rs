pub type PixmergeResult<T> = Result<T, PixmergeError>;

#[derive(thiserror::Error, Debug)]
pub enum PixmergeError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmergeError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PixmergeError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            PixmergeError::invalid_input("x")
                .to_string()
                .contains("invalid input:")
        );
        assert!(
            PixmergeError::invalid_config("x")
                .to_string()
                .contains("invalid config:")
        );
        assert!(
            PixmergeError::render("x")
                .to_string()
                .contains("render error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PixmergeError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
