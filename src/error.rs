use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("zone {0} does not exist")]
    ZoneNotFound(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered but rejected the request.
    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0:#}")]
    Config(anyhow::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl Error {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Auth(_) => 3,
            Error::ZoneNotFound(_) => 4,
            Error::Network(_) | Error::Api { .. } | Error::Decode(_) => 5,
            Error::Config(_) => 6,
            Error::Terminal(_) => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let auth = Error::Auth("missing token".into());
        let zone = Error::ZoneNotFound("example.com".into());
        let api = Error::Api {
            status: 400,
            message: "bad".into(),
        };
        let config = Error::Config(anyhow::anyhow!("bad yaml"));

        assert_eq!(auth.exit_code(), 3);
        assert_eq!(zone.exit_code(), 4);
        assert_eq!(api.exit_code(), 5);
        assert_eq!(config.exit_code(), 6);
        assert_eq!(zone.to_string(), "zone example.com does not exist");
    }
}
