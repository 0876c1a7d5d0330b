pub mod domain;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    pub const DEFAULT_BASE_URL: &str = "https://yfapi.net";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_OUTPUT_PATH: &str = "output.csv";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_key: Option<String>,
        pub base_url: Option<String>,
        pub timeout_secs: Option<u64>,
        pub output_path: Option<PathBuf>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let timeout_secs = match std::env::var("YFAPI_TIMEOUT_SECS") {
                Ok(s) => Some(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("YFAPI_TIMEOUT_SECS is not a number: {s}"))?,
                ),
                Err(_) => None,
            };

            Ok(Self {
                api_key: non_empty_var("API_KEY"),
                base_url: non_empty_var("YFAPI_BASE_URL"),
                timeout_secs,
                output_path: non_empty_var("STOCKPEEK_OUTPUT").map(PathBuf::from),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn base_url(&self) -> &str {
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
        }

        pub fn timeout_secs(&self) -> u64 {
            self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
        }

        pub fn output_path(&self) -> PathBuf {
            self.output_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn defaults_apply_when_unset() {
            let settings = Settings {
                api_key: None,
                base_url: None,
                timeout_secs: None,
                output_path: None,
                sentry_dsn: None,
            };
            assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
            assert_eq!(settings.timeout_secs(), DEFAULT_TIMEOUT_SECS);
            assert_eq!(settings.output_path(), PathBuf::from("output.csv"));
        }
    }
}
