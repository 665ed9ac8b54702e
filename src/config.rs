use clap::Parser;
use std::path::{Path, PathBuf};

/// Environment variable holding the Sendinblue API key.
pub const API_KEY_ENV: &str = "SEND_IN_BLUE_API_KEY";

pub const DEFAULT_API_BASE: &str = "https://api.sendinblue.com";

#[derive(Debug, Parser)]
#[command(name = "price-watcher", about = "Price tracker", version)]
pub struct Args {
    /// Path to items.json
    #[arg(short = 'i', long = "items", default_value = "items.json")]
    pub items: PathBuf,

    /// Email address at which to send notification
    #[arg(short = 'e', long = "email")]
    pub email: Option<String>,

    /// key=value file consulted for the API key when the environment
    /// variable is unset
    #[arg(long = "credentials", default_value = "email.env")]
    pub credentials: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub request_timeout: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
            user_agent: "PriceWatcher/0.1".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub sender_name: String,
    pub sender_email: String,
}

impl NotifierConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            sender_name: "PriceWatcher".to_string(),
            sender_email: "price@watch.com".to_string(),
        }
    }
}

/// Resolve the provider API key: environment variable first, then a local
/// key=value credentials file. An entry named after the variable wins;
/// otherwise the last entry in the file applies.
pub fn resolve_api_key(env_value: Option<String>, credentials_path: &Path) -> Option<String> {
    if let Some(key) = env_value {
        return Some(key);
    }
    if !credentials_path.exists() {
        return None;
    }

    let entries = dotenvy::from_path_iter(credentials_path).ok()?;
    let mut fallback = None;
    for entry in entries {
        let Ok((name, value)) = entry else { continue };
        if name == API_KEY_ENV {
            return Some(value);
        }
        fallback = Some(value);
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_env_value_wins() {
        let key = resolve_api_key(
            Some("from-env".to_string()),
            Path::new("does-not-exist.env"),
        );
        assert_eq!(key, Some("from-env".to_string()));
    }

    #[test]
    fn test_missing_everything() {
        let key = resolve_api_key(None, Path::new("does-not-exist.env"));
        assert!(key.is_none());
    }

    #[test]
    fn test_named_entry_in_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SEND_IN_BLUE_API_KEY=xkeysib-secret").unwrap();

        let key = resolve_api_key(None, file.path());
        assert_eq!(key, Some("xkeysib-secret".to_string()));
    }

    #[test]
    fn test_any_single_entry_accepted() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "API_KEY=xkeysib-other").unwrap();

        let key = resolve_api_key(None, file.path());
        assert_eq!(key, Some("xkeysib-other".to_string()));
    }

    #[test]
    fn test_named_entry_beats_position() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SEND_IN_BLUE_API_KEY=wanted").unwrap();
        writeln!(file, "OTHER=ignored").unwrap();

        let key = resolve_api_key(None, file.path());
        assert_eq!(key, Some("wanted".to_string()));
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["price-watcher"]);
        assert_eq!(args.items, PathBuf::from("items.json"));
        assert_eq!(args.credentials, PathBuf::from("email.env"));
        assert!(args.email.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let args = Args::parse_from([
            "price-watcher",
            "-i",
            "/tmp/items.json",
            "-e",
            "someone@example.com",
        ]);
        assert_eq!(args.items, PathBuf::from("/tmp/items.json"));
        assert_eq!(args.email.as_deref(), Some("someone@example.com"));
    }
}
