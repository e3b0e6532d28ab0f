// src/config.rs
use crate::constants::{
    FAVORITES_FILE_NAME, MIN_SEARCH_QUERY_LEN, OPEN_LIBRARY_BASE_URL, REQUEST_TIMEOUT,
    SEARCH_DEBOUNCE, SEARCH_LANGUAGE,
};
use crate::error::AppError;
use crate::repository::RepositoryConfig;
use crate::types::{ValidatedUrl, ValidationError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Largest page size the catalog accepts for one search.
const MAX_RESULT_LIMIT: u32 = 1000;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Catalog base URL
    #[arg(long, global = true, env = "BOOKPEDIA_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory holding the favorites table
    #[arg(long, global = true, env = "BOOKPEDIA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds for catalog calls
    #[arg(long, global = true, default_value_t = REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Maximum number of search results to request
    #[arg(long, global = true)]
    pub limit: Option<u32>,

    /// Language filter applied to searches
    #[arg(long, global = true, default_value = SEARCH_LANGUAGE)]
    pub language: String,

    /// Keep favorites in memory only; nothing is written to disk
    #[arg(long, global = true, default_value_t = false)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What the binary should do.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search the catalog once and print the results
    Search {
        query: String,
        /// Extra attempts after a transient failure
        #[arg(long, default_value_t = 2)]
        retries: u32,
    },
    /// Print the description of a book
    Describe { id: String },
    /// List favorite books
    Favorites,
    /// Search and mark one of the results as favorite
    Favorite {
        query: String,
        /// 1-based position in the search results
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },
    /// Remove a book from the favorites
    Unfavorite { id: String },
    /// Interactive search: every stdin line replaces the query
    Browse,
}

/// Settings for the Open Library HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: ValidatedUrl,
    /// Applied to both connecting and the whole request.
    pub request_timeout: Duration,
    /// Default `limit` for searches; `None` lets the catalog decide.
    pub result_limit: Option<u32>,
    pub language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: ValidatedUrl::parse(OPEN_LIBRARY_BASE_URL)
                .expect("Default catalog URL should be valid"),
            request_timeout: REQUEST_TIMEOUT,
            result_limit: None,
            language: SEARCH_LANGUAGE.to_string(),
        }
    }
}

/// Settings for the search coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce: Duration,
    /// Shortest non-blank query, in characters, that is searched.
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
            min_query_len: MIN_SEARCH_QUERY_LEN,
        }
    }
}

/// Resolved application configuration, validated and ready to wire the data layer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub search: SearchConfig,
    pub repository: RepositoryConfig,
    /// `None` when favorites are kept in memory.
    pub favorites_path: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let base_url = match &cli.base_url {
            Some(url) => ValidatedUrl::parse(url)?,
            None => ValidatedUrl::parse(OPEN_LIBRARY_BASE_URL)?,
        };

        if cli.timeout_secs == 0 {
            return Err(AppError::InvalidConfiguration(
                "timeout must be at least one second".to_string(),
            ));
        }

        if let Some(limit) = cli.limit {
            if !(1..=MAX_RESULT_LIMIT).contains(&limit) {
                return Err(ValidationError::OutOfBounds {
                    value: u64::from(limit),
                    min: 1,
                    max: u64::from(MAX_RESULT_LIMIT),
                }
                .into());
            }
        }

        let language = cli.language.trim();
        if language.is_empty() {
            return Err(ValidationError::EmptyField("language").into());
        }

        let favorites_path = if cli.ephemeral {
            None
        } else {
            let data_dir = match &cli.data_dir {
                Some(dir) => dir.clone(),
                None => default_data_dir().ok_or_else(|| {
                    AppError::MissingConfiguration(
                        "set BOOKPEDIA_DATA_DIR or HOME to locate the favorites table"
                            .to_string(),
                    )
                })?,
            };
            Some(data_dir.join(FAVORITES_FILE_NAME))
        };

        Ok(AppConfig {
            client: ClientConfig {
                base_url,
                request_timeout: Duration::from_secs(cli.timeout_secs),
                result_limit: cli.limit,
                language: language.to_string(),
            },
            search: SearchConfig::default(),
            repository: RepositoryConfig {
                result_limit: cli.limit,
                ..RepositoryConfig::default()
            },
            favorites_path,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            search: SearchConfig::default(),
            repository: RepositoryConfig::default(),
            favorites_path: None,
        }
    }
}

/// `$XDG_DATA_HOME/bookpedia`, else `~/.local/share/bookpedia`.
fn default_data_dir() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_DATA_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".local/share"),
    };
    Some(base.join("bookpedia"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["bookpedia"];
        argv.extend_from_slice(args);
        CommandLineInput::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = parse(&["search", "dune", "--retries", "4"]);
        assert_eq!(
            cli.command,
            Command::Search {
                query: "dune".into(),
                retries: 4
            }
        );

        let cli = parse(&["favorite", "dune", "--pick", "3", "--ephemeral"]);
        assert_eq!(
            cli.command,
            Command::Favorite {
                query: "dune".into(),
                pick: 3
            }
        );
        assert!(cli.ephemeral);

        assert_eq!(parse(&["browse"]).command, Command::Browse);
    }

    #[test]
    fn test_resolve_applies_flags() {
        let cli = parse(&[
            "--base-url",
            "http://localhost:8080",
            "--data-dir",
            "/tmp/bookpedia-test",
            "--timeout-secs",
            "5",
            "--limit",
            "10",
            "favorites",
        ]);
        let config = AppConfig::resolve(&cli).unwrap();

        assert_eq!(config.client.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.client.request_timeout, Duration::from_secs(5));
        assert_eq!(config.client.result_limit, Some(10));
        assert_eq!(config.client.language, "eng");
        assert_eq!(config.repository.result_limit, Some(10));
        assert_eq!(
            config.favorites_path,
            Some(PathBuf::from("/tmp/bookpedia-test/favorites.json"))
        );
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_ephemeral_has_no_favorites_path() {
        let cli = parse(&["--ephemeral", "favorites"]);
        let config = AppConfig::resolve(&cli).unwrap();
        assert_eq!(config.favorites_path, None);
    }

    #[test]
    fn test_resolve_rejects_invalid_input() {
        let cli = parse(&["--ephemeral", "--base-url", "ftp://example.com", "favorites"]);
        assert!(matches!(
            AppConfig::resolve(&cli),
            Err(AppError::ValidationError(ValidationError::InvalidUrl { .. }))
        ));

        let cli = parse(&["--ephemeral", "--limit", "0", "favorites"]);
        assert!(matches!(
            AppConfig::resolve(&cli),
            Err(AppError::ValidationError(ValidationError::OutOfBounds { .. }))
        ));

        let cli = parse(&["--ephemeral", "--timeout-secs", "0", "favorites"]);
        assert!(matches!(
            AppConfig::resolve(&cli),
            Err(AppError::InvalidConfiguration(_))
        ));

        let cli = parse(&["--ephemeral", "--language", " ", "favorites"]);
        assert!(matches!(
            AppConfig::resolve(&cli),
            Err(AppError::ValidationError(ValidationError::EmptyField("language")))
        ));
    }
}
