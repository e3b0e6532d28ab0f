// src/main.rs

use bookpedia::formatting::{book_list, detail_screen, list_screen};
use bookpedia::{
    retry_with_backoff, AppConfig, AppError, Book, BookDetailPresenter, BookId, BookListAction,
    BookListPresenter, BookListTab, BookRepository, Command, CommandLineInput,
    DefaultBookRepository, DetailAction, DetailEvent, FavoriteBookStore, InMemoryFavoriteStore,
    JsonFileFavoriteStore, ListEvent, OpenLibraryClient, RemoteBookSource, ResultExt, ToUiText,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// First delay of the caller-side retry for one-shot searches.
const RETRY_INITIAL_DELAY: Duration = Duration::from_millis(500);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

/// How long `browse` waits for a detail screen to finish loading before printing it.
const DETAIL_SETTLE_TIMEOUT: Duration = Duration::from_secs(25);

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("bookpedia.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Logs go to stderr so they never interleave with rendered output.
    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the repository from the resolved configuration.
async fn wire_repository(config: &AppConfig) -> Result<Arc<dyn BookRepository>, AppError> {
    let remote: Arc<dyn RemoteBookSource> =
        Arc::new(OpenLibraryClient::new(config.client.clone())?);

    let store: Arc<dyn FavoriteBookStore> = match &config.favorites_path {
        Some(path) => {
            log::info!("Favorites stored in {}", path.display());
            Arc::new(JsonFileFavoriteStore::open(path).await?)
        }
        None => {
            log::info!("Favorites kept in memory for this run");
            Arc::new(InMemoryFavoriteStore::new())
        }
    };

    Ok(Arc::new(DefaultBookRepository::new(
        remote,
        store,
        config.repository.clone(),
    )))
}

async fn execute(command: Command, config: &AppConfig) -> Result<(), AppError> {
    let repository = wire_repository(config).await?;

    match command {
        Command::Search { query, retries } => {
            let books = search_with_retries(repository.as_ref(), &query, retries).await?;
            print!("{}", book_list(&books, "No results."));
        }
        Command::Describe { id } => {
            let id = BookId::parse(&id)?;
            match repository.book_description(&id).await? {
                Some(description) => println!("{}", description),
                None => println!("No description available."),
            }
        }
        Command::Favorites => {
            let favorites = repository.favorite_books().borrow().clone();
            print!("{}", book_list(&favorites, "No favorite books yet."));
        }
        Command::Favorite { query, pick } => {
            let books = search_with_retries(repository.as_ref(), &query, 0).await?;
            let book = pick
                .checked_sub(1)
                .and_then(|index| books.get(index))
                .cloned()
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "result #{} for {:?} ({} results)",
                        pick,
                        query,
                        books.len()
                    ))
                })?;
            favorite_with_description(repository.as_ref(), book).await?;
        }
        Command::Unfavorite { id } => {
            let id = BookId::parse(&id)?;
            repository.delete_from_favorites(&id).await?;
            println!("✓ Removed {} from favorites", id);
        }
        Command::Browse => browse(repository, config).await?,
    }

    Ok(())
}

async fn search_with_retries(
    repository: &dyn BookRepository,
    query: &str,
    retries: u32,
) -> Result<Vec<Book>, AppError> {
    let books = retry_with_backoff(
        move || repository.search_books(query),
        retries.saturating_add(1),
        RETRY_INITIAL_DELAY,
        RETRY_MAX_DELAY,
    )
    .await
    .on_error(|e| eprintln!("{}", e.to_ui_text()))?;
    Ok(books)
}

/// Stores the book with its description, so it reads the same offline.
async fn favorite_with_description(
    repository: &dyn BookRepository,
    book: Book,
) -> Result<(), AppError> {
    let description = match repository.book_description(&book.id).await {
        Ok(description) => description,
        Err(e) => {
            log::warn!("Saving {} without description: {}", book.id, e);
            None
        }
    };
    let book = book.with_description(description);
    repository
        .mark_as_favorite(&book)
        .await
        .on_error(|e| eprintln!("{}", e.to_ui_text()))?;
    println!("✓ Added \"{}\" [{}] to favorites", book.title, book.id);
    Ok(())
}

/// Interactive search. Each stdin line replaces the query; lines starting
/// with `:` are commands.
async fn browse(repository: Arc<dyn BookRepository>, config: &AppConfig) -> Result<(), AppError> {
    let (presenter, mut list_events) =
        BookListPresenter::spawn(Arc::clone(&repository), config.search.clone());

    println!("Type to search. Commands: :search, :favorites, :open N, :toggle, :quit");

    let mut list_state = presenter.state();
    let printer = tokio::spawn(async move {
        while list_state.changed().await.is_ok() {
            let screen = list_screen(&list_state.borrow_and_update());
            print!("{}", screen);
        }
    });

    let mut detail: Option<(BookDetailPresenter, tokio::sync::mpsc::UnboundedReceiver<DetailEvent>)> =
        None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit", _) => break,
            (":search", _) => presenter.on_action(BookListAction::TabSelected(BookListTab::Search)),
            (":favorites", _) => {
                presenter.on_action(BookListAction::TabSelected(BookListTab::Favorites))
            }
            (":open", position) => {
                let snapshot = presenter.snapshot();
                let book = position
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|index| snapshot.visible_books().get(index).cloned());
                match book {
                    Some(book) => presenter.on_action(BookListAction::BookClicked(book)),
                    None => {
                        eprintln!("No book at position {:?}", position.trim());
                        continue;
                    }
                }
                if let Some(ListEvent::OpenDetail(book)) = list_events.recv().await {
                    let (opened, events) = BookDetailPresenter::spawn(Arc::clone(&repository), book);
                    print_detail_when_loaded(&opened).await;
                    detail = Some((opened, events));
                }
            }
            (":toggle", _) => match &mut detail {
                Some((opened, events)) => {
                    let mut state = opened.state();
                    let was_favorite = state.borrow_and_update().is_favorite;
                    opened.on_action(DetailAction::FavoriteClicked).await;

                    if let Ok(DetailEvent::FavoriteFailed(message)) = events.try_recv() {
                        eprintln!("! {}", message);
                        continue;
                    }
                    let flipped = tokio::time::timeout(
                        Duration::from_secs(1),
                        state.wait_for(|s| s.is_favorite != was_favorite),
                    )
                    .await
                    .is_ok();
                    if !flipped {
                        log::debug!("Favorite status did not change within a second");
                    }
                    if let Some(screen) = detail_screen(&opened.snapshot()) {
                        print!("{}", screen);
                    }
                }
                None => eprintln!("Open a book first with :open N"),
            },
            _ if line.starts_with(':') => eprintln!("Unknown command {:?}", line),
            _ => presenter.on_action(BookListAction::SearchQueryChanged(line.to_string())),
        }
    }

    printer.abort();
    Ok(())
}

async fn print_detail_when_loaded(presenter: &BookDetailPresenter) {
    let mut state = presenter.state();
    let loaded = tokio::time::timeout(DETAIL_SETTLE_TIMEOUT, state.wait_for(|s| !s.is_loading))
        .await
        .is_ok();
    if !loaded {
        log::warn!("Description still loading, showing what is available");
    }
    if let Some(screen) = detail_screen(&presenter.snapshot()) {
        print!("{}", screen);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = AppConfig::resolve(&cli)?;

    execute(cli.command, &config).await?;

    Ok(())
}
