use clap::Parser;
use colored::Colorize;
use nearby::application::view::Page;
use nearby::domain::model::EventFilters;
use nearby::infrastructure;
use nearby::infrastructure::config::load_config;
use nearby::interfaces::cli::Cli;
use nearby::presentation::render::{format_screen, TerminalView};
use nearby::presentation::theme::Theme;
use nearby::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let mut config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        infrastructure::config::generate_config_sample()?;
        return Ok(());
    }

    if let Some(uid) = &cli.uid {
        config.auth.uid = Some(uid.clone());
    }

    let db_path = infrastructure::config::get_database_path(&config);
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let db_conn = infrastructure::storage::db::init_database(&db_path).await?;
    let state = AppState::new(db_conn, config.clone()).await?;

    if cli.status {
        print_status(&state).await?;
        return Ok(());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    tokio::select! {
        result = run(&state, &cli, &theme) => result,
        _ = shutdown_rx => {
            eprintln!("Interrupted before the event list finished loading");
            Ok(())
        }
    }
}

async fn run(state: &AppState, cli: &Cli, theme: &Theme) -> anyhow::Result<()> {
    if cli.forget_location {
        state.location.clear_user_location().await;
        println!("{}", "Saved location cleared".green());
        return Ok(());
    }

    if cli.genres {
        let genres = state.backend.list_genres().await?;
        for genre in genres {
            println!("{:<20} {}", genre.key(), genre.name);
        }
        return Ok(());
    }

    let view = TerminalView::new();
    let filters = EventFilters {
        genre: cli.genre.clone().unwrap_or_default(),
        date: cli.date,
        price_max: cli.price_max,
        sort: cli.sort.clone(),
    };
    let mut controller = state.controller(Box::new(view.clone())).with_filters(filters);

    controller.start().await;

    if let Some(coords) = cli.here {
        controller.use_device_location(coords).await;
    } else if let Some(place) = &cli.near {
        // Error already surfaced as an alert
        let _ = controller.use_place_location(place).await;
    }

    if let Some(event_id) = cli.favorite {
        controller.toggle_favorite(event_id).await;
    }

    if let Some(query) = &cli.search {
        controller.search(query);
    }

    let screen = view.screen();
    if cli.json {
        let cards = match &screen.page {
            Some(Page::Events(cards)) => cards.clone(),
            _ => Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        print!(
            "{}",
            format_screen(&screen, theme, state.config.enable_emoji)
        );
    }

    if let Some(Page::Error(_)) = screen.page {
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &infrastructure::config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn print_status(state: &AppState) -> anyhow::Result<()> {
    println!("{}", "nearby Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db_path = infrastructure::config::get_database_path(&state.config);
    let records = state.store.count().await?;
    println!("Database: {} ({} records)", db_path.display(), records);
    println!("Cached places: {}", state.location.cached_places());

    match state.location.load_user_location().await {
        Some(location) => println!(
            "Saved location: {} ({:.4}, {:.4})",
            location.label, location.coords.lat, location.coords.lng
        ),
        None => println!("Saved location: None"),
    }

    println!(
        "Config: {}",
        infrastructure::config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Backend: {}", state.config.backend.base_url);

    if state.config.auth.uid.is_some() {
        println!("Signed in: Yes");
    } else {
        println!("Signed in: No");
    }

    Ok(())
}
