use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

mod cli;

use cli::{Cli, Commands};
use flagedit::{
    config::Config,
    editor::{ListEditor, ANY_COMPONENT},
    submit::encode_form,
    tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "flagedit=info");
    }

    let config = Config::from_env()?.with_seed_path(cli.command.seed());
    config.validate()?;

    init_logging(&config, cli.command.is_interactive());

    match &cli.command {
        Commands::Edit { .. } => run_editor(config).await,
        Commands::Show { .. } => {
            let seed = config.load_seed()?;
            print_tables(&ListEditor::from_seed(&seed));
            Ok(())
        }
        Commands::Encode { .. } => {
            let seed = config.load_seed()?;
            let editor = ListEditor::from_seed(&seed);
            let body = encode_form(&seed.properties, &editor)?;
            println!("{}", body);
            Ok(())
        }
    }
}

/// Log to a file, and to stderr too unless the terminal belongs to the TUI
fn init_logging(config: &Config, interactive: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let directory = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "flagedit.log".into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = (!interactive).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

async fn run_editor(config: Config) -> Result<()> {
    info!("Starting flag editor with seed {}", config.seed_path.display());

    // a broken seed still opens the editor, which then explains the failure
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => info!("Flag editor exited"),
        Err(e) => {
            error!("Flag editor encountered an error: {}", e);
            return Err(e).context("flag editor failed");
        }
    }

    if let Some(body) = app.submitted {
        println!("{}", body);
    }

    Ok(())
}

fn print_tables(editor: &ListEditor) {
    let groups = editor.groups();

    println!("Values ({})", editor.values().len());
    println!("{:<4} {:<24} {:<16} {:<6}", "#", "Value", "Setter", "Active");
    println!("{}", "-".repeat(53));
    for (i, value) in editor.values().iter().enumerate() {
        let setter = groups
            .iter()
            .find(|g| g.id == value.setter_group_id)
            .map(|g| g.name.as_str())
            .unwrap_or("");
        println!(
            "{:<4} {:<24} {:<16} {:<6}",
            i + 1,
            value.value,
            setter,
            if value.is_active { "yes" } else { "no" }
        );
    }

    println!();
    println!("Visibility ({})", editor.visibility().len());
    println!("{:<24} {:<24}", "Product", "Component");
    println!("{}", "-".repeat(49));
    for row in editor.visibility_table().body() {
        println!("{:<24} {:<24}", row.product, row.component);
    }

    if editor.visibility().iter().any(|v| v.is_any_component()) {
        println!();
        println!("{} matches every component of the product", ANY_COMPONENT);
    }
}
