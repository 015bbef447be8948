use crossbeam_channel::{Receiver, unbounded};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use toefl_itp_trainer::{
    AiResponse, App, Config, ContentClient, OpenRouterClient, logger, spawn_ai_worker, ui,
};

fn main() -> io::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    logger::init(&config.log_file);
    logger::log(&format!("Starting with model {}", config.model.model));

    let provider = OpenRouterClient::new(&config.api_key, config.model.clone())
        .map_err(io::Error::other)?;
    let client = Arc::new(ContentClient::new(Box::new(provider)));

    let (ai_tx, ai_rx) = unbounded();
    let (resp_tx, resp_rx) = unbounded();
    let worker = spawn_ai_worker(client, ai_rx, resp_tx)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ai_tx);
    let result = run(&mut terminal, &mut app, &resp_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the app drops the last request sender, which stops the worker.
    drop(app);
    if worker.join().is_err() {
        logger::error("AI worker panicked");
    }
    logger::log("Shutting down");

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    responses: &Receiver<AiResponse>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        while let Ok(response) = responses.try_recv() {
            app.process_ai_response(response);
        }
    }
    Ok(())
}
