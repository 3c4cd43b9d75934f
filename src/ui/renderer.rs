//! Terminal setup and the main event loop

use crate::ui::app_component::AppComponent;
use crate::ui::core::{AppContext, Component, EventHandler, EventType};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

/// Run the TUI until the user quits
pub async fn run_app(context: AppContext) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initialize application components
    let mut app = AppComponent::new(context);
    let mut event_handler = EventHandler::new();
    app.load_initial_data();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    let mut needs_render = true;

    loop {
        // Render when needed
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        let event_result = event_handler.next_event().await?;

        match event_result {
            EventType::Key(_) | EventType::Resize(_, _) => {
                app.handle_event(event_result).await?;
                needs_render = true;
            }
            EventType::Tick => {
                app.handle_event(EventType::Tick).await?;

                // Process background actions on tick
                for action in app.process_background_actions() {
                    // Process action through component hierarchy first
                    let processed_action = app.update(action);
                    app.handle_app_action(processed_action).await;
                }
                // Spinners and toast expiry need a redraw on every tick
                needs_render = true;
            }
            EventType::Other => {}
        }

        // Check if app wants to quit
        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
