use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{BackendClient, OnboardingBackend};
use crate::config::Config;
use crate::tui::apps::{Onboarding, OnboardingFlags};
use crate::tui::{Runtime, Theme};

const FRAME: Duration = Duration::from_millis(16);

pub async fn start_command(config: Config) -> Result<()> {
    let client = BackendClient::new(&config.backend).context("Failed to create backend client")?;
    info!("Using backend {}", client.base_url());

    let backend: Arc<dyn OnboardingBackend> = Arc::new(client);
    let flags = OnboardingFlags {
        backend,
        animations: config.settings.animations,
    };
    let mut runtime = Runtime::<Onboarding>::new(flags, Theme::new(config.settings.theme))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_tui(&mut terminal, &mut runtime).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn is_global_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('q') | KeyCode::Char('c'))
}

async fn run_tui<B: Backend>(terminal: &mut Terminal<B>, runtime: &mut Runtime<Onboarding>) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Process all pending events first for minimal input latency
        let mut keep_running = true;
        while keep_running && event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if is_global_quit(key.code, key.modifiers) => keep_running = false,
                Event::Key(key) => keep_running = runtime.handle_key(key)?,
                Event::Mouse(mouse) => keep_running = runtime.handle_mouse(mouse)?,
                _ => {}
            }
        }

        keep_running = keep_running && runtime.poll_timers()? && runtime.poll_async()?;
        if !keep_running {
            info!("Leaving questionnaire at step {}", runtime.get_state().sequencer().current_index());
            break;
        }

        terminal.draw(|frame| runtime.render(frame))?;

        // Sleep for remainder of the frame (60 FPS)
        if let Some(remaining) = FRAME.checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}
