use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::calculator::{Calculator, Tab};
use crate::config::Config;
use crate::ui;

pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async_run(config))
}

async fn async_run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut calculator = Calculator::new(&config);
    tracing::info!("calculator started");

    let result = run_loop(&mut terminal, &mut calculator).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let report = calculator.report();
    tracing::info!(
        new_rating = report.update.new_rating,
        delta = report.update.delta,
        "calculator closed"
    );
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    calculator: &mut Calculator,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut event_stream = EventStream::new();
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui::draw(f, calculator))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if handle_key(calculator, key) {
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }
            _ = tokio::time::sleep(tick_rate) => {}
        }
    }
}

/// Returns `true` when the user asked to quit.
pub fn handle_key(calculator: &mut Calculator, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab => {
            calculator.tab = calculator.tab.next();
            return false;
        }
        _ => {}
    }

    match calculator.tab {
        Tab::Calculator => handle_calculator_key(calculator, key),
        Tab::Explanation => handle_explanation_key(calculator, key),
    }
    false
}

fn handle_calculator_key(calculator: &mut Calculator, key: KeyEvent) {
    match key.code {
        KeyCode::Up => calculator.move_focus(-1),
        KeyCode::Down => calculator.move_focus(1),
        KeyCode::Left => calculator.adjust(-1),
        KeyCode::Right => calculator.adjust(1),
        KeyCode::PageDown => calculator.adjust(-100),
        KeyCode::PageUp => calculator.adjust(100),
        KeyCode::Backspace | KeyCode::Delete => calculator.backspace(),
        KeyCode::Enter | KeyCode::Char(' ') => calculator.toggle(),
        KeyCode::Char(c @ '0'..='9') => calculator.type_digit(c as u8 - b'0'),
        KeyCode::Char('a') | KeyCode::Char('+') => calculator.add_match(),
        KeyCode::Char('d') | KeyCode::Char('-') => calculator.remove_last_match(),
        KeyCode::Char('[') => calculator.cycle_detail(-1),
        KeyCode::Char(']') => calculator.cycle_detail(1),
        KeyCode::Char('g') | KeyCode::Char('G') => {
            calculator.show_graphs = !calculator.show_graphs;
        }
        _ => {}
    }
}

fn handle_explanation_key(calculator: &mut Calculator, key: KeyEvent) {
    match key.code {
        KeyCode::Up => calculator.scroll_explanation(-1),
        KeyCode::Down => calculator.scroll_explanation(1),
        _ => {}
    }
}
