use crossterm::{
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

type CrossTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

pub fn with_terminal<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut CrossTerminal) -> anyhow::Result<()>,
{
    let mut terminal = acquire()?;
    set_panic_hook();
    f(&mut terminal)?;
    release()
}

fn acquire() -> anyhow::Result<CrossTerminal> {
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;

    Ok(terminal)
}

fn release() -> anyhow::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn set_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = release();
        original_hook(panic);
    }));
}

pub enum Flow {
    Continue,
    Exit,
}

pub trait Base {
    /// Called at terminal refresh rate
    fn update(&mut self) -> anyhow::Result<Flow>;

    /// Called when a key press has been detected
    fn on_keypress(&mut self, key: KeyEvent) -> anyhow::Result<Flow>;

    /// Render the terminal UI frame
    fn render(&mut self, frame: &mut Frame);
}

pub fn run(
    terminal: &mut Terminal<impl Backend>,
    app: &mut impl Base,
    fps: f32,
) -> anyhow::Result<()> {
    terminal.clear()?;

    let tick_rate = Duration::from_millis((1000. / fps) as u64);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| app.render(f))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('c') if matches!(key.modifiers, KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => match app.on_keypress(key)? {
                            Flow::Continue => (),
                            Flow::Exit => break,
                        },
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            match app.update()? {
                Flow::Continue => (),
                Flow::Exit => break,
            }
        }
    }

    Ok(())
}
