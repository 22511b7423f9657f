use showcue::{
    countdown::{remaining_text, CountdownConfig, TICK_INTERVAL},
    settings::{apply_countdown_defaults, keys, InMemorySettings, Settings},
};
use std::io::Write;

#[derive(Debug, clap::Parser)]
pub struct Options {
    /// Target hour (0-23)
    #[arg(long)]
    hour: Option<i64>,

    /// Target minute (0-59)
    #[arg(long)]
    minute: Option<i64>,

    /// Target second (0-59)
    #[arg(long)]
    second: Option<i64>,

    /// Text shown once the target has passed
    #[arg(long)]
    finished_text: Option<String>,
}

pub fn run(opts: Options) -> anyhow::Result<()> {
    let mut settings = InMemorySettings::default();
    apply_countdown_defaults(&mut settings);

    if let Some(hour) = opts.hour {
        settings.set_int(keys::HOUR, hour);
    }
    if let Some(minute) = opts.minute {
        settings.set_int(keys::MINUTE, minute);
    }
    if let Some(second) = opts.second {
        settings.set_int(keys::SECOND, second);
    }
    if let Some(text) = opts.finished_text.as_deref() {
        settings.set_str(keys::FINISHED_TEXT, text);
    }

    let config = CountdownConfig::from_settings(&settings)?;
    let mut stdout = std::io::stdout();

    loop {
        let text = remaining_text(&config, chrono::Local::now().time());
        write!(stdout, "\r{text}        ")?;
        stdout.flush()?;

        if text == config.finished_text {
            writeln!(stdout)?;
            return Ok(());
        }

        std::thread::sleep(TICK_INTERVAL);
    }
}
