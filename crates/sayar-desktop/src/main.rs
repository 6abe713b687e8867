use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use sayar_core::{ToneChannel, consts};

mod log_capture;
mod tone_generator;

use tone_generator::{AlarmToneGenerator, RodioDevice};

fn main() -> anyhow::Result<()> {
    log_capture::init(log::LevelFilter::Debug);

    let backend = AlarmToneGenerator::new(RodioDevice);
    let channel = ToneChannel::new(&backend);
    log::info!(
        "channel {} ready: T plays {}, U sends an unknown method, Q quits",
        channel.name(),
        consts::METHOD_PLAY_WARNING_TONE
    );

    enable_raw_mode()?;
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    let outcome = channel.handle(consts::METHOD_PLAY_WARNING_TONE);
                    log::info!("{} -> {:?}", consts::METHOD_PLAY_WARNING_TONE, outcome);
                }
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    let outcome = channel.handle("unknownMethod");
                    log::info!("unknownMethod -> {:?}", outcome);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                _ => (),
            },
            _ => (),
        }
    }
    disable_raw_mode()?;

    Ok(())
}
