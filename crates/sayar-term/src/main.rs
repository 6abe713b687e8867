use std::io::{self, BufRead};

use sayar_core::{ToneChannel, consts};

mod bell;
mod log_capture;

fn main() -> anyhow::Result<()> {
    log_capture::init(log::LevelFilter::Info);

    let backend = bell::TerminalBell;
    let channel = ToneChannel::new(&backend);
    log::info!(
        "channel {} ready: type a method name ({} rings the bell), Ctrl-D exits",
        channel.name(),
        consts::METHOD_PLAY_WARNING_TONE
    );

    for line in io::stdin().lock().lines() {
        let line = line?;
        let method = line.trim();
        if method.is_empty() {
            continue;
        }
        let outcome = channel.handle(method);
        log::info!("{} -> {:?}", method, outcome);
    }

    Ok(())
}
