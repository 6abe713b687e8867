// Terminal bell backend: the system alert sound, fired synchronously
use std::io::{self, Write};

use sayar_core::error::ToneInitiationError;
use sayar_core::tone::ToneBackend;

const BEL: u8 = 0x07;

pub struct TerminalBell;

impl ToneBackend for TerminalBell {
    fn play_warning_tone(&self) -> Result<(), ToneInitiationError> {
        // No resource lifecycle and no failure path: the bell either rings
        // or the write is silently lost.
        let mut out = io::stdout();
        let _ = out.write_all(&[BEL]);
        let _ = out.flush();
        Ok(())
    }
}
