use dough_timer::{Batch, NotifyError, ReadyNotifier};
use std::io::{self, Write};

/// Rings the terminal bell (ASCII BEL).
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl ReadyNotifier for TerminalBell {
    fn notify_ready(&mut self, _batch: &Batch) -> Result<(), NotifyError> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}
