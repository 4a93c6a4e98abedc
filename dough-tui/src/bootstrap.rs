use crate::bell::TerminalBell;
use crate::config::DoughConfig;
use anyhow::Result;
use dough_timer::{
    BatchStore, BatchTimer, JsonFileStore, MemoryStore, ReadyNotifier, SilentNotifier, SystemClock,
};
use std::sync::Arc;
use tracing::info;

/// Where batches are kept for this configuration.
pub fn batch_store(cfg: &DoughConfig) -> Result<Box<dyn BatchStore>> {
    if !cfg.persist {
        info!("Persistence disabled, batches are kept in memory");
        return Ok(Box::new(MemoryStore::new()));
    }
    let path = cfg.batch_file()?;
    info!(path = %path.display(), "Using batch file");
    Ok(Box::new(JsonFileStore::new(path)))
}

/// A controller wired to the wall clock, restored from the configured store.
///
/// `cue` is false for one-shot commands that should never ring.
pub fn initialize_timer(cfg: &DoughConfig, cue: bool) -> Result<BatchTimer> {
    let notifier: Box<dyn ReadyNotifier> = if cue && cfg.bell {
        Box::new(TerminalBell)
    } else {
        Box::new(SilentNotifier)
    };

    let mut timer = BatchTimer::new(Arc::new(SystemClock), notifier, batch_store(cfg)?);
    timer.load_persisted();
    Ok(timer)
}
