use crate::bootstrap::initialize_timer;
use crate::config::DoughConfig;
use anyhow::Result;
use dough_timer::format::format_ready_time;
use dough_timer::{BatchId, BatchRow, BatchTimer, RowOutcome};
use time::UtcOffset;

/// One line per batch followed by the status line.
pub fn render_listing(timer: &BatchTimer, offset: UtcOffset) -> String {
    let snapshot = timer.snapshot();
    let mut lines: Vec<String> = snapshot
        .entries
        .iter()
        .map(|entry| {
            format!(
                "{:>9}  {}  (ready: {}, id: {})",
                entry.countdown,
                entry.name,
                format_ready_time(entry.end_time, offset),
                entry.id
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push("No batches.".to_string());
    }
    lines.push(snapshot.status.to_string());
    lines.join("\n")
}

pub fn list(cfg: &DoughConfig, offset: UtcOffset) -> Result<()> {
    let timer = initialize_timer(cfg, false)?;
    println!("{}", render_listing(&timer, offset));
    Ok(())
}

pub fn add(cfg: &DoughConfig, offset: UtcOffset, name: String, hours: String) -> Result<()> {
    let mut timer = initialize_timer(cfg, false)?;
    match timer.submit_batches(&[BatchRow::new(name, hours)]).first() {
        Some(RowOutcome::Accepted(id)) => {
            let ready_at = timer
                .get(id)
                .map(|b| format_ready_time(b.end_time(), offset))
                .unwrap_or_default();
            println!("Started {id}, ready {ready_at}");
        }
        Some(RowOutcome::Skipped(reason)) => println!("Skipped: {reason}"),
        None => {}
    }
    Ok(())
}

pub fn delete(cfg: &DoughConfig, id: String) -> Result<()> {
    let mut timer = initialize_timer(cfg, false)?;
    if timer.delete_batch(&BatchId::from(id.as_str())) {
        println!("Deleted {id}");
    } else {
        println!("No batch with id {id}");
    }
    Ok(())
}

pub fn config_path() -> Result<()> {
    let path = DoughConfig::ensure_config_file()?;
    println!("{}", path.display());
    Ok(())
}
