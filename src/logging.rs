use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;

/// Routes `log` records into the activity panel; the terminal belongs to the UI.
pub struct ChannelLogger {
    level: LevelFilter,
    tx: UnboundedSender<AppMessage>,
}

impl ChannelLogger {
    pub fn new(level: LevelFilter, tx: UnboundedSender<AppMessage>) -> Self {
        Self { level, tx }
    }

    pub fn install(self) -> Result<()> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).context("a logger is already installed")?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = self.tx.send(AppMessage::Log(format_record(record)));
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    match record.level() {
        log::Level::Info => record.args().to_string(),
        level => format!("[{level}] {}", record.args()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn forwards_enabled_records_into_the_channel() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let logger = ChannelLogger::new(LevelFilter::Info, tx);

        logger.log(
            &Record::builder()
                .args(format_args!("Loaded 3 bands"))
                .level(Level::Info)
                .target("metla::pipeline")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("too chatty"))
                .level(Level::Debug)
                .target("metla::enrich")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("from a dependency"))
                .level(Level::Warn)
                .target("reqwest::connect")
                .build(),
        );

        match rx.try_recv() {
            Ok(AppMessage::Log(line)) => assert_eq!(line, "Loaded 3 bands"),
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn non_info_records_carry_their_level() {
        assert_eq!(
            format_record(
                &Record::builder()
                    .args(format_args!("slow upstream"))
                    .level(Level::Warn)
                    .target("metla")
                    .build()
            ),
            "[WARN] slow upstream"
        );
    }
}
