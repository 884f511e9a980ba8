//! ロギングシステム
//!
//! `log` ファサードのバックエンド。出力先は stderr か、テスト向けのメモリバッファ。

use std::sync::{Arc, Mutex};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::SessionConfig;

/// 出力先
#[derive(Debug, Clone)]
pub enum LogSink {
    Stderr,
    Memory(Arc<Mutex<Vec<String>>>),
}

/// セッション用ロガー
#[derive(Debug, Clone)]
pub struct SessionLogger {
    level: LevelFilter,
    sink: LogSink,
}

impl SessionLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            sink: LogSink::Stderr,
        }
    }

    /// 設定値から作成
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.log_level.to_filter())
    }

    /// 出力先を差し替える
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    fn write_line(&self, line: String) {
        match &self.sink {
            LogSink::Stderr => eprintln!("{}", line),
            LogSink::Memory(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
        }
    }
}

impl Log for SessionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write_line(format!(
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}

/// グローバルロガーとして登録
///
/// 既に別のロガーが登録されている場合はエラー。
pub fn init(config: &SessionConfig) -> Result<(), SetLoggerError> {
    install(SessionLogger::from_config(config))
}

/// 任意のロガーを登録
pub fn install(logger: SessionLogger) -> Result<(), SetLoggerError> {
    let level = logger.level();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}
