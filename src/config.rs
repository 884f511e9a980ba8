//! セッション設定
//!
//! JSON から読み込める設定値。省略したフィールドは既定値になる。

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// ログレベル
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// `log` クレートのフィルタへ変換
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// セッション構築の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// ログ出力の閾値
    pub log_level: LogLevel,
    /// 読み込み時の挿入を Undo ログに残すか
    pub record_load_history: bool,
    /// セッション世代カウンタの初期値
    pub initial_sequence: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            record_load_history: false,
            initial_sequence: 0,
        }
    }
}

/// 上書き用の部分設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub log_level: Option<LogLevel>,
    pub record_load_history: Option<bool>,
    pub initial_sequence: Option<u64>,
}

impl SessionConfig {
    /// JSON 文字列から読み込む
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 指定された項目だけを上書きした設定を返す
    pub fn merged_with(&self, overrides: &ConfigOverrides) -> SessionConfig {
        SessionConfig {
            log_level: overrides.log_level.unwrap_or(self.log_level),
            record_load_history: overrides
                .record_load_history
                .unwrap_or(self.record_load_history),
            initial_sequence: overrides
                .initial_sequence
                .unwrap_or(self.initial_sequence),
        }
    }
}
