//! エラーハンドリングシステム
//!
//! textcore 全体で使用される統一されたエラー型を定義
//! どのエラーも検証段階で返され、失敗時にバッファや階層の状態は変化しない

use thiserror::Error;

use crate::hierarchy::{RowId, WindowId};

/// クレート全体のエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// バッファ操作エラー
    #[error("Buffer operation failed: {0}")]
    Buffer(#[from] BufferError),

    /// 選択範囲エラー
    #[error("Selection rejected: {0}")]
    Selection(#[from] SelectionError),

    /// 階層操作エラー
    #[error("Hierarchy operation failed: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// セッション記述エラー
    #[error("Session description rejected: {0}")]
    Description(#[from] DescriptionError),

    /// セッションの編集世代が上限に達した
    #[error("Session sequence {seq} cannot advance further")]
    SequenceExhausted { seq: u64 },
}

/// バッファ操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// オフセットまたは長さがバッファ範囲外
    #[error("Range {position}+{length} is outside buffer of length {buffer_len}")]
    OutOfRange {
        position: usize,
        length: usize,
        buffer_len: usize,
    },
}

/// 選択範囲固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// `q0 <= q1 <= len` を満たさない
    #[error("Invalid selection ({q0}, {q1}) for text of length {len}")]
    InvalidRange { q0: usize, q1: usize, len: usize },
}

/// 階層構造固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// カラム・ウィンドウのインデックスが範囲外
    #[error("{what} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// 行に所属していないウィンドウ
    #[error("Window {0:?} is not attached to this row")]
    WindowNotFound(WindowId),

    /// 別の行で作成されたウィンドウ
    #[error("Window {window:?} belongs to row {origin:?}, not {row:?}")]
    ForeignWindow {
        window: WindowId,
        origin: RowId,
        row: RowId,
    },
}

/// セッション記述固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Malformed description: {message}")]
    Parse { message: String },
}

impl From<serde_json::Error> for DescriptionError {
    fn from(error: serde_json::Error) -> Self {
        DescriptionError::Parse {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::Description(error.into())
    }
}

impl CoreError {
    /// 範囲外オフセットによるエラーか
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, CoreError::Buffer(BufferError::OutOfRange { .. }))
    }

    /// 不正な選択範囲によるエラーか
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, CoreError::Selection(SelectionError::InvalidRange { .. }))
    }

    /// 階層インデックス範囲外によるエラーか
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(
            self,
            CoreError::Hierarchy(HierarchyError::IndexOutOfRange { .. })
        )
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, CoreError>;

/// 各モジュール固有のResult型
pub mod buffer {
    pub type Result<T> = std::result::Result<T, super::BufferError>;
}

pub mod selection {
    pub type Result<T> = std::result::Result<T, super::SelectionError>;
}

pub mod hierarchy {
    pub type Result<T> = std::result::Result<T, super::HierarchyError>;
}
