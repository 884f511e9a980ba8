//! textcore - タイル型テキストエディタの編集コア
//!
//! Undo 可能なバッファと、それを表示ウィンドウへ結び付ける
//! Row / Column / Window 階層を提供する

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod buffer;
pub mod text;

// 構造層
pub mod hierarchy;
pub mod session;

// 公開API
pub use buffer::{Buffer, Change, Edit, UndoEntry};
pub use config::{ConfigOverrides, LogLevel, SessionConfig};
pub use error::{BufferError, CoreError, DescriptionError, HierarchyError, Result, SelectionError};
pub use hierarchy::{Column, ColumnId, Row, RowId, Window, WindowId};
pub use session::{
    ColumnDescription, Session, SessionDescription, TextDescription, WindowDescription,
};
pub use text::{DisplayHandle, Selection, Text, TextRole};
