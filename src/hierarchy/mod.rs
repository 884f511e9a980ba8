//! 表示コンテナ階層
//!
//! Row → Column → Window の 3 段構成。親は子を `Vec` で所有し、
//! 子から親へはIDによる非所有の逆参照のみを持つ。

pub mod column;
pub mod row;
pub mod window;

pub use column::Column;
pub use row::Row;
pub use window::Window;

/// 行ID（プロセス内で一意）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(pub u64);

/// カラムID（行内で一意）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(pub usize);

/// ウィンドウID（行内で一意）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub usize);
