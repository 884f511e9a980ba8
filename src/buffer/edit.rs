//! 編集操作の最小単位
//!
//! Undo ログには逆操作のみを積む。逆操作を適用するとさらにその逆操作が得られるため、
//! 同じ型で Undo と Redo の両方を表現できる。

/// 履歴操作の最小単位
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// `position` に `text` を挿入
    Insert { position: usize, text: Vec<char> },
    /// `position` から `length` 文字を削除
    Delete { position: usize, length: usize },
}

/// 編集が内容に与えた変化（選択範囲の追従に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Inserted { position: usize, length: usize },
    Deleted { position: usize, length: usize },
}

impl Edit {
    /// 内容に適用し、逆操作を返す
    ///
    /// 範囲検証は呼び出し側で済んでいること。
    pub(crate) fn apply(self, content: &mut Vec<char>) -> Edit {
        match self {
            Edit::Insert { position, text } => {
                let length = text.len();
                content.splice(position..position, text);
                Edit::Delete { position, length }
            }
            Edit::Delete { position, length } => {
                let text: Vec<char> = content.drain(position..position + length).collect();
                Edit::Insert { position, text }
            }
        }
    }

    /// この操作を適用したときの変化
    pub fn change(&self) -> Change {
        match self {
            Edit::Insert { position, text } => Change::Inserted {
                position: *position,
                length: text.len(),
            },
            Edit::Delete { position, length } => Change::Deleted {
                position: *position,
                length: *length,
            },
        }
    }
}
