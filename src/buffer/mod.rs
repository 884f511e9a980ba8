//! バッファ管理モジュール
//!
//! 編集可能テキストの本体と、逆操作を積み上げる Undo ログを提供

pub mod edit;
pub mod undo_log;

pub use edit::{Change, Edit};
pub use undo_log::UndoEntry;

use std::fmt;

use crate::error::buffer::Result;
use crate::error::BufferError;
use undo_log::UndoLog;

/// 単一のテキストバッファ
///
/// 内容はコードポイント列として保持する。`sequence` は Undo 記録付き編集ごとに
/// 1 ずつ進み、`put_sequence` は最後のチェックポイント（保存）時点の値を持つ。
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    /// バッファ内容
    content: Vec<char>,
    /// 編集世代カウンタ
    sequence: u64,
    /// 最後に保存された時点の世代
    put_sequence: u64,
    /// Undo/Redo ログ
    log: UndoLog,
}

impl Buffer {
    /// 新しい空のバッファを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列で初期化したバッファを作成（Undo 履歴なし・クリーン状態）
    pub fn from_str(s: &str) -> Self {
        Self {
            content: s.chars().collect(),
            ..Self::default()
        }
    }

    /// コードポイント数
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// 空かどうかを判定
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// 内容をコードポイント列として取得
    pub fn chars(&self) -> &[char] {
        &self.content
    }

    /// 指定範囲のテキストを取得
    pub fn substring(&self, start: usize, end: usize) -> Result<String> {
        if start > end || end > self.content.len() {
            return Err(BufferError::OutOfRange {
                position: start,
                length: end.saturating_sub(start),
                buffer_len: self.content.len(),
            });
        }
        Ok(self.content[start..end].iter().collect())
    }

    /// 現在の編集世代
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// 最後に保存された編集世代
    pub fn put_sequence(&self) -> u64 {
        self.put_sequence
    }

    /// 未保存の変更があるか
    pub fn is_dirty(&self) -> bool {
        self.sequence != self.put_sequence
    }

    /// 保存完了を記録
    pub fn mark_clean(&mut self) {
        self.put_sequence = self.sequence;
    }

    /// Undo グループの境界を設定
    pub fn mark(&mut self, seq: u64) {
        self.log.mark(seq);
    }

    /// 現在の Undo グループタグ
    pub fn current_mark(&self) -> u64 {
        self.log.current_mark()
    }

    /// Undo 可能か
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Redo 可能か
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// 記録済みの Undo エントリ（古い順）
    pub fn undo_entries(&self) -> &[UndoEntry] {
        self.log.undo_entries()
    }

    /// 指定位置にコードポイント列を挿入
    ///
    /// `record_undo` が false の場合は Undo/Redo ログを破棄する。
    pub fn insert(&mut self, pos: usize, text: &[char], record_undo: bool) -> Result<()> {
        self.check_range(pos, 0)?;
        if text.is_empty() {
            return Ok(());
        }

        let inverse = Edit::Insert {
            position: pos,
            text: text.to_vec(),
        }
        .apply(&mut self.content);

        if record_undo {
            self.record(inverse);
        } else {
            self.forget_history();
        }
        log::trace!("insert {} chars at {} (seq {})", text.len(), pos, self.sequence);
        Ok(())
    }

    /// 指定範囲を削除し、削除したコードポイント列を返す
    ///
    /// `record_undo` が false の場合は Undo/Redo ログを破棄する。
    pub fn delete(&mut self, pos: usize, length: usize, record_undo: bool) -> Result<Vec<char>> {
        self.check_range(pos, length)?;
        if length == 0 {
            return Ok(Vec::new());
        }

        let removed = self.content[pos..pos + length].to_vec();
        let inverse = Edit::Delete {
            position: pos,
            length,
        }
        .apply(&mut self.content);

        if record_undo {
            self.record(inverse);
        } else {
            self.forget_history();
        }
        log::trace!("delete {} chars at {} (seq {})", length, pos, self.sequence);
        Ok(removed)
    }

    /// 直近の Undo グループを取り消す
    ///
    /// ログが空なら何もせず空の変更列を返す。
    pub fn undo(&mut self) -> Vec<Change> {
        let entries = self.log.take_undo_group();
        let mut changes = Vec::with_capacity(entries.len());

        for entry in entries {
            changes.push(entry.edit.change());
            let redo = entry.edit.apply(&mut self.content);
            self.sequence = entry.sequence;
            self.log.push_redo(UndoEntry {
                sequence: entry.sequence,
                mark: entry.mark,
                edit: redo,
            });
        }

        if !changes.is_empty() {
            log::debug!("undo: {} edits, seq now {}", changes.len(), self.sequence);
        }
        changes
    }

    /// 直近に取り消したグループをやり直す
    pub fn redo(&mut self) -> Vec<Change> {
        let entries = self.log.take_redo_group();
        let mut changes = Vec::with_capacity(entries.len());

        for entry in entries {
            changes.push(entry.edit.change());
            let undo = entry.edit.apply(&mut self.content);
            self.sequence = entry.sequence + 1;
            self.log.push_undo(UndoEntry {
                sequence: entry.sequence,
                mark: entry.mark,
                edit: undo,
            });
        }

        if !changes.is_empty() {
            log::debug!("redo: {} edits, seq now {}", changes.len(), self.sequence);
        }
        changes
    }

    fn record(&mut self, inverse: Edit) {
        self.log.push_undo(UndoEntry {
            sequence: self.sequence,
            mark: self.log.current_mark(),
            edit: inverse,
        });
        self.log.clear_redo();
        self.sequence += 1;
    }

    /// 記録なしの編集で長さが変わると既存エントリのオフセットが合わなくなるため、
    /// Undo/Redo ログを破棄する。`sequence` はそのまま。
    fn forget_history(&mut self) {
        if self.log.can_undo() || self.log.can_redo() {
            log::debug!("unrecorded edit discards undo history (seq {})", self.sequence);
            self.log.clear();
        }
    }

    fn check_range(&self, position: usize, length: usize) -> Result<()> {
        let buffer_len = self.content.len();
        match position.checked_add(length) {
            Some(end) if end <= buffer_len => Ok(()),
            _ => Err(BufferError::OutOfRange {
                position,
                length,
                buffer_len,
            }),
        }
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.content {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_new_buffer_is_clean_and_empty() {
        let buffer = Buffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.sequence(), 0);
        assert!(!buffer.is_dirty());
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_insert_records_inverse_and_advances_sequence() {
        let mut buffer = Buffer::from_str("hello");
        buffer.insert(5, &chars(" world"), true).unwrap();

        assert_eq!(buffer.to_string(), "hello world");
        assert_eq!(buffer.sequence(), 1);
        assert!(buffer.is_dirty());

        let entries = buffer.undo_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sequence, 0);
        assert_eq!(
            entries[0].edit,
            Edit::Delete {
                position: 5,
                length: 6
            }
        );
    }

    #[test]
    fn test_unrecorded_edit_keeps_sequence() {
        let mut buffer = Buffer::new();
        buffer.insert(0, &chars("abc"), false).unwrap();
        assert_eq!(buffer.sequence(), 0);
        assert!(!buffer.is_dirty());
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_out_of_range_rejected_without_mutation() {
        let mut buffer = Buffer::from_str("abc");
        let err = buffer.insert(4, &chars("x"), true).unwrap_err();
        assert_eq!(
            err,
            BufferError::OutOfRange {
                position: 4,
                length: 0,
                buffer_len: 3
            }
        );
        assert!(buffer.delete(2, 2, true).is_err());
        assert!(buffer.delete(usize::MAX, 2, true).is_err());
        assert_eq!(buffer.to_string(), "abc");
        assert_eq!(buffer.sequence(), 0);
    }

    #[test]
    fn test_delete_returns_removed_text() {
        let mut buffer = Buffer::from_str("αβγδ");
        let removed = buffer.delete(1, 2, true).unwrap();
        assert_eq!(removed, chars("βγ"));
        assert_eq!(buffer.to_string(), "αδ");
    }

    #[test]
    fn test_undo_groups_by_mark() {
        let mut buffer = Buffer::from_str("abc");
        buffer.mark(1);
        buffer.insert(0, &chars("x"), true).unwrap();
        buffer.insert(4, &chars("y"), true).unwrap();
        buffer.mark(2);
        buffer.delete(0, 1, true).unwrap();

        assert_eq!(buffer.to_string(), "abcy");
        assert_eq!(buffer.sequence(), 3);

        let changes = buffer.undo();
        assert_eq!(changes.len(), 1);
        assert_eq!(buffer.to_string(), "xabcy");
        assert_eq!(buffer.sequence(), 2);

        let changes = buffer.undo();
        assert_eq!(changes.len(), 2);
        assert_eq!(buffer.to_string(), "abc");
        assert_eq!(buffer.sequence(), 0);

        assert!(buffer.undo().is_empty());
        assert_eq!(buffer.to_string(), "abc");
    }

    #[test]
    fn test_redo_reapplies_undone_group() {
        let mut buffer = Buffer::new();
        buffer.mark(1);
        buffer.insert(0, &chars("ab"), true).unwrap();
        buffer.insert(2, &chars("cd"), true).unwrap();

        buffer.undo();
        assert_eq!(buffer.to_string(), "");
        assert!(buffer.can_redo());

        let changes = buffer.redo();
        assert_eq!(changes.len(), 2);
        assert_eq!(buffer.to_string(), "abcd");
        assert_eq!(buffer.sequence(), 2);
        assert!(!buffer.can_redo());

        buffer.undo();
        assert_eq!(buffer.to_string(), "");
        assert_eq!(buffer.sequence(), 0);
    }

    #[test]
    fn test_new_edit_discards_redo() {
        let mut buffer = Buffer::new();
        buffer.insert(0, &chars("a"), true).unwrap();
        buffer.undo();
        buffer.insert(0, &chars("b"), true).unwrap();
        assert!(!buffer.can_redo());
        assert!(buffer.redo().is_empty());
        assert_eq!(buffer.to_string(), "b");
    }

    #[test]
    fn test_dirty_tracking() {
        let mut buffer = Buffer::new();
        buffer.insert(0, &chars("text"), true).unwrap();
        assert!(buffer.is_dirty());

        buffer.mark_clean();
        buffer.mark_clean();
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.put_sequence(), 1);

        buffer.undo();
        assert!(buffer.is_dirty());
        buffer.redo();
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_unrecorded_delete_discards_stale_undo() {
        let mut buffer = Buffer::new();
        buffer.insert(0, &chars("abc"), true).unwrap();
        buffer.delete(0, 3, false).unwrap();

        assert!(!buffer.can_undo());
        assert!(buffer.undo().is_empty());
        assert_eq!(buffer.to_string(), "");
        assert_eq!(buffer.sequence(), 1);
    }

    #[test]
    fn test_unrecorded_insert_discards_stale_redo() {
        let mut buffer = Buffer::from_str("xyz");
        buffer.delete(0, 3, true).unwrap();
        buffer.undo();
        assert!(buffer.can_redo());

        buffer.insert(0, &chars("long prefix "), false).unwrap();
        assert!(!buffer.can_redo());
        assert!(buffer.redo().is_empty());
        assert_eq!(buffer.to_string(), "long prefix xyz");
    }

    #[test]
    fn test_empty_unrecorded_edit_keeps_history() {
        let mut buffer = Buffer::new();
        buffer.insert(0, &chars("ab"), true).unwrap();
        buffer.insert(1, &[], false).unwrap();
        buffer.delete(1, 0, false).unwrap();
        assert!(buffer.can_undo());
    }

    #[test]
    fn test_substring() {
        let buffer = Buffer::from_str("hello");
        assert_eq!(buffer.substring(1, 3).unwrap(), "el");
        assert!(buffer.substring(3, 9).is_err());
        assert!(buffer.substring(3, 1).is_err());
    }
}
