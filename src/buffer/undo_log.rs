//! Undo/Redo ログ
//!
//! エントリは記録時の `sequence` と所属グループ（`mark`）を持つ。
//! 末尾から同じ `mark` のエントリをまとめて取り出したものが 1 回の Undo 単位になる。

use super::edit::Edit;

/// 記録済みの逆操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    /// 記録時点のバッファ世代
    pub sequence: u64,
    /// 所属する Undo グループ
    pub mark: u64,
    /// 適用すべき逆操作
    pub edit: Edit,
}

/// 編集履歴スタック
#[derive(Debug, Clone, Default)]
pub(crate) struct UndoLog {
    undo: Vec<UndoEntry>,
    redo: Vec<UndoEntry>,
    mark: u64,
}

impl UndoLog {
    pub(crate) fn current_mark(&self) -> u64 {
        self.mark
    }

    /// グループ境界を設定。古い値は無視する。
    pub(crate) fn mark(&mut self, seq: u64) {
        if seq < self.mark {
            log::warn!("ignoring stale undo mark {} (current {})", seq, self.mark);
            return;
        }
        self.mark = seq;
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub(crate) fn undo_entries(&self) -> &[UndoEntry] {
        &self.undo
    }

    pub(crate) fn push_undo(&mut self, entry: UndoEntry) {
        self.undo.push(entry);
    }

    pub(crate) fn push_redo(&mut self, entry: UndoEntry) {
        self.redo.push(entry);
    }

    pub(crate) fn clear_redo(&mut self) {
        self.redo.clear();
    }

    /// Undo/Redo の両方を破棄（グループタグは保持）
    pub(crate) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// 直近の Undo グループを新しい順に取り出す
    pub(crate) fn take_undo_group(&mut self) -> Vec<UndoEntry> {
        take_trailing_group(&mut self.undo)
    }

    /// 直近に取り消したグループを元の編集順に取り出す
    pub(crate) fn take_redo_group(&mut self) -> Vec<UndoEntry> {
        take_trailing_group(&mut self.redo)
    }
}

fn take_trailing_group(stack: &mut Vec<UndoEntry>) -> Vec<UndoEntry> {
    let Some(mark) = stack.last().map(|entry| entry.mark) else {
        return Vec::new();
    };
    let start = stack
        .iter()
        .rposition(|entry| entry.mark != mark)
        .map_or(0, |idx| idx + 1);
    let mut group = stack.split_off(start);
    group.reverse();
    group
}
