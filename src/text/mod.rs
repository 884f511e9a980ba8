//! テキストモジュール
//!
//! バッファ・選択範囲・役割を一組にした `Text` を提供。
//! 編集は必ず `Text` を通し、選択範囲が常に `0 <= q0 <= q1 <= len` を満たすようにする。

pub mod display;
pub mod selection;

pub use display::DisplayHandle;
pub use selection::Selection;

use crate::buffer::{Buffer, Change};
use crate::error::Result;

/// テキストの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// 行のタグ行
    RowTag,
    /// カラムのタグ行
    ColumnTag,
    /// ウィンドウのタグ行
    Tag,
    /// ウィンドウ本文
    Body,
}

/// 編集可能テキスト
#[derive(Debug, Clone)]
pub struct Text {
    role: TextRole,
    buffer: Buffer,
    selection: Selection,
    display: Option<DisplayHandle>,
}

impl Text {
    /// 空のテキストを作成
    pub fn new(role: TextRole) -> Self {
        Self {
            role,
            buffer: Buffer::new(),
            selection: Selection::default(),
            display: None,
        }
    }

    /// 既存バッファからテキストを作成
    pub fn with_buffer(role: TextRole, buffer: Buffer) -> Self {
        Self {
            role,
            buffer,
            selection: Selection::default(),
            display: None,
        }
    }

    /// 役割を取得（構築後は不変）
    pub fn role(&self) -> TextRole {
        self.role
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn q0(&self) -> usize {
        self.selection.q0
    }

    pub fn q1(&self) -> usize {
        self.selection.q1
    }

    /// コードポイント数
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 内容を文字列として取得
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    /// 描画ハンドル
    pub fn display(&self) -> Option<&DisplayHandle> {
        self.display.as_ref()
    }

    pub fn set_display(&mut self, display: Option<DisplayHandle>) {
        self.display = display;
    }

    /// 選択範囲を設定
    pub fn set_selection(&mut self, q0: usize, q1: usize) -> Result<()> {
        self.selection = Selection::new(q0, q1, self.buffer.len())?;
        Ok(())
    }

    /// 挿入し、選択範囲を追従させる
    pub fn insert(&mut self, pos: usize, text: &[char], record_undo: bool) -> Result<()> {
        self.buffer.insert(pos, text, record_undo)?;
        self.selection.shift_for_insert(pos, text.len());
        Ok(())
    }

    /// 文字列版の挿入
    pub fn insert_str(&mut self, pos: usize, s: &str, record_undo: bool) -> Result<()> {
        let chars: Vec<char> = s.chars().collect();
        self.insert(pos, &chars, record_undo)
    }

    /// 削除し、選択範囲を追従させる
    pub fn delete(&mut self, pos: usize, length: usize, record_undo: bool) -> Result<String> {
        let removed = self.buffer.delete(pos, length, record_undo)?;
        self.selection.shift_for_delete(pos, length);
        Ok(removed.into_iter().collect())
    }

    /// Undo グループ境界
    pub fn mark(&mut self, seq: u64) {
        self.buffer.mark(seq);
    }

    /// 保存済みとして記録
    pub fn mark_clean(&mut self) {
        self.buffer.mark_clean();
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// 直近のグループを取り消す。何か取り消した場合は true
    pub fn undo(&mut self) -> bool {
        let changes = self.buffer.undo();
        self.follow(&changes)
    }

    /// 直近に取り消したグループをやり直す
    pub fn redo(&mut self) -> bool {
        let changes = self.buffer.redo();
        self.follow(&changes)
    }

    fn follow(&mut self, changes: &[Change]) -> bool {
        for change in changes {
            self.selection.apply(*change);
        }
        !changes.is_empty()
    }
}
