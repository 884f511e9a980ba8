//! カラム
//!
//! ウィンドウ列とタグ行を所有し、所属行への非所有参照を持つ

use super::{ColumnId, RowId, Window, WindowId};
use crate::error::hierarchy::Result;
use crate::error::HierarchyError;
use crate::text::{DisplayHandle, Text, TextRole};

/// カラム
#[derive(Debug)]
pub struct Column {
    id: ColumnId,
    row: RowId,
    tag: Text,
    windows: Vec<Window>,
    /// 初期化完了フラグ（一度 true になったら戻らない）
    safe: bool,
    display: Option<DisplayHandle>,
}

impl Column {
    pub(crate) fn new(id: ColumnId, row: RowId) -> Self {
        Self {
            id,
            row,
            tag: Text::new(TextRole::ColumnTag),
            windows: Vec::new(),
            safe: false,
            display: None,
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// 所属行
    pub fn row(&self) -> RowId {
        self.row
    }

    pub fn tag(&self) -> &Text {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Text {
        &mut self.tag
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// 明示的な初期化
    pub fn init(&mut self) {
        self.safe = true;
    }

    pub fn display(&self) -> Option<&DisplayHandle> {
        self.display.as_ref()
    }

    pub fn set_display(&mut self, display: Option<DisplayHandle>) {
        self.tag.set_display(display.clone());
        self.display = display;
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn window(&self, index: usize) -> Option<&Window> {
        self.windows.get(index)
    }

    pub fn window_mut(&mut self, index: usize) -> Option<&mut Window> {
        self.windows.get_mut(index)
    }

    /// ウィンドウIDから位置を取得
    pub fn position(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }

    /// `at` の位置にウィンドウを追加
    ///
    /// 別の行で作成されたウィンドウは `ForeignWindow` で拒否する。
    pub fn add_window(&mut self, mut window: Window, at: usize) -> Result<WindowId> {
        if window.origin() != self.row {
            return Err(HierarchyError::ForeignWindow {
                window: window.id(),
                origin: window.origin(),
                row: self.row,
            });
        }
        if at > self.windows.len() {
            return Err(HierarchyError::IndexOutOfRange {
                what: "window",
                index: at,
                len: self.windows.len(),
            });
        }

        let id = window.id();
        window.set_column(Some(self.id));
        self.windows.insert(at, window);
        self.safe = true;
        log::debug!("window {:?} attached to column {:?} at {}", id, self.id, at);
        Ok(id)
    }

    /// ウィンドウを取り外して返す
    ///
    /// 最後のウィンドウを閉じてもカラム自体は残る。
    pub fn close_window(&mut self, index: usize) -> Result<Window> {
        if index >= self.windows.len() {
            return Err(HierarchyError::IndexOutOfRange {
                what: "window",
                index,
                len: self.windows.len(),
            });
        }

        let mut window = self.windows.remove(index);
        window.set_column(None);
        log::debug!("window {:?} closed in column {:?}", window.id(), self.id);
        Ok(window)
    }
}
