//! 行
//!
//! 階層の根。カラム列とタグ行を所有し、カラム・ウィンドウIDを払い出す

use std::sync::atomic::{AtomicU64, Ordering};

use super::{Column, ColumnId, RowId, Window, WindowId};
use crate::error::hierarchy::Result;
use crate::error::HierarchyError;
use crate::text::{DisplayHandle, Text, TextRole};

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(0);

/// 行
#[derive(Debug)]
pub struct Row {
    id: RowId,
    tag: Text,
    columns: Vec<Column>,
    next_column_id: usize,
    next_window_id: usize,
    display: Option<DisplayHandle>,
}

impl Row {
    /// 空の行を作成
    pub fn new() -> Self {
        Self {
            id: RowId(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed)),
            tag: Text::new(TextRole::RowTag),
            columns: Vec::new(),
            next_column_id: 0,
            next_window_id: 0,
            display: None,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn tag(&self) -> &Text {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Text {
        &mut self.tag
    }

    pub fn display(&self) -> Option<&DisplayHandle> {
        self.display.as_ref()
    }

    pub fn set_display(&mut self, display: Option<DisplayHandle>) {
        self.tag.set_display(display.clone());
        self.display = display;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    /// カラムIDから位置を取得
    pub fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id() == id)
    }

    pub fn column_by_id(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// `at` の位置に新しいカラムを作成
    pub fn add_column(&mut self, at: usize) -> Result<ColumnId> {
        if at > self.columns.len() {
            return Err(HierarchyError::IndexOutOfRange {
                what: "column",
                index: at,
                len: self.columns.len(),
            });
        }

        let id = ColumnId(self.next_column_id);
        self.next_column_id += 1;
        let mut column = Column::new(id, self.id);
        column.set_display(self.display.clone());
        self.columns.insert(at, column);
        log::debug!("column {:?} added to row {:?} at {}", id, self.id, at);
        Ok(id)
    }

    /// カラムを取り外して返す（最後のカラムも閉じられる）
    pub fn close_column(&mut self, index: usize) -> Result<Column> {
        if index >= self.columns.len() {
            return Err(HierarchyError::IndexOutOfRange {
                what: "column",
                index,
                len: self.columns.len(),
            });
        }
        let column = self.columns.remove(index);
        log::debug!(
            "column {:?} closed with {} windows",
            column.id(),
            column.len()
        );
        Ok(column)
    }

    /// この行で一意なIDを持つ未所属ウィンドウを作成
    pub fn new_window(&mut self) -> Window {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;
        let mut window = Window::new(id, self.id);
        window.set_display(self.display.clone());
        window
    }

    /// `column_index` 番目のカラム末尾にウィンドウを追加
    ///
    /// この行の `new_window` で作成したウィンドウだけを受け付ける。
    pub fn attach_window(&mut self, column_index: usize, window: Window) -> Result<WindowId> {
        let len = self.columns.len();
        let column = self
            .columns
            .get_mut(column_index)
            .ok_or(HierarchyError::IndexOutOfRange {
                what: "column",
                index: column_index,
                len,
            })?;
        let at = column.len();
        column.add_window(window, at)
    }

    /// 全ウィンドウをレイアウト順に列挙
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.columns.iter().flat_map(|c| c.windows().iter())
    }

    /// ウィンドウの (カラム位置, ウィンドウ位置)
    pub fn locate(&self, id: WindowId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, c)| c.position(id).map(|wi| (ci, wi)))
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        let (ci, wi) = self.locate(id)?;
        self.columns[ci].window(wi)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        let (ci, wi) = self.locate(id)?;
        self.columns[ci].window_mut(wi)
    }

    /// ウィンドウの逆参照から所属カラムを引く
    pub fn column_of(&self, id: WindowId) -> Option<&Column> {
        let column_id = self.window(id)?.column()?;
        self.column_by_id(column_id)
    }

    /// ウィンドウを閉じて返す
    pub fn close_window(&mut self, id: WindowId) -> Result<Window> {
        let (ci, wi) = self
            .locate(id)
            .ok_or(HierarchyError::WindowNotFound(id))?;
        self.columns[ci].close_window(wi)
    }

    /// 逆参照の整合性を検査
    pub fn verify_links(&self) -> bool {
        self.columns.iter().all(|c| {
            c.row() == self.id && c.windows().iter().all(|w| w.column() == Some(c.id()))
        })
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_columns(n: usize) -> Row {
        let mut row = Row::new();
        for i in 0..n {
            row.add_column(i).unwrap();
        }
        row
    }

    #[test]
    fn test_add_column_sets_back_reference() {
        let mut row = Row::new();
        let first = row.add_column(0).unwrap();
        let second = row.add_column(0).unwrap();

        assert_eq!(row.columns()[0].id(), second);
        assert_eq!(row.columns()[1].id(), first);
        assert!(row.columns().iter().all(|c| c.row() == row.id()));
        assert!(row.verify_links());
    }

    #[test]
    fn test_add_column_out_of_range() {
        let mut row = row_with_columns(1);
        let err = row.add_column(3).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::IndexOutOfRange {
                what: "column",
                index: 3,
                len: 1
            }
        );
        assert_eq!(row.columns().len(), 1);
    }

    #[test]
    fn test_attach_window_to_missing_column() {
        let mut row = row_with_columns(2);
        let window = row.new_window();
        let err = row.attach_window(5, window).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::IndexOutOfRange {
                what: "column",
                index: 5,
                len: 2
            }
        );
        assert_eq!(row.windows().count(), 0);
        assert!(row.columns().iter().all(|c| !c.is_safe()));
    }

    #[test]
    fn test_lookup_through_back_reference() {
        let mut row = row_with_columns(2);
        let window = row.new_window();
        let id = row.attach_window(1, window).unwrap();

        assert_eq!(row.locate(id), Some((1, 0)));
        let column = row.column_of(id).unwrap();
        assert_eq!(column.id(), row.columns()[1].id());
        assert_eq!(column.row(), row.id());
    }

    #[test]
    fn test_close_window_by_id() {
        let mut row = row_with_columns(1);
        let a = row.new_window();
        let b = row.new_window();
        let a = row.attach_window(0, a).unwrap();
        let b = row.attach_window(0, b).unwrap();
        assert_ne!(a, b);

        let closed = row.close_window(a).unwrap();
        assert_eq!(closed.id(), a);
        assert_eq!(closed.column(), None);
        assert!(row.window(a).is_none());
        assert!(row.window(b).is_some());
        assert_eq!(row.close_window(a).unwrap_err(), HierarchyError::WindowNotFound(a));
    }

    #[test]
    fn test_attach_window_from_other_row_is_rejected() {
        let mut left = row_with_columns(1);
        let mut right = row_with_columns(1);
        let own = right.new_window();
        right.attach_window(0, own).unwrap();

        let stray = left.new_window();
        let stray_id = stray.id();
        let err = right.attach_window(0, stray).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::ForeignWindow {
                window: stray_id,
                origin: left.id(),
                row: right.id()
            }
        );
        assert_eq!(right.windows().count(), 1);
        assert!(right.verify_links());
    }

    #[test]
    fn test_reattach_closed_window_to_same_row() {
        let mut row = row_with_columns(2);
        let window = row.new_window();
        let id = row.attach_window(0, window).unwrap();

        let closed = row.close_window(id).unwrap();
        assert_eq!(row.attach_window(1, closed).unwrap(), id);
        assert_eq!(row.locate(id), Some((1, 0)));
        assert!(row.verify_links());
    }

    #[test]
    fn test_close_last_column() {
        let mut row = row_with_columns(1);
        row.close_column(0).unwrap();
        assert!(row.columns().is_empty());
        assert!(row.close_column(0).is_err());
        assert!(row.verify_links());
    }

    #[test]
    fn test_rows_have_distinct_ids() {
        assert_ne!(Row::new().id(), Row::new().id());
    }
}
