//! ウィンドウ
//!
//! タグ行と本文の 2 つの `Text` を所有し、所属カラムへの非所有参照を持つ
//!
//! ウィンドウは作成元の行にだけ追加できる。IDは行ごとに払い出されるため、
//! 複製や別の行への持ち込みを許すと同じIDが 1 つの行に並びうる。

use super::{ColumnId, RowId, WindowId};
use crate::error::Result;
use crate::text::{DisplayHandle, Text, TextRole};

/// ウィンドウ
#[derive(Debug)]
pub struct Window {
    id: WindowId,
    /// 作成元の行
    origin: RowId,
    tag: Text,
    body: Text,
    /// タグ先頭トークンのキャッシュ
    name: String,
    /// 所属カラム（未所属なら None）
    column: Option<ColumnId>,
    display: Option<DisplayHandle>,
}

impl Window {
    pub(crate) fn new(id: WindowId, origin: RowId) -> Self {
        Self {
            id,
            origin,
            tag: Text::new(TextRole::Tag),
            body: Text::new(TextRole::Body),
            name: String::new(),
            column: None,
            display: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// 作成元の行
    pub fn origin(&self) -> RowId {
        self.origin
    }

    pub fn tag(&self) -> &Text {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Text {
        &mut self.tag
    }

    pub fn body(&self) -> &Text {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Text {
        &mut self.body
    }

    /// キャッシュ済みのウィンドウ名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 所属カラム
    pub fn column(&self) -> Option<ColumnId> {
        self.column
    }

    pub(crate) fn set_column(&mut self, column: Option<ColumnId>) {
        self.column = column;
    }

    pub fn display(&self) -> Option<&DisplayHandle> {
        self.display.as_ref()
    }

    /// 描画ハンドルを設定（タグ・本文にも伝播）
    pub fn set_display(&mut self, display: Option<DisplayHandle>) {
        self.tag.set_display(display.clone());
        self.body.set_display(display.clone());
        self.display = display;
    }

    /// タグ内容から名前を算出（最初の空白まで）
    pub fn derive_name(&self) -> String {
        self.tag
            .buffer()
            .chars()
            .iter()
            .take_while(|&&ch| ch != ' ')
            .collect()
    }

    /// タグを直接編集した後に名前キャッシュを同期
    pub fn refresh_name(&mut self) {
        self.name = self.derive_name();
    }

    /// タグ先頭トークン（最初の空白まで）を `new_name` で置き換える
    ///
    /// `new_name` に空白が含まれる場合、名前キャッシュになるのは先頭トークンだけで、
    /// 残りはタグ本文の一部として残る。
    /// Undo には記録しないため、タグの Undo/Redo 履歴はここで破棄される。
    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        let token_len = self
            .tag
            .buffer()
            .chars()
            .iter()
            .take_while(|&&ch| ch != ' ')
            .count();
        self.tag.delete(0, token_len, false)?;
        self.tag.insert_str(0, new_name, false)?;
        self.refresh_name();
        log::debug!("window {:?} renamed to {:?}", self.id, self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_with_tag(tag: &str) -> Window {
        let mut window = Window::new(WindowId(0), RowId(0));
        window.tag_mut().insert_str(0, tag, false).unwrap();
        window.refresh_name();
        window
    }

    #[test]
    fn test_new_window_roles() {
        let window = Window::new(WindowId(3), RowId(0));
        assert_eq!(window.tag().role(), TextRole::Tag);
        assert_eq!(window.body().role(), TextRole::Body);
        assert_eq!(window.column(), None);
        assert_eq!(window.name(), "");
    }

    #[test]
    fn test_name_is_leading_token() {
        let window = window_with_tag("/tmp/a.txt Del Snarf | Look");
        assert_eq!(window.name(), "/tmp/a.txt");
        assert_eq!(window.derive_name(), "/tmp/a.txt");
    }

    #[test]
    fn test_rename_rewrites_leading_token() {
        let mut window = window_with_tag("/tmp/a.txt Del Snarf");
        window.rename("/home/b.rs").unwrap();
        assert_eq!(window.tag().content(), "/home/b.rs Del Snarf");
        assert_eq!(window.name(), "/home/b.rs");
        assert!(!window.tag().is_dirty());
    }

    #[test]
    fn test_rename_empty_tag() {
        let mut window = Window::new(WindowId(1), RowId(0));
        window.rename("scratch").unwrap();
        assert_eq!(window.tag().content(), "scratch");
        assert_eq!(window.name(), "scratch");
    }

    #[test]
    fn test_rename_with_space_keeps_only_leading_token_as_name() {
        let mut window = window_with_tag("/tmp/a.txt Del");
        window.rename("a b").unwrap();
        assert_eq!(window.tag().content(), "a b Del");
        assert_eq!(window.name(), "a");
        assert_eq!(window.derive_name(), "a");
    }

    #[test]
    fn test_rename_after_recorded_tag_edits_drops_tag_history() {
        let mut window = Window::new(WindowId(0), RowId(0));
        window
            .tag_mut()
            .insert_str(0, "/very/long/name.txt Del", true)
            .unwrap();
        window.refresh_name();
        assert!(window.tag().buffer().can_undo());

        window.rename("a").unwrap();
        assert!(!window.tag_mut().undo());
        assert!(!window.tag_mut().redo());
        assert_eq!(window.tag().content(), "a Del");
        assert_eq!(window.name(), "a");
    }

    #[test]
    fn test_set_display_propagates() {
        let mut window = Window::new(WindowId(1), RowId(0));
        let handle = DisplayHandle::new(42u32);
        window.set_display(Some(handle.clone()));
        assert!(window.tag().display().unwrap().ptr_eq(&handle));
        assert!(window.body().display().unwrap().ptr_eq(&handle));
        assert_eq!(window.display().unwrap().downcast_ref::<u32>(), Some(&42));
    }
}
