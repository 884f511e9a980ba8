//! セッション管理モジュール
//!
//! 1 セッションにつき 1 つの `Row` を根とし、描画・マウスハンドルと
//! セッション世代カウンタをまとめて保持する。グローバル状態は使わないため、
//! 1 プロセス内に複数の独立したセッションを持てる。
//!
//! 操作はすべて同期的で、呼び出し側が 1 つのコマンドループで直列化する前提。
//! マルチスレッドのホストではセッション単位で排他制御すること。

pub mod description;

pub use description::{ColumnDescription, SessionDescription, TextDescription, WindowDescription};

use crate::config::SessionConfig;
use crate::error::{CoreError, HierarchyError, Result};
use crate::hierarchy::{Row, Window, WindowId};
use crate::text::{DisplayHandle, Text};

/// セッション
#[derive(Debug)]
pub struct Session {
    row: Row,
    /// Undo グループを区切るセッション世代カウンタ
    seq: u64,
    config: SessionConfig,
    display: Option<DisplayHandle>,
    mouse: Option<DisplayHandle>,
}

impl Session {
    /// 空のセッションを作成
    pub fn new(config: SessionConfig) -> Self {
        Self {
            row: Row::new(),
            seq: config.initial_sequence,
            config,
            display: None,
            mouse: None,
        }
    }

    /// 記述から構築したセッションを作成
    pub fn from_description(desc: &SessionDescription, config: SessionConfig) -> Result<Self> {
        let mut session = Self::new(config);
        session.load(desc)?;
        Ok(session)
    }

    /// 描画ハンドルを設定
    pub fn with_display(mut self, display: DisplayHandle) -> Self {
        self.row.set_display(Some(display.clone()));
        self.display = Some(display);
        self
    }

    /// マウスハンドルを設定
    pub fn with_mouse(mut self, mouse: DisplayHandle) -> Self {
        self.mouse = Some(mouse);
        self
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn row_mut(&mut self) -> &mut Row {
        &mut self.row
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn display(&self) -> Option<&DisplayHandle> {
        self.display.as_ref()
    }

    pub fn mouse(&self) -> Option<&DisplayHandle> {
        self.mouse.as_ref()
    }

    /// 記述から階層を組み立て、現在の行と置き換える
    ///
    /// Row → Columns → (カウンタ初期化) → Windows の順に構築する。
    /// 途中で失敗した場合は現在の行をそのまま残す。
    pub fn load(&mut self, desc: &SessionDescription) -> Result<()> {
        let record = self.config.record_load_history;
        let mut row = Row::new();
        row.set_display(self.display.clone());
        load_text(row.tag_mut(), &desc.row_tag, record)?;

        for (index, sercol) in desc.columns.iter().enumerate() {
            row.add_column(index)?;
            let column = row
                .column_mut(index)
                .ok_or(HierarchyError::IndexOutOfRange {
                    what: "column",
                    index,
                    len: desc.columns.len(),
                })?;
            load_text(column.tag_mut(), &sercol.tag, record)?;
            column.init();
        }

        let seq = self.config.initial_sequence;

        for serwin in &desc.windows {
            let mut window = row.new_window();
            load_text(window.tag_mut(), &serwin.tag, record)?;
            load_text(window.body_mut(), &serwin.body, record)?;
            window.refresh_name();
            row.attach_window(serwin.column, window)?;
        }

        log::debug!(
            "session loaded: {} columns, {} windows",
            row.columns().len(),
            row.windows().count()
        );
        self.row = row;
        self.seq = seq;
        Ok(())
    }

    /// 現在の階層を記述として書き出す
    pub fn describe(&self) -> SessionDescription {
        let columns = self
            .row
            .columns()
            .iter()
            .map(|c| ColumnDescription {
                tag: TextDescription::capture(c.tag()),
            })
            .collect();

        let windows = self
            .row
            .columns()
            .iter()
            .enumerate()
            .flat_map(|(index, c)| {
                c.windows().iter().map(move |w| WindowDescription {
                    column: index,
                    tag: TextDescription::capture(w.tag()),
                    body: TextDescription::capture(w.body()),
                })
            })
            .collect();

        SessionDescription {
            row_tag: TextDescription::capture(self.row.tag()),
            columns,
            windows,
        }
    }

    pub fn window(&self, id: WindowId) -> Result<&Window> {
        Ok(self
            .row
            .window(id)
            .ok_or(HierarchyError::WindowNotFound(id))?)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        Ok(self
            .row
            .window_mut(id)
            .ok_or(HierarchyError::WindowNotFound(id))?)
    }

    /// 世代カウンタを進め、その値で本文バッファに Undo 境界を置く
    ///
    /// 読み込み時の履歴はグループ 0 に入るため、利用者のグループとは混ざらない。
    /// 世代が `u64::MAX` に達していれば `SequenceExhausted` を返し、何も変更しない。
    pub fn checkpoint(&mut self, id: WindowId) -> Result<u64> {
        let seq = self
            .seq
            .checked_add(1)
            .ok_or(CoreError::SequenceExhausted { seq: self.seq })?;
        self.window_mut(id)?.body_mut().mark(seq);
        self.seq = seq;
        Ok(seq)
    }

    /// 本文先頭に Undo 可能な形で文字列を挿入
    pub fn insert_string(&mut self, id: WindowId, s: &str) -> Result<()> {
        self.checkpoint(id)?;
        self.window_mut(id)?.body_mut().insert_str(0, s, true)
    }

    /// 本文の直近グループを取り消す
    pub fn undo(&mut self, id: WindowId) -> Result<bool> {
        Ok(self.window_mut(id)?.body_mut().undo())
    }

    /// 本文の取り消しをやり直す
    pub fn redo(&mut self, id: WindowId) -> Result<bool> {
        Ok(self.window_mut(id)?.body_mut().redo())
    }

    /// 未保存の本文を持つウィンドウ
    pub fn dirty_windows(&self) -> Vec<WindowId> {
        self.row
            .windows()
            .filter(|w| w.body().is_dirty())
            .map(|w| w.id())
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// 記述からテキストを埋め、クリーン状態にする
fn load_text(text: &mut Text, desc: &TextDescription, record_undo: bool) -> Result<()> {
    text.insert_str(0, &desc.buffer, record_undo)?;
    text.set_selection(desc.q0, desc.q1)?;
    text.mark_clean();
    Ok(())
}
