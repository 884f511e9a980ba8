//! 選択範囲管理
//!
//! バッファ内のコードポイント範囲 `(q0, q1)` を保持し、編集に追従させる

use crate::buffer::Change;
use crate::error::selection::Result;
use crate::error::SelectionError;

/// 選択範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// 開始位置
    pub q0: usize,
    /// 終了位置（排他的）
    pub q1: usize,
}

impl Selection {
    /// 検証付きで作成
    pub fn new(q0: usize, q1: usize, len: usize) -> Result<Self> {
        if q0 > q1 || q1 > len {
            return Err(SelectionError::InvalidRange { q0, q1, len });
        }
        Ok(Self { q0, q1 })
    }

    /// 空の選択範囲か
    pub fn is_empty(&self) -> bool {
        self.q0 == self.q1
    }

    /// 選択範囲の長さ
    pub fn len(&self) -> usize {
        self.q1 - self.q0
    }

    /// 挿入に追従
    ///
    /// 選択範囲より前（`pos <= q0`）なら全体を後ろへ、範囲内なら `q1` だけを伸ばす。
    pub fn shift_for_insert(&mut self, pos: usize, n: usize) {
        if pos <= self.q0 {
            self.q0 += n;
            self.q1 += n;
        } else if pos <= self.q1 {
            self.q1 += n;
        }
    }

    /// `[pos, pos + n)` の削除に追従
    pub fn shift_for_delete(&mut self, pos: usize, n: usize) {
        self.q0 = shift_point_for_delete(self.q0, pos, n);
        self.q1 = shift_point_for_delete(self.q1, pos, n);
    }

    /// バッファの変化を反映
    pub fn apply(&mut self, change: Change) {
        match change {
            Change::Inserted { position, length } => self.shift_for_insert(position, length),
            Change::Deleted { position, length } => self.shift_for_delete(position, length),
        }
    }
}

fn shift_point_for_delete(q: usize, pos: usize, n: usize) -> usize {
    if q < pos {
        q
    } else if q >= pos + n {
        q - n
    } else {
        pos
    }
}
