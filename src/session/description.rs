//! セッション内容の記述
//!
//! 行・カラム・ウィンドウとそのテキスト内容を順序付きで表すデータ。
//! ダンプ形式からの読み込み結果をそのまま受け取れる形にしてある。

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::text::Text;

/// 1 つのテキストの内容と選択範囲
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDescription {
    pub buffer: String,
    pub q0: usize,
    pub q1: usize,
}

impl TextDescription {
    pub fn new(buffer: impl Into<String>, q0: usize, q1: usize) -> Self {
        Self {
            buffer: buffer.into(),
            q0,
            q1,
        }
    }

    /// 生きている Text から記述を作る
    pub fn capture(text: &Text) -> Self {
        Self {
            buffer: text.content(),
            q0: text.q0(),
            q1: text.q1(),
        }
    }
}

impl From<&str> for TextDescription {
    fn from(buffer: &str) -> Self {
        Self::new(buffer, 0, 0)
    }
}

/// カラムの記述
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDescription {
    pub tag: TextDescription,
}

/// ウィンドウの記述
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowDescription {
    /// 所属カラムのインデックス
    pub column: usize,
    pub tag: TextDescription,
    pub body: TextDescription,
}

/// セッション全体の記述
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDescription {
    pub row_tag: TextDescription,
    pub columns: Vec<ColumnDescription>,
    /// ウィンドウ（同じカラム内では並び順どおりに配置される）
    pub windows: Vec<WindowDescription>,
}

impl SessionDescription {
    /// JSON 文字列から読み込む
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSON 文字列へ書き出す
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
