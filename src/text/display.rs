//! 描画バックエンドへの不透明ハンドル

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 描画層が Text/Window に結び付ける不透明な参照
///
/// コアは中身を解釈せず、保持と受け渡しだけを行う。
#[derive(Clone)]
pub struct DisplayHandle(Arc<dyn Any + Send + Sync>);

impl DisplayHandle {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// 描画層側で元の型を取り出す
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().downcast_ref::<T>()
    }

    /// 同じハンドルを指しているか
    pub fn ptr_eq(&self, other: &DisplayHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DisplayHandle(..)")
    }
}
