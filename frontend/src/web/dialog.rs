//! 阻塞式对话框封装
//!
//! 破坏性操作前的确认框，以及提交结果的确认提示。

/// 用户确认与结果提示
pub trait Dialogs {
    /// 模态确认，返回用户是否接受
    fn confirm(&self, message: &str) -> bool;
    /// 阻塞式提示，用户确认后返回
    fn acknowledge(&self, message: &str);
}

/// 基于 `window.confirm` / `window.alert` 的实现
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn acknowledge(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
