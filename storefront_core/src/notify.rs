//! 提示消息（toast）

use serde::Serialize;

pub const ERROR_TITLE: &str = "Ошибка";
pub const SUCCESS_TITLE: &str = "Успешно";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

/// 短暂显示的提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: SUCCESS_TITLE.to_string(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == Variant::Destructive
    }
}
