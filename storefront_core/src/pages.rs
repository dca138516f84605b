//! 登录 / 注册页面的提交流程

use crate::error::Error;
use crate::notify::Notification;
use crate::router::Navigation;
use crate::session::SessionStore;
use crate::validation::{LoginForm, RegistrationForm};

pub const LOGIN_SUCCESS: &str = "Вход выполнен";
pub const LOGIN_ERROR: &str = "Ошибка входа";
pub const REGISTER_SUCCESS: &str = "Регистрация выполнена";
pub const REGISTER_ERROR: &str = "Ошибка регистрации";

/// 提交结果：要显示的提示，以及成功时的导航
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub notification: Notification,
    pub navigation: Option<Navigation>,
}

impl Submission {
    fn rejected(notification: Notification) -> Self {
        Self {
            notification,
            navigation: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.navigation.is_some()
    }
}

fn validation_message(error: Error) -> String {
    match error {
        Error::Validation(message) => message,
        other => other.to_string(),
    }
}

pub async fn submit_login(session: &SessionStore, form: &LoginForm) -> Submission {
    let (email, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(e) => return Submission::rejected(Notification::error(validation_message(e))),
    };

    let outcome = session.login(email, password).await;
    if outcome.success {
        Submission {
            notification: Notification::success(LOGIN_SUCCESS),
            navigation: Some(Navigation::AuthSucceeded),
        }
    } else {
        let message = outcome.error.unwrap_or_else(|| LOGIN_ERROR.to_string());
        Submission::rejected(Notification::error(message))
    }
}

pub async fn submit_register(session: &SessionStore, form: &RegistrationForm) -> Submission {
    let data = match form.validate() {
        Ok(data) => data,
        Err(e) => return Submission::rejected(Notification::error(validation_message(e))),
    };

    let outcome = session.register(&data).await;
    if outcome.success {
        Submission {
            notification: Notification::success(REGISTER_SUCCESS),
            navigation: Some(Navigation::AuthSucceeded),
        }
    } else {
        let message = outcome.error.unwrap_or_else(|| REGISTER_ERROR.to_string());
        Submission::rejected(Notification::error(message))
    }
}
