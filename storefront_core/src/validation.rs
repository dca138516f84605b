//! 表单校验
//!
//! 校验失败时不发送任何请求。

use crate::error::{Error, Result};
use crate::types::RegisterData;

pub const PASSWORD_MISMATCH: &str = "Пароли не совпадают";
pub const PASSWORD_TOO_SHORT: &str = "Пароль должен быть не менее 6 символов";
pub const TELEGRAM_REQUIRED: &str = "Telegram username обязателен";
pub const REQUIRED_FIELDS: &str = "Заполните обязательные поля";

pub const MIN_PASSWORD_LEN: usize = 6;

/// 注册表单
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub telegram_username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// 按顺序校验：两次密码一致、密码长度、Telegram 用户名、其余必填项
    pub fn validate(&self) -> Result<RegisterData> {
        if self.password != self.confirm_password {
            return Err(Error::Validation(PASSWORD_MISMATCH.to_string()));
        }
        // 按 UTF-16 码元计数，与浏览器中的长度一致
        if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(Error::Validation(PASSWORD_TOO_SHORT.to_string()));
        }
        if self.telegram_username.is_empty() {
            return Err(Error::Validation(TELEGRAM_REQUIRED.to_string()));
        }
        if [&self.first_name, &self.email, &self.phone]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(Error::Validation(REQUIRED_FIELDS.to_string()));
        }

        Ok(RegisterData {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: Some(self.last_name.trim().to_string()).filter(|s| !s.is_empty()),
            phone: self.phone.trim().to_string(),
            telegram_username: Some(self.telegram_username.clone()),
        })
    }
}

/// 登录表单
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(&str, &str)> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(Error::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok((email, self.password.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Анна".to_string(),
            last_name: String::new(),
            email: "a@b.com".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            telegram_username: "@anna".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    fn message(result: Result<RegisterData>) -> String {
        match result {
            Err(Error::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_form() {
        let data = valid_form().validate().unwrap();
        assert_eq!(data.email, "a@b.com");
        assert_eq!(data.last_name, None);
        assert_eq!(data.telegram_username.as_deref(), Some("@anna"));
    }

    #[test]
    fn test_password_mismatch_checked_first() {
        let form = RegistrationForm {
            confirm_password: "other".to_string(),
            telegram_username: String::new(),
            email: String::new(),
            ..valid_form()
        };
        assert_eq!(message(form.validate()), PASSWORD_MISMATCH);
    }

    #[test]
    fn test_short_password() {
        let form = RegistrationForm {
            password: "abc".to_string(),
            confirm_password: "abc".to_string(),
            ..valid_form()
        };
        assert_eq!(message(form.validate()), PASSWORD_TOO_SHORT);
    }

    #[test]
    fn test_password_length_counts_characters() {
        let form = RegistrationForm {
            password: "пароль".to_string(),
            confirm_password: "пароль".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_password_length_uses_utf16_units() {
        // 每个 emoji 占两个 UTF-16 码元
        let form = RegistrationForm {
            password: "🔑🔑🔑".to_string(),
            confirm_password: "🔑🔑🔑".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_ok());

        let form = RegistrationForm {
            password: "🔑🔑".to_string(),
            confirm_password: "🔑🔑".to_string(),
            ..valid_form()
        };
        assert_eq!(message(form.validate()), PASSWORD_TOO_SHORT);
    }

    #[test]
    fn test_whitespace_telegram_username_is_not_empty() {
        let form = RegistrationForm {
            telegram_username: " ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().telegram_username.as_deref(), Some(" "));
    }

    #[test]
    fn test_missing_telegram_username() {
        let form = RegistrationForm {
            telegram_username: String::new(),
            ..valid_form()
        };
        assert_eq!(message(form.validate()), TELEGRAM_REQUIRED);
    }

    #[test]
    fn test_missing_required_field() {
        let form = RegistrationForm {
            phone: "  ".to_string(),
            ..valid_form()
        };
        assert_eq!(message(form.validate()), REQUIRED_FIELDS);
    }

    #[test]
    fn test_login_form() {
        let form = LoginForm {
            email: " a@b.com ".to_string(),
            password: "secret1".to_string(),
        };
        assert_eq!(form.validate().unwrap(), ("a@b.com", "secret1"));
        assert!(LoginForm::default().validate().is_err());
    }
}
