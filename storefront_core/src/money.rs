//! 价格与日期格式化

use crate::types::{CurrencyConfig, CurrencyPosition};
use chrono::DateTime;

const DEFAULT_SYMBOL: &str = "₽";

/// 格式化最小货币单位的价格
pub fn format_price(minor: i64, currency: &CurrencyConfig) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let amount = format!("{}{}.{:02}", sign, abs / 100, abs % 100);

    let symbol = if currency.symbol.is_empty() {
        DEFAULT_SYMBOL
    } else {
        currency.symbol.as_str()
    };

    match currency.position {
        CurrencyPosition::Before => format!("{}{}", symbol, amount),
        CurrencyPosition::After => format!("{} {}", amount, symbol),
    }
}

/// 订单日期，格式 `dd.mm.yyyy, HH:MM`，使用时间戳自身的时区
pub fn format_order_date(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(date) => date.format("%d.%m.%Y, %H:%M").to_string(),
        Err(_) => created_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency(symbol: &str, position: CurrencyPosition) -> CurrencyConfig {
        CurrencyConfig {
            symbol: symbol.to_string(),
            position,
        }
    }

    #[test]
    fn test_format_price_after() {
        assert_eq!(format_price(129_950, &CurrencyConfig::default()), "1299.50 ₽");
        assert_eq!(format_price(5, &CurrencyConfig::default()), "0.05 ₽");
    }

    #[test]
    fn test_format_price_before() {
        assert_eq!(format_price(1_000, &currency("$", CurrencyPosition::Before)), "$10.00");
    }

    #[test]
    fn test_format_price_empty_symbol_uses_default() {
        assert_eq!(format_price(100, &currency("", CurrencyPosition::After)), "1.00 ₽");
    }

    #[test]
    fn test_format_price_negative() {
        assert_eq!(format_price(-250, &CurrencyConfig::default()), "-2.50 ₽");
    }

    #[test]
    fn test_format_order_date() {
        assert_eq!(format_order_date("2024-03-05T14:07:00+03:00"), "05.03.2024, 14:07");
        assert_eq!(format_order_date("yesterday"), "yesterday");
    }
}
