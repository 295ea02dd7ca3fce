use std::fmt;
use std::ops::Add;

use pixel_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 币种
#[value_object]
#[derive(Copy, Hash)]
pub enum Currency {
    #[default]
    None,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Eur];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::None => "",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// 按 ISO 代码解析（大小写不敏感）
    pub fn from_code(code: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| DomainError::invalid_value(format!("The currency code '{code}' is invalid")))
    }
}

/// 金额，以最小货币单位（分）存储
#[value_object]
#[derive(Copy, Hash)]
pub struct Money {
    pub amount_minor: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// 同币种相加；币种不一致时报错
    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        if self.currency != other.currency {
            return Err(DomainError::invalid_value("Currencies mismatch."));
        }
        let amount_minor = self
            .amount_minor
            .checked_add(other.amount_minor)
            .ok_or_else(|| DomainError::invalid_value("amount overflow"))?;
        Ok(Money::new(amount_minor, self.currency))
    }

    /// 数量乘以单价
    pub fn times(self, quantity: u32) -> DomainResult<Money> {
        let amount_minor = self
            .amount_minor
            .checked_mul(i64::from(quantity))
            .ok_or_else(|| DomainError::invalid_value("amount overflow"))?;
        Ok(Money::new(amount_minor, self.currency))
    }
}

impl Add for Money {
    type Output = DomainResult<Money>;

    fn add(self, rhs: Money) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl ValueObject for Money {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        if self.amount_minor < 0 {
            return Err(DomainError::invalid_value("price must not be negative"));
        }
        if self.currency == Currency::None && !self.is_zero() {
            return Err(DomainError::invalid_value("currency is required"));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        write!(f, "{sign}{}.{:02} {}", abs / 100, abs % 100, self.currency.code())
    }
}
