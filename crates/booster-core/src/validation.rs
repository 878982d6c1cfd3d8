//! Client-side form validation.
//!
//! Every check here runs before a request is built; a failed check means no
//! network call is made. Messages are worded for the operator.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{OrderDetail, TradeSide, Wallet};

/// Default lower bound of the randomized delay, in minutes.
pub const DEFAULT_MIN_DELAY_MINUTES: f64 = 2.0;

/// Default upper bound of the randomized delay, in minutes.
pub const DEFAULT_MAX_DELAY_MINUTES: f64 = 30.0;

/// Minimum length of the optional login pin.
pub const MIN_PIN_LEN: usize = 4;

/// Minimum length of a signup password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Date format used by the usage report endpoint.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Amounts
// ============================================================================

/// A validated, strictly positive amount.
///
/// Keeps the trimmed text the operator typed, since most endpoints receive
/// the amount as a string.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    text: String,
    value: f64,
}

impl Amount {
    /// Parse operator input. Blank, non-numeric, non-finite and
    /// non-positive values are rejected.
    pub fn parse(input: &str) -> Option<Amount> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        let value: f64 = text.parse().ok()?;
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Some(Amount {
            text: text.to_string(),
            value,
        })
    }

    /// The trimmed input text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The numeric value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Validate the per-wallet distribution amount.
pub fn distribute_amount(input: &str) -> Result<Amount> {
    Amount::parse(input)
        .ok_or_else(|| Error::validation_field("amount", "Please enter a valid amount."))
}

/// Validate a burn amount.
pub fn burn_amount(input: &str) -> Result<Amount> {
    if input.trim().is_empty() {
        return Err(Error::validation_field(
            "burnAmount",
            "Please enter a valid burn amount.",
        ));
    }
    Amount::parse(input).ok_or_else(|| {
        Error::validation_field(
            "burnAmount",
            "Please enter a positive number for the burn amount.",
        )
    })
}

// ============================================================================
// Time range
// ============================================================================

/// Bounds of the randomized delay between per-wallet trades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    /// Shortest delay, in minutes
    pub min_delay_minutes: f64,
    /// Longest delay, in minutes
    pub max_delay_minutes: f64,
}

impl TimeRange {
    /// Validate a delay range: both bounds positive and `min <= max`.
    pub fn new(min_delay_minutes: f64, max_delay_minutes: f64) -> Result<Self> {
        let valid = min_delay_minutes.is_finite()
            && max_delay_minutes.is_finite()
            && min_delay_minutes > 0.0
            && max_delay_minutes > 0.0
            && min_delay_minutes <= max_delay_minutes;
        if !valid {
            return Err(Error::validation_field(
                "timeRange",
                "Please enter a valid time range (min ≤ max, both > 0).",
            ));
        }
        Ok(Self {
            min_delay_minutes,
            max_delay_minutes,
        })
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            min_delay_minutes: DEFAULT_MIN_DELAY_MINUTES,
            max_delay_minutes: DEFAULT_MAX_DELAY_MINUTES,
        }
    }
}

// ============================================================================
// Buy / sell details
// ============================================================================

/// Amounts entered for a buy or sell, keyed by wallet address.
///
/// `uniform` applies to every wallet that has no explicit entry.
#[derive(Debug, Clone, Default)]
pub struct TradeAmounts {
    /// Amount used for wallets without a specific entry
    pub uniform: Option<String>,
    /// Per-wallet amounts
    pub per_wallet: HashMap<String, String>,
}

impl TradeAmounts {
    /// Same amount for every wallet.
    pub fn uniform(amount: impl Into<String>) -> Self {
        Self {
            uniform: Some(amount.into()),
            per_wallet: HashMap::new(),
        }
    }

    /// Set the amount for one wallet.
    pub fn with_wallet(mut self, address: impl Into<String>, amount: impl Into<String>) -> Self {
        self.per_wallet.insert(address.into(), amount.into());
        self
    }

    /// Check every entered amount without knowing the group's wallets.
    ///
    /// A blank uniform amount counts as not entered; whether each wallet
    /// ends up with an amount is left to [`order_details`].
    pub fn validate(&self, side: TradeSide) -> Result<()> {
        let uniform = self.uniform.as_deref().filter(|a| !a.trim().is_empty());
        let all_valid = uniform
            .into_iter()
            .chain(self.per_wallet.values().map(String::as_str))
            .all(|amount| Amount::parse(amount).is_some());
        if all_valid {
            Ok(())
        } else {
            Err(invalid_amounts(side))
        }
    }

    fn for_wallet(&self, address: &str) -> Option<&str> {
        self.per_wallet
            .get(address)
            .map(String::as_str)
            .or(self.uniform.as_deref())
    }
}

fn invalid_amounts(side: TradeSide) -> Error {
    Error::validation_field(
        format!("{}Details", side.as_str()),
        format!("Please enter valid {} amounts for all wallets.", side.as_str()),
    )
}

/// Build the `{walletAddress, amount}` list for every wallet of the group.
///
/// Every wallet must have a valid amount; one bad entry rejects the whole
/// request.
pub fn order_details(
    side: TradeSide,
    wallets: &[Wallet],
    amounts: &TradeAmounts,
) -> Result<Vec<OrderDetail>> {
    let invalid = || invalid_amounts(side);

    if wallets.is_empty() {
        return Err(Error::validation("The active wallet group has no wallets."));
    }

    wallets
        .iter()
        .map(|wallet| {
            let amount = amounts
                .for_wallet(&wallet.address)
                .and_then(Amount::parse)
                .ok_or_else(invalid)?;
            Ok(OrderDetail {
                wallet_address: wallet.address.clone(),
                amount: amount.as_str().to_string(),
            })
        })
        .collect()
}

// ============================================================================
// Account forms
// ============================================================================

/// Validated login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginForm {
    /// Chat id only
    ChatId(String),
    /// Chat id used as username, with its pin as password
    Credentials {
        /// Account name
        username: String,
        /// Pin or password
        password: String,
    },
}

/// Validate the login form. The pin is optional.
pub fn login_form(chat_id: &str, pin: Option<&str>) -> Result<LoginForm> {
    let chat_id = chat_id.trim();
    if chat_id.is_empty() {
        return Err(Error::validation_field("chatId", "Please enter your Chat ID."));
    }
    match pin.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(LoginForm::ChatId(chat_id.to_string())),
        Some(pin) if pin.chars().count() < MIN_PIN_LEN => Err(Error::validation_field(
            "pin",
            "Pin should be at least 4 characters long.",
        )),
        Some(pin) => Ok(LoginForm::Credentials {
            username: chat_id.to_string(),
            password: pin.to_string(),
        }),
    }
}

/// Validated signup input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    /// Chat id
    pub chat_id: String,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

/// Validate the signup form.
pub fn signup_form(
    chat_id: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<SignupForm> {
    if chat_id.trim().is_empty() || username.trim().is_empty() || password.trim().is_empty() {
        return Err(Error::validation("All fields are required."));
    }
    if password != confirm_password {
        return Err(Error::validation_field(
            "confirmPassword",
            "Passwords do not match.",
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation_field(
            "password",
            "Password must be at least 6 characters long.",
        ));
    }
    Ok(SignupForm {
        chat_id: chat_id.trim().to_string(),
        username: username.trim().to_string(),
        password: password.trim().to_string(),
    })
}

/// Validate a new wallet group name.
pub fn group_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(Error::validation_field(
            "groupName",
            "Please enter a wallet group name.",
        ));
    }
    Ok(name.to_string())
}

/// Validate a token contract address.
pub fn token_address(input: &str) -> Result<String> {
    let address = input.trim();
    if address.is_empty() {
        return Err(Error::validation_field(
            "tokenAddress",
            "Please enter a token address.",
        ));
    }
    Ok(address.to_string())
}

// ============================================================================
// Usage report
// ============================================================================

/// Inclusive date range of a usage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    /// First day
    pub from: NaiveDate,
    /// Last day
    pub to: NaiveDate,
}

impl ReportRange {
    /// `YYYY-MM-DD` form of the start date.
    pub fn from_param(&self) -> String {
        self.from.format(REPORT_DATE_FORMAT).to_string()
    }

    /// `YYYY-MM-DD` form of the end date.
    pub fn to_param(&self) -> String {
        self.to.format(REPORT_DATE_FORMAT).to_string()
    }
}

/// Validate the usage report dates.
pub fn report_range(from: Option<&str>, to: Option<&str>) -> Result<ReportRange> {
    let both = || Error::validation("Please select both From Date and To Date.");
    let from = from.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(both)?;
    let to = to.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(both)?;

    let parse = |field: &str, s: &str| {
        NaiveDate::parse_from_str(s, REPORT_DATE_FORMAT).map_err(|_| {
            Error::validation_field(field, format!("Invalid date '{s}', expected YYYY-MM-DD."))
        })
    };
    let from = parse("fromDate", from)?;
    let to = parse("toDate", to)?;

    if from > to {
        return Err(Error::validation("From Date cannot be after To Date."));
    }
    Ok(ReportRange { from, to })
}
