//! PIN-protected bank accounts.
//!
//! The balance, PIN, lock flag, and history are private; every read or
//! change goes through a method that checks the PIN and the lock first.
//! [`SecureBankAccount`] adds PIN recovery through a security question.

use core::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::types::{
    AccountNumber, AccountStatus, CredentialError, Money, MoneyError, PasswordDigest, Pin,
};

/// Errors that can occur during account operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("account is locked; please contact customer service")]
    Locked,

    #[error("invalid PIN")]
    WrongPin,

    /// Large deposits need the account PIN.
    #[error("PIN required for deposits over {threshold}")]
    PinRequired { threshold: Money },

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("insufficient funds; available balance: {available}")]
    InsufficientFunds { available: Money },

    #[error("no security question set for this account")]
    NoSecurityQuestion,

    #[error("both question and answer are required")]
    MissingSecurityDetails,

    #[error("incorrect security answer; {remaining} attempts remaining")]
    IncorrectAnswer { remaining: u32 },

    #[error("too many failed attempts; account locked")]
    TooManyAttempts,

    /// Malformed PIN, or hashing failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl BankError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NonPositiveAmount
            | Self::MissingSecurityDetails
            | Self::Credential(_)
            | Self::Money(_) => ErrorKind::Validation,
            Self::Locked
            | Self::WrongPin
            | Self::PinRequired { .. }
            | Self::InsufficientFunds { .. }
            | Self::NoSecurityQuestion
            | Self::IncorrectAnswer { .. }
            | Self::TooManyAttempts => ErrorKind::State,
        }
    }
}

/// What a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    PinSet,
    Deposit,
    Withdrawal,
    Lock,
    PinReset,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PinSet => "PIN_SET",
            Self::Deposit => "DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
            Self::Lock => "LOCK",
            Self::PinReset => "PIN_RESET",
        };
        f.write_str(label)
    }
}

/// One entry in an account's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    /// Amount moved; zero for non-monetary events.
    pub amount: Money,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            self.description
        )
    }
}

/// A basic account.
#[derive(Debug)]
pub struct BankAccount {
    number: AccountNumber,
    owner: String,
    opened_on: NaiveDate,
    balance: Money,
    pin: Option<Pin>,
    status: AccountStatus,
    history: Vec<Transaction>,
}

impl BankAccount {
    /// Account numbers issued by a fresh sequence start here.
    pub const FIRST_ACCOUNT_NUMBER: i32 = 1000;
    /// Deposits above this many currency units need a PIN.
    pub const PIN_FREE_DEPOSIT_LIMIT: i64 = 10_000;
    /// Entries returned by [`history`](Self::history).
    pub const HISTORY_LIMIT: usize = 10;

    /// Open an account holding `initial_balance`.
    #[must_use]
    pub fn open(number: AccountNumber, owner: impl Into<String>, initial_balance: Money) -> Self {
        let account = Self {
            number,
            owner: owner.into(),
            opened_on: Utc::now().date_naive(),
            balance: initial_balance,
            pin: None,
            status: AccountStatus::Active,
            history: Vec::new(),
        };
        tracing::info!(account = %account.number, owner = %account.owner, "Account opened");
        account
    }

    #[must_use]
    pub const fn number(&self) -> AccountNumber {
        self.number
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub const fn opened_on(&self) -> NaiveDate {
        self.opened_on
    }

    #[must_use]
    pub const fn status(&self) -> AccountStatus {
        self.status
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == AccountStatus::Locked
    }

    /// Set or replace the PIN.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Locked` on a locked account and
    /// `BankError::Credential` unless `pin` is four digits.
    pub fn set_pin(&mut self, pin: &str) -> Result<(), BankError> {
        self.ensure_unlocked()?;
        self.pin = Some(Pin::parse(pin)?);
        self.record(TransactionKind::PinSet, self.zero(), "PIN has been set");
        Ok(())
    }

    /// Whether `pin` matches. Always false before a PIN is set.
    #[must_use]
    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin.as_ref().is_some_and(|stored| stored.matches(pin))
    }

    /// Deposit `amount`, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Locked`, `BankError::NonPositiveAmount`, or
    /// `BankError::PinRequired` when a large deposit lacks a correct PIN.
    pub fn deposit(&mut self, amount: Money, pin: Option<&str>) -> Result<Money, BankError> {
        self.ensure_unlocked()?;
        if amount.is_zero() {
            return Err(BankError::NonPositiveAmount);
        }
        let threshold = Money::new(
            Decimal::from(Self::PIN_FREE_DEPOSIT_LIMIT),
            self.balance.currency(),
        )?;
        if amount.try_cmp(&threshold)?.is_gt() && !pin.is_some_and(|p| self.verify_pin(p)) {
            return Err(BankError::PinRequired { threshold });
        }

        self.balance = self.balance.checked_add(&amount)?;
        self.record(TransactionKind::Deposit, amount, format!("Deposited {amount}"));
        Ok(self.balance)
    }

    /// Withdraw `amount`, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Locked`, `BankError::WrongPin`,
    /// `BankError::NonPositiveAmount`, or `BankError::InsufficientFunds`.
    pub fn withdraw(&mut self, amount: Money, pin: &str) -> Result<Money, BankError> {
        self.ensure_unlocked()?;
        self.ensure_pin(pin)?;
        if amount.is_zero() {
            return Err(BankError::NonPositiveAmount);
        }
        if amount.try_cmp(&self.balance)?.is_gt() {
            return Err(BankError::InsufficientFunds {
                available: self.balance,
            });
        }

        self.balance = self.balance.checked_sub(&amount)?;
        self.record(TransactionKind::Withdrawal, amount, format!("Withdrew {amount}"));
        Ok(self.balance)
    }

    /// Current balance.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Locked` or `BankError::WrongPin`.
    pub fn balance(&self, pin: &str) -> Result<Money, BankError> {
        self.ensure_unlocked()?;
        self.ensure_pin(pin)?;
        Ok(self.balance)
    }

    /// The most recent [`HISTORY_LIMIT`](Self::HISTORY_LIMIT) entries,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Locked` or `BankError::WrongPin`.
    pub fn history(&self, pin: &str) -> Result<&[Transaction], BankError> {
        self.ensure_unlocked()?;
        self.ensure_pin(pin)?;
        let skip = self.history.len().saturating_sub(Self::HISTORY_LIMIT);
        Ok(self.history.get(skip..).unwrap_or_default())
    }

    /// Lock the account. Every later PIN-checked operation fails.
    pub fn lock(&mut self) {
        self.status = AccountStatus::Locked;
        self.record(TransactionKind::Lock, self.zero(), "Account has been locked");
        tracing::warn!(account = %self.number, "Account locked");
    }

    /// Details that are safe to show without a PIN.
    #[must_use]
    pub fn public_info(&self) -> String {
        format!(
            "Account Owner: {}\nAccount Number: {}\nAccount Opened: {}\nAccount Status: {}",
            self.owner,
            self.number,
            self.opened_on.format("%Y-%m-%d"),
            self.status
        )
    }

    fn ensure_unlocked(&self) -> Result<(), BankError> {
        if self.is_locked() {
            return Err(BankError::Locked);
        }
        Ok(())
    }

    fn ensure_pin(&self, pin: &str) -> Result<(), BankError> {
        if self.verify_pin(pin) {
            Ok(())
        } else {
            Err(BankError::WrongPin)
        }
    }

    const fn zero(&self) -> Money {
        Money::zero(self.balance.currency())
    }

    fn record(&mut self, kind: TransactionKind, amount: Money, description: impl Into<String>) {
        self.history.push(Transaction {
            kind,
            amount,
            description: description.into(),
            timestamp: Utc::now(),
        });
    }
}

/// A [`BankAccount`] with PIN recovery via a security question.
#[derive(Debug)]
pub struct SecureBankAccount {
    account: BankAccount,
    security: Option<SecurityQuestion>,
    failed_attempts: u32,
}

#[derive(Debug)]
struct SecurityQuestion {
    question: String,
    /// Digest of the lower-cased answer.
    answer: PasswordDigest,
}

impl SecureBankAccount {
    /// Wrong answers allowed before the account locks.
    pub const MAX_ATTEMPTS: u32 = 3;

    #[must_use]
    pub const fn new(account: BankAccount) -> Self {
        Self {
            account,
            security: None,
            failed_attempts: 0,
        }
    }

    #[must_use]
    pub const fn account(&self) -> &BankAccount {
        &self.account
    }

    pub const fn account_mut(&mut self) -> &mut BankAccount {
        &mut self.account
    }

    /// Set the recovery question. The answer is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `BankError::WrongPin` or `BankError::MissingSecurityDetails`.
    pub fn set_security_question(
        &mut self,
        question: &str,
        answer: &str,
        pin: &str,
    ) -> Result<(), BankError> {
        self.account.ensure_pin(pin)?;
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(BankError::MissingSecurityDetails);
        }
        self.security = Some(SecurityQuestion {
            question: question.to_owned(),
            answer: PasswordDigest::hash(&answer.to_lowercase())?,
        });
        Ok(())
    }

    #[must_use]
    pub fn security_question(&self) -> Option<&str> {
        self.security.as_ref().map(|s| s.question.as_str())
    }

    /// Replace the PIN after answering the security question.
    ///
    /// The third wrong answer locks the account.
    ///
    /// # Errors
    ///
    /// Returns `BankError::TooManyAttempts` once the attempts are used up,
    /// `BankError::NoSecurityQuestion`, `BankError::IncorrectAnswer`, and the
    /// errors of [`BankAccount::set_pin`].
    pub fn reset_pin_with_security(&mut self, new_pin: &str, answer: &str) -> Result<(), BankError> {
        if self.failed_attempts >= Self::MAX_ATTEMPTS {
            return Err(BankError::TooManyAttempts);
        }
        let security = self.security.as_ref().ok_or(BankError::NoSecurityQuestion)?;

        if !security.answer.verify(&answer.trim().to_lowercase()) {
            self.failed_attempts += 1;
            tracing::warn!(
                account = %self.account.number,
                attempts = self.failed_attempts,
                "Incorrect security answer"
            );
            if self.failed_attempts >= Self::MAX_ATTEMPTS {
                self.account.lock();
                return Err(BankError::TooManyAttempts);
            }
            return Err(BankError::IncorrectAnswer {
                remaining: Self::MAX_ATTEMPTS - self.failed_attempts,
            });
        }

        self.failed_attempts = 0;
        self.account.ensure_unlocked()?;
        self.account.pin = Some(Pin::parse(new_pin)?);
        let zero = self.account.zero();
        self.account.record(
            TransactionKind::PinReset,
            zero,
            "PIN reset using security question",
        );
        tracing::info!(account = %self.account.number, "PIN reset");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Currency, IdSequence};

    fn usd(units: i64) -> Money {
        Money::new(Decimal::from(units), Currency::USD).unwrap()
    }

    fn alice() -> BankAccount {
        let numbers = IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);
        let mut account = BankAccount::open(numbers.next_id(), "Alice Johnson", usd(1000));
        account.set_pin("1234").unwrap();
        account
    }

    #[test]
    fn test_pin_format() {
        let mut account = alice();
        for bad in ["123", "12345", "abcd", ""] {
            let err = account.set_pin(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "pin {bad:?}");
        }
        assert!(account.verify_pin("1234"));
    }

    #[test]
    fn test_verify_without_pin() {
        let account = BankAccount::open(AccountNumber::new(1), "Bob", usd(0));
        assert!(!account.verify_pin("0000"));
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let mut account = alice();
        assert_eq!(account.deposit(usd(500), None).unwrap(), usd(1500));
        assert_eq!(account.withdraw(usd(200), "1234").unwrap(), usd(1300));
        assert_eq!(account.balance("1234").unwrap(), usd(1300));
    }

    #[test]
    fn test_large_deposit_needs_pin() {
        let mut account = alice();
        assert!(matches!(
            account.deposit(usd(15_000), None),
            Err(BankError::PinRequired { .. })
        ));
        assert!(account.deposit(usd(15_000), Some("9999")).is_err());
        assert_eq!(account.deposit(usd(15_000), Some("1234")).unwrap(), usd(16_000));
        // Exactly at the limit needs no PIN.
        assert!(account.deposit(usd(10_000), None).is_ok());
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let mut account = alice();
        assert_eq!(
            account.deposit(usd(0), None),
            Err(BankError::NonPositiveAmount)
        );
        assert_eq!(
            account.withdraw(usd(0), "1234"),
            Err(BankError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_withdraw_checks() {
        let mut account = alice();
        assert_eq!(account.withdraw(usd(10), "0000"), Err(BankError::WrongPin));
        let err = account.withdraw(usd(5000), "1234").unwrap_err();
        assert_eq!(err, BankError::InsufficientFunds { available: usd(1000) });
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(
            err.to_string(),
            "insufficient funds; available balance: $1000.00 USD"
        );
    }

    #[test]
    fn test_lock_blocks_everything() {
        let mut account = alice();
        account.lock();
        assert_eq!(account.deposit(usd(1), None), Err(BankError::Locked));
        assert_eq!(account.withdraw(usd(1), "1234"), Err(BankError::Locked));
        assert_eq!(account.balance("1234"), Err(BankError::Locked));
        assert_eq!(account.set_pin("4321"), Err(BankError::Locked));
        assert!(account.public_info().ends_with("Account Status: Locked"));
    }

    #[test]
    fn test_history_keeps_last_ten() {
        let mut account = alice();
        for _ in 0..12 {
            account.deposit(usd(1), None).unwrap();
        }
        let history = account.history("1234").unwrap();
        assert_eq!(history.len(), BankAccount::HISTORY_LIMIT);
        assert!(history.iter().all(|t| t.kind == TransactionKind::Deposit));
        assert!(account.history("0000").is_err());
    }

    #[test]
    fn test_public_info() {
        let account = alice();
        let info = account.public_info();
        assert!(info.starts_with("Account Owner: Alice Johnson\nAccount Number: 1000\n"));
        assert!(info.ends_with("Account Status: Active"));
    }

    fn secure() -> SecureBankAccount {
        let mut secure = SecureBankAccount::new(alice());
        secure
            .set_security_question("What is your pet's name?", "Fluffy", "1234")
            .unwrap();
        secure
    }

    #[test]
    fn test_security_question_requires_pin_and_details() {
        let mut secure = SecureBankAccount::new(alice());
        assert_eq!(
            secure.set_security_question("Q?", "A", "0000"),
            Err(BankError::WrongPin)
        );
        assert_eq!(
            secure.set_security_question("Q?", "  ", "1234"),
            Err(BankError::MissingSecurityDetails)
        );
        assert_eq!(
            secure.reset_pin_with_security("5678", "x"),
            Err(BankError::NoSecurityQuestion)
        );
    }

    #[test]
    fn test_reset_pin_case_insensitive() {
        let mut secure = secure();
        assert_eq!(secure.security_question(), Some("What is your pet's name?"));
        secure.reset_pin_with_security("5678", "FLUFFY").unwrap();
        assert!(secure.account().verify_pin("5678"));
        assert!(!secure.account().verify_pin("1234"));
    }

    #[test]
    fn test_three_wrong_answers_lock() {
        let mut secure = secure();
        assert_eq!(
            secure.reset_pin_with_security("5678", "Rex"),
            Err(BankError::IncorrectAnswer { remaining: 2 })
        );
        assert_eq!(
            secure.reset_pin_with_security("5678", "Spot"),
            Err(BankError::IncorrectAnswer { remaining: 1 })
        );
        assert_eq!(
            secure.reset_pin_with_security("5678", "Max"),
            Err(BankError::TooManyAttempts)
        );
        assert!(secure.account().is_locked());
        assert_eq!(
            secure.reset_pin_with_security("5678", "Fluffy"),
            Err(BankError::TooManyAttempts)
        );
    }

    #[test]
    fn test_correct_answer_resets_counter() {
        let mut secure = secure();
        secure.reset_pin_with_security("5678", "Rex").unwrap_err();
        secure.reset_pin_with_security("5678", "fluffy").unwrap();
        assert_eq!(
            secure.reset_pin_with_security("1111", "Rex"),
            Err(BankError::IncorrectAnswer { remaining: 2 })
        );
    }

    #[test]
    fn test_reset_with_bad_new_pin() {
        let mut secure = secure();
        let err = secure.reset_pin_with_security("12", "Fluffy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(secure.account().verify_pin("1234"));
    }
}
