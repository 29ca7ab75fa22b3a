//! Bank account walkthrough: PIN checks, limits, history, recovery.

use std::io::Write;

use bazaar_core::bank::{BankAccount, SecureBankAccount};
use bazaar_core::{AccountNumber, IdSequence, Money};
use rust_decimal::Decimal;

use super::{DemoResult, heading};
use crate::config::CliConfig;

/// Run the bank account walkthrough.
///
/// # Errors
///
/// Returns an error if writing fails or a step the walkthrough expects to
/// succeed does not.
pub fn run(out: &mut impl Write, config: &CliConfig) -> DemoResult {
    let amount = |units: i64| Money::new(Decimal::from(units), config.currency);
    let numbers: IdSequence<AccountNumber> =
        IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);

    heading(out, "1. OPENING AN ACCOUNT")?;
    let mut account = BankAccount::open(numbers.next_id(), "Alice Johnson", amount(1000)?);
    writeln!(out, "{}", account.public_info())?;
    if let Err(e) = account.set_pin("12a4") {
        writeln!(out, "  Rejected PIN: {e}")?;
    }
    account.set_pin("1234")?;
    writeln!(out, "  PIN set")?;

    heading(out, "2. TRANSACTIONS")?;
    writeln!(
        out,
        "  Deposited, new balance: {}",
        account.deposit(amount(500)?, None)?
    )?;
    writeln!(
        out,
        "  Withdrew, new balance: {}",
        account.withdraw(amount(200)?, "1234")?
    )?;
    for (label, result) in [
        ("Wrong PIN", account.withdraw(amount(50)?, "9999")),
        ("Overdraw", account.withdraw(amount(5000)?, "1234")),
        ("Large deposit without PIN", account.deposit(amount(15_000)?, None)),
    ] {
        if let Err(e) = result {
            writeln!(out, "  {label}: {e}")?;
        }
    }
    writeln!(out, "  Balance: {}", account.balance("1234")?)?;
    writeln!(out, "  History:")?;
    for entry in account.history("1234")? {
        writeln!(out, "    {entry}")?;
    }

    heading(out, "3. SECURITY QUESTION")?;
    let mut secure = SecureBankAccount::new(BankAccount::open(
        numbers.next_id(),
        "Bob Smith",
        amount(2000)?,
    ));
    secure.account_mut().set_pin("5678")?;
    secure.set_security_question("What is your pet's name?", "Fluffy", "5678")?;
    writeln!(
        out,
        "  Question: {}",
        secure.security_question().unwrap_or("none")
    )?;
    secure.reset_pin_with_security("4321", "FLUFFY")?;
    writeln!(
        out,
        "  PIN reset; new PIN works: {}",
        secure.account().verify_pin("4321")
    )?;
    for guess in ["Rex", "Spot", "Max"] {
        if let Err(e) = secure.reset_pin_with_security("0000", guess) {
            writeln!(out, "  Guess {guess:?}: {e}")?;
        }
    }
    writeln!(out, "  Status: {}", secure.account().status())?;
    if let Err(e) = secure.account_mut().deposit(amount(10)?, None) {
        writeln!(out, "  Deposit after lock: {e}")?;
    }

    Ok(())
}
