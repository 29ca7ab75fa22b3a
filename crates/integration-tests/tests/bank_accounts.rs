//! Account lifecycle: opening, PIN-guarded operations, recovery, lockout.

use bazaar_core::bank::{BankAccount, BankError, SecureBankAccount, TransactionKind};
use bazaar_core::{AccountNumber, AccountStatus, Currency, Error, ErrorKind, IdSequence};
use bazaar_integration_tests::units;

fn open_with_pin(numbers: &IdSequence<AccountNumber>, owner: &str) -> BankAccount {
    let opening = units(1000, Currency::USD).expect("amount");
    let mut account = BankAccount::open(numbers.next_id(), owner, opening);
    account.set_pin("1234").expect("pin");
    account
}

#[test]
fn account_numbers_are_sequential() {
    let numbers = IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);
    let first = open_with_pin(&numbers, "Alice Johnson");
    let second = open_with_pin(&numbers, "Bob Smith");
    assert_eq!(first.number().as_i32(), 1000);
    assert_eq!(second.number().as_i32(), 1001);
    assert!(first.public_info().contains("Account Number: 1000"));
}

#[test]
fn deposits_and_withdrawals_move_the_balance() {
    let numbers = IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);
    let mut account = open_with_pin(&numbers, "Alice Johnson");

    let after_deposit = account
        .deposit(units(500, Currency::USD).expect("amount"), None)
        .expect("deposit");
    assert_eq!(after_deposit, units(1500, Currency::USD).expect("amount"));

    let after_withdrawal = account
        .withdraw(units(200, Currency::USD).expect("amount"), "1234")
        .expect("withdraw");
    assert_eq!(after_withdrawal, units(1300, Currency::USD).expect("amount"));
    assert_eq!(account.balance("1234").expect("balance"), after_withdrawal);

    let kinds: Vec<_> = account
        .history("1234")
        .expect("history")
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        [
            TransactionKind::PinSet,
            TransactionKind::Deposit,
            TransactionKind::Withdrawal
        ]
    );
}

#[test]
fn guarded_operations_reject_bad_input() {
    let numbers = IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);
    let mut account = open_with_pin(&numbers, "Alice Johnson");

    let err = account.balance("9999").expect_err("wrong pin");
    assert_eq!(err, BankError::WrongPin);

    let err = account
        .withdraw(units(5000, Currency::USD).expect("amount"), "1234")
        .expect_err("overdraw");
    assert!(matches!(err, BankError::InsufficientFunds { .. }));
    assert_eq!(err.kind(), ErrorKind::State);

    let err = account
        .deposit(units(20_000, Currency::USD).expect("amount"), None)
        .expect_err("large deposit");
    assert!(matches!(err, BankError::PinRequired { .. }));
    account
        .deposit(units(20_000, Currency::USD).expect("amount"), Some("1234"))
        .expect("large deposit with pin");

    let err: Error = account.set_pin("12a4").expect_err("bad pin").into();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn history_keeps_the_latest_entries() {
    let numbers = IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);
    let mut account = open_with_pin(&numbers, "Alice Johnson");
    for _ in 0..15 {
        account
            .deposit(units(1, Currency::USD).expect("amount"), None)
            .expect("deposit");
    }
    let history = account.history("1234").expect("history");
    assert_eq!(history.len(), BankAccount::HISTORY_LIMIT);
    assert!(history.iter().all(|t| t.kind == TransactionKind::Deposit));
}

#[test]
fn security_question_resets_the_pin() {
    let numbers = IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);
    let mut secure = SecureBankAccount::new(open_with_pin(&numbers, "Bob Smith"));
    secure
        .set_security_question("What is your pet's name?", "Fluffy", "1234")
        .expect("question");

    let err = secure
        .reset_pin_with_security("5678", "Rex")
        .expect_err("wrong answer");
    assert_eq!(err, BankError::IncorrectAnswer { remaining: 2 });

    secure
        .reset_pin_with_security("5678", "  fluffy ")
        .expect("reset");
    assert!(secure.account().verify_pin("5678"));
    assert!(!secure.account().verify_pin("1234"));
}

#[test]
fn repeated_wrong_answers_lock_the_account() {
    let numbers = IdSequence::starting_at(BankAccount::FIRST_ACCOUNT_NUMBER);
    let mut secure = SecureBankAccount::new(open_with_pin(&numbers, "Bob Smith"));
    secure
        .set_security_question("First school?", "Elm Street", "1234")
        .expect("question");

    for _ in 1..SecureBankAccount::MAX_ATTEMPTS {
        assert!(matches!(
            secure.reset_pin_with_security("5678", "wrong"),
            Err(BankError::IncorrectAnswer { .. })
        ));
    }
    assert_eq!(
        secure.reset_pin_with_security("5678", "wrong"),
        Err(BankError::TooManyAttempts)
    );
    assert_eq!(secure.account().status(), AccountStatus::Locked);

    assert_eq!(
        secure.reset_pin_with_security("5678", "Elm Street"),
        Err(BankError::TooManyAttempts)
    );
    assert_eq!(
        secure.account().balance("1234"),
        Err(BankError::Locked)
    );
}
