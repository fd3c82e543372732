//! Persistence tests: state survives restarts, corrupted lines are dropped
//! and counted, and a data directory is owned by one process at a time.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tempfile::TempDir;

use bankbook_core::adapters::{Sha256Hasher, TextFileStore};
use bankbook_core::config::{Config, HasherKind};
use bankbook_core::domain::Record;
use bankbook_core::ports::RecordStore;
use bankbook_core::{Account, AccountType, BankbookContext, LedgerService, Transaction, TransactionType, User};

fn open_ledger(dir: &Path) -> LedgerService<TextFileStore> {
    let store = TextFileStore::open(dir).expect("Failed to open store");
    LedgerService::open(store, Box::new(Sha256Hasher::new()))
}

#[test]
fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let acc = {
        let mut ledger = open_ledger(temp_dir.path());
        ledger.register("bob123", "longpass1").unwrap();
        ledger.login("bob123", "longpass1").unwrap();
        let acc = ledger.create_account(AccountType::Checking).unwrap();
        ledger.deposit(&acc, Decimal::new(10000, 2)).unwrap();
        ledger.withdraw(&acc, Decimal::new(2550, 2)).unwrap();
        acc
    };

    let mut ledger = open_ledger(temp_dir.path());
    assert!(ledger.current_user().is_none(), "sessions are not persisted");
    assert_eq!(ledger.skipped_on_load().total(), 0);

    ledger.login("bob123", "longpass1").unwrap();
    let account = ledger.get_account(&acc).unwrap();
    assert_eq!(account.balance, Decimal::new(7450, 2));
    assert_eq!(account.account_type, AccountType::Checking);

    let txs = ledger.get_account_transactions(&acc);
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].transaction_type, TransactionType::Deposit);
    assert_eq!(txs[1].amount, Decimal::new(2550, 2));
}

#[test]
fn test_round_trip_through_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = TextFileStore::open(temp_dir.path()).unwrap();

    let users = vec![User::new("alice", "ZGlnZXN0", "c2FsdA=="), {
        let mut u = User::new("bob_2", "b3RoZXI=", "cGVwcGVy");
        u.is_active = false;
        u
    }];
    let accounts = vec![
        Account::new("ACC100001", "alice", AccountType::Savings),
        Account::new("ACC999999", "bob_2", AccountType::Checking),
    ];
    let transactions = vec![Transaction::new(
        "TXN1700000000000",
        "ACC100001",
        TransactionType::Deposit,
        Decimal::new(123456, 2),
        "salary, march",
    )];

    store.save(&users).unwrap();
    store.save(&accounts).unwrap();
    store.save(&transactions).unwrap();

    assert_eq!(store.load::<User>().unwrap().records, users);
    assert_eq!(store.load::<Account>().unwrap().records, accounts);
    assert_eq!(store.load::<Transaction>().unwrap().records, transactions);
}

#[test]
fn test_corrupted_lines_are_dropped_and_counted() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(User::FILE_NAME),
        "alice,ZGln,c2FsdA==,true\n\nonly,three,fields\nbob,ZGln,c2FsdA==,perhaps\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join(Account::FILE_NAME),
        "ACC100001,alice,12.50,SAVINGS,2024-01-01T10:00\nACC100002,alice,abc,SAVINGS,2024-01-01T10:00\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join(Transaction::FILE_NAME),
        "TXN1,ACC100001,REFUND,1.0,2024-01-01T10:00,x\nTXN2,ACC100001,DEPOSIT,12.50,2024-01-01T10:00,opening\n",
    )
    .unwrap();

    let ledger = open_ledger(temp_dir.path());
    let skipped = ledger.skipped_on_load();
    assert_eq!(skipped.users, 2);
    assert_eq!(skipped.accounts, 1);
    assert_eq!(skipped.transactions, 1);
}

#[test]
fn test_dropped_lines_vanish_on_next_save() {
    let temp_dir = TempDir::new().unwrap();
    let users_path = temp_dir.path().join(User::FILE_NAME);
    fs::write(&users_path, "garbage\n").unwrap();

    let mut ledger = open_ledger(temp_dir.path());
    ledger.register("carol", "password1").unwrap();

    let content = fs::read_to_string(&users_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("carol,"));
}

#[test]
fn test_no_temp_files_left_behind() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = open_ledger(temp_dir.path());
    ledger.register("bob123", "longpass1").unwrap();
    ledger.login("bob123", "longpass1").unwrap();
    let acc = ledger.create_account(AccountType::Savings).unwrap();
    ledger.deposit(&acc, Decimal::ONE).unwrap();

    let mut names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![".bankbook.lock", "accounts.txt", "transactions.txt", "users.txt"]
    );
}

#[test]
fn test_context_locks_data_directory() {
    let temp_dir = TempDir::new().unwrap();
    let _first = BankbookContext::new(temp_dir.path()).unwrap();
    assert!(BankbookContext::new(temp_dir.path()).is_err());
}

#[test]
fn test_context_rejects_unusable_hasher() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.hasher = HasherKind::Argon2;
    config.argon2.parallelism = 0;

    assert!(BankbookContext::with_config(temp_dir.path(), config).is_err());
}

#[test]
fn test_context_with_argon2() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.hasher = HasherKind::Argon2;
    config.argon2.time_cost = 1;
    config.argon2.memory_cost = 1024;
    config.argon2.parallelism = 1;

    let mut ctx = BankbookContext::with_config(temp_dir.path(), config).unwrap();
    ctx.ledger.register("bob123", "longpass1").unwrap();
    assert!(ctx.ledger.login("bob123", "wrongpass").is_err());
    assert!(ctx.ledger.login("bob123", "longpass1").is_ok());
}
