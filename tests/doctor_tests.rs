// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use alpharise::commands::doctor;
use alpharise::ledger;
use alpharise::models::{Category, Subscription};
use chrono::NaiveDate;
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    alpharise::db::init_schema(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn clean_ledger_reports_no_issues() {
    let mut conn = setup();
    ledger::register_user(&conn, "maya", Subscription::Premium).unwrap();
    ledger::monthly_allocation(&mut conn, "maya", d("2025-08-01")).unwrap();
    ledger::spend(
        &mut conn, "maya", 5, "Asked urgent question", Category::Question, None, d("2025-08-02"),
    )
    .unwrap();

    assert!(doctor::run_checks(&conn).unwrap().is_empty());
}

#[test]
fn corrupted_balance_is_flagged() {
    let mut conn = setup();
    ledger::register_user(&conn, "maya", Subscription::Premium).unwrap();
    ledger::monthly_allocation(&mut conn, "maya", d("2025-08-01")).unwrap();

    // Corrupt the stored balance behind the ledger's back
    conn.execute("UPDATE users SET balance=999 WHERE username='maya'", [])
        .unwrap();

    let issues = doctor::run_checks(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "balance_invariant");
}

#[test]
fn totals_disagreeing_with_log_are_flagged() {
    let mut conn = setup();
    ledger::register_user(&conn, "maya", Subscription::Premium).unwrap();
    ledger::monthly_allocation(&mut conn, "maya", d("2025-08-01")).unwrap();

    // Keep balance = earned - spent so only the log comparison trips
    conn.execute(
        "UPDATE users SET total_earned=300, balance=300 WHERE username='maya'",
        [],
    )
    .unwrap();

    let issues = doctor::run_checks(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "totals_vs_log");
}

#[test]
fn dangling_question_reference_is_flagged() {
    let mut conn = setup();
    let e = ledger::register_user(&conn, "maya", Subscription::Premium).unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, kind, amount, reason, category, date, question_id)
         VALUES (?1, 'earn', 3, 'Best answer', 'answer', '2025-08-01', 404)",
        params![e.id],
    )
    .unwrap();
    conn.execute(
        "UPDATE users SET balance=3, total_earned=3 WHERE id=?1",
        params![e.id],
    )
    .unwrap();

    let issues = doctor::run_checks(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "tx_missing_question");
}
