// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use alpharise::advisor::{self, Priority};
use alpharise::models::{QuestionType, Subscription};
use alpharise::{ledger, qa};
use chrono::NaiveDate;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    alpharise::db::init_schema(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn low_balance_and_missed_login_are_surfaced() {
    let mut conn = setup();
    ledger::register_user(&conn, "maya", Subscription::Trial).unwrap();
    ledger::daily_login(&mut conn, "maya", d("2025-08-01")).unwrap();

    let recs = advisor::recommendations(&conn, "maya", d("2025-08-03")).unwrap();
    assert!(recs.iter().any(|r| r.title == "Log in today"));
    assert!(
        recs.iter()
            .any(|r| r.title == "Balance too low to ask" && r.priority == Priority::High)
    );
    // Sorted highest priority first
    assert!(recs.windows(2).all(|w| w[0].priority >= w[1].priority));
}

#[test]
fn open_questions_from_others_prompt_answering() {
    let mut conn = setup();
    ledger::register_user(&conn, "asker", Subscription::Premium).unwrap();
    ledger::register_user(&conn, "maya", Subscription::Trial).unwrap();
    ledger::monthly_allocation(&mut conn, "asker", d("2025-08-01")).unwrap();
    qa::ask(
        &mut conn,
        "asker",
        "Title",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-02"),
    )
    .unwrap();

    let recs = advisor::recommendations(&conn, "maya", d("2025-08-03")).unwrap();
    assert!(recs.iter().any(|r| r.title == "Open questions waiting"));

    // The asker's own question is not a candidate for them
    let recs = advisor::recommendations(&conn, "asker", d("2025-08-03")).unwrap();
    assert!(!recs.iter().any(|r| r.title == "Open questions waiting"));
}

#[test]
fn streak_nudge_appears_close_to_the_bonus() {
    let mut conn = setup();
    ledger::register_user(&conn, "maya", Subscription::Trial).unwrap();
    let start = d("2025-08-01");
    for i in 0..5 {
        ledger::daily_login(&mut conn, "maya", start + chrono::Duration::days(i)).unwrap();
    }
    // Streak is 5; checking on the same day as the last login
    let recs = advisor::recommendations(&conn, "maya", d("2025-08-05")).unwrap();
    assert!(recs.iter().any(|r| r.title == "Streak bonus in reach"));
}
