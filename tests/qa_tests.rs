// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use alpharise::ledger::{self, LedgerError};
use alpharise::models::{QuestionType, Subscription};
use alpharise::qa::{self, QaError};
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

// Asker with a funded balance plus an answerer.
fn seed_pair(conn: &mut Connection) {
    ledger::register_user(conn, "asker", Subscription::Premium).unwrap();
    ledger::register_user(conn, "helper", Subscription::Trial).unwrap();
    ledger::monthly_allocation(conn, "asker", d("2025-08-01")).unwrap();
}

#[test]
fn ask_charges_cost_plus_bounty_in_one_transaction() {
    let mut conn = setup();
    seed_pair(&mut conn);

    let (q, tx) = qa::ask(
        &mut conn,
        "asker",
        "How do I hold eye contact?",
        "I look away after a second.",
        QuestionType::Vip,
        5,
        d("2025-08-04"),
    )
    .unwrap();
    assert_eq!(q.bounty, 5);
    assert_eq!(tx.amount, 20);
    assert_eq!(tx.question_id, Some(q.id));
    assert_eq!(ledger::entry(&conn, "asker").unwrap().balance, 180);

    let spends: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM transactions WHERE kind='spend' AND category='question'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(spends, 1);
}

#[test]
fn ask_with_insufficient_balance_writes_no_question() {
    let mut conn = setup();
    ledger::register_user(&conn, "broke", Subscription::Trial).unwrap();

    let err = qa::ask(
        &mut conn,
        "broke",
        "Title",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-04"),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InsufficientBalance {
            required: 2,
            available: 0
        })
    ));

    let questions: i64 = conn
        .query_row("SELECT COUNT(*) FROM questions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(questions, 0);
    assert_eq!(ledger::entry(&conn, "broke").unwrap().balance, 0);
}

#[test]
fn cannot_answer_own_question() {
    let mut conn = setup();
    seed_pair(&mut conn);
    let (q, _) = qa::ask(
        &mut conn,
        "asker",
        "Title",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-04"),
    )
    .unwrap();

    let err = qa::answer(&mut conn, "asker", q.id, "Self reply", d("2025-08-04")).unwrap_err();
    assert_eq!(*err.downcast_ref::<QaError>().unwrap(), QaError::OwnQuestion);
}

#[test]
fn rating_pays_the_answerer_and_is_one_shot() {
    let mut conn = setup();
    seed_pair(&mut conn);
    let (q, _) = qa::ask(
        &mut conn,
        "asker",
        "Title",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-04"),
    )
    .unwrap();
    let a = qa::answer(&mut conn, "helper", q.id, "Try this.", d("2025-08-04")).unwrap();

    // Tuesday: rating 5, not best -> 5 + 2 = 7
    let tx = qa::rate_answer(&mut conn, "asker", a.id, 5, d("2025-08-05")).unwrap();
    assert_eq!(tx.amount, 7);
    assert_eq!(ledger::entry(&conn, "helper").unwrap().balance, 7);

    let err = qa::rate_answer(&mut conn, "asker", a.id, 4, d("2025-08-05")).unwrap_err();
    assert_eq!(
        *err.downcast_ref::<QaError>().unwrap(),
        QaError::AlreadyRated(a.id)
    );
    assert_eq!(ledger::entry(&conn, "helper").unwrap().balance, 7);
}

#[test]
fn only_the_asker_can_rate() {
    let mut conn = setup();
    seed_pair(&mut conn);
    ledger::register_user(&conn, "bystander", Subscription::Trial).unwrap();
    let (q, _) = qa::ask(
        &mut conn,
        "asker",
        "Title",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-04"),
    )
    .unwrap();
    let a = qa::answer(&mut conn, "helper", q.id, "Try this.", d("2025-08-04")).unwrap();

    let err = qa::rate_answer(&mut conn, "bystander", a.id, 5, d("2025-08-05")).unwrap_err();
    assert_eq!(
        *err.downcast_ref::<QaError>().unwrap(),
        QaError::NotQuestionAuthor
    );
}

#[test]
fn invalid_rating_is_rejected() {
    let mut conn = setup();
    seed_pair(&mut conn);
    let (q, _) = qa::ask(
        &mut conn,
        "asker",
        "Title",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-04"),
    )
    .unwrap();
    let a = qa::answer(&mut conn, "helper", q.id, "Try this.", d("2025-08-04")).unwrap();
    let err = qa::rate_answer(&mut conn, "asker", a.id, 6, d("2025-08-05")).unwrap_err();
    assert_eq!(
        *err.downcast_ref::<QaError>().unwrap(),
        QaError::InvalidRating(6)
    );
}

#[test]
fn best_answer_is_author_only_and_pays_reward_plus_bounty() {
    let mut conn = setup();
    seed_pair(&mut conn);
    let (q, _) = qa::ask(
        &mut conn,
        "asker",
        "Title",
        "Body",
        QuestionType::Urgent,
        4,
        d("2025-08-04"),
    )
    .unwrap();
    let a = qa::answer(&mut conn, "helper", q.id, "Try this.", d("2025-08-04")).unwrap();
    qa::rate_answer(&mut conn, "asker", a.id, 5, d("2025-08-05")).unwrap();

    let err = qa::mark_best(&mut conn, "helper", a.id, d("2025-08-05")).unwrap_err();
    assert_eq!(
        *err.downcast_ref::<QaError>().unwrap(),
        QaError::NotQuestionAuthor
    );

    // Tuesday, rating 5 + best: 10, plus the 4-coin bounty as its own payout
    let paid = qa::mark_best(&mut conn, "asker", a.id, d("2025-08-05")).unwrap();
    assert_eq!(paid.len(), 2);
    assert_eq!(paid[0].amount, 10);
    assert_eq!(paid[0].reason, "Best answer");
    assert_eq!(paid[1].amount, 4);
    assert_eq!(paid[1].reason, "Question bounty");
    // 7 (rating) + 10 (best) + 4 (bounty)
    assert_eq!(ledger::entry(&conn, "helper").unwrap().balance, 21);

    let q2 = qa::question(&conn, q.id).unwrap();
    assert_eq!(q2.status, "answered");
    assert_eq!(q2.best_answer_id, Some(a.id));

    let err = qa::mark_best(&mut conn, "asker", a.id, d("2025-08-06")).unwrap_err();
    assert_eq!(
        *err.downcast_ref::<QaError>().unwrap(),
        QaError::BestAnswerAlreadyChosen(q.id)
    );
}

#[test]
fn votes_tally_without_coin_effects() {
    let mut conn = setup();
    seed_pair(&mut conn);
    let (q, _) = qa::ask(
        &mut conn,
        "asker",
        "Title",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-04"),
    )
    .unwrap();
    let a = qa::answer(&mut conn, "helper", q.id, "Try this.", d("2025-08-04")).unwrap();

    qa::vote(&conn, a.id, true).unwrap();
    qa::vote(&conn, a.id, true).unwrap();
    let after = qa::vote(&conn, a.id, false).unwrap();
    assert_eq!(after.upvotes, 2);
    assert_eq!(after.downvotes, 1);
    assert_eq!(ledger::entry(&conn, "helper").unwrap().balance, 0);
}

#[test]
fn open_questions_excludes_answered_ones() {
    let mut conn = setup();
    seed_pair(&mut conn);
    let (q1, _) = qa::ask(
        &mut conn,
        "asker",
        "First",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-04"),
    )
    .unwrap();
    let (q2, _) = qa::ask(
        &mut conn,
        "asker",
        "Second",
        "Body",
        QuestionType::Regular,
        0,
        d("2025-08-05"),
    )
    .unwrap();
    let a = qa::answer(&mut conn, "helper", q1.id, "Try this.", d("2025-08-05")).unwrap();
    qa::mark_best(&mut conn, "asker", a.id, d("2025-08-05")).unwrap();

    let open = qa::open_questions(&conn, None).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, q2.id);
}
