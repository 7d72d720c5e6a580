// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = run_checks(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Recompute per-user totals from the append-only log and flag any stored
/// ledger entry that disagrees, plus structural problems in the Q&A tables.
pub fn run_checks(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Balance invariant: balance must equal earned minus spent, and the
    //    stored totals must match the log.
    let mut stmt = conn.prepare(
        "SELECT u.username, u.balance, u.total_earned, u.total_spent,
                IFNULL(SUM(CASE WHEN t.kind='earn' THEN t.amount ELSE 0 END),0),
                IFNULL(SUM(CASE WHEN t.kind='spend' THEN t.amount ELSE 0 END),0)
         FROM users u LEFT JOIN transactions t ON t.user_id=u.id
         GROUP BY u.id ORDER BY u.username",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let username: String = r.get(0)?;
        let balance: i64 = r.get(1)?;
        let total_earned: i64 = r.get(2)?;
        let total_spent: i64 = r.get(3)?;
        let log_earned: i64 = r.get(4)?;
        let log_spent: i64 = r.get(5)?;
        if balance != total_earned - total_spent {
            rows.push(vec![
                "balance_invariant".into(),
                format!(
                    "{}: balance {} != earned {} - spent {}",
                    username, balance, total_earned, total_spent
                ),
            ]);
        }
        if total_earned != log_earned || total_spent != log_spent {
            rows.push(vec![
                "totals_vs_log".into(),
                format!(
                    "{}: stored {}/{} vs log {}/{}",
                    username, total_earned, total_spent, log_earned, log_spent
                ),
            ]);
        }
    }

    // 2) Transactions pointing at missing questions
    let mut stmt2 = conn.prepare(
        "SELECT t.id FROM transactions t
         WHERE t.question_id IS NOT NULL
           AND NOT EXISTS (SELECT 1 FROM questions q WHERE q.id=t.question_id)",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec![
            "tx_missing_question".into(),
            format!("transaction {}", id),
        ]);
    }

    // 3) Best-answer pointers must reference an answer of the same question
    let mut stmt3 = conn.prepare(
        "SELECT q.id FROM questions q
         WHERE q.best_answer_id IS NOT NULL
           AND NOT EXISTS (
             SELECT 1 FROM answers a WHERE a.id=q.best_answer_id AND a.question_id=q.id
           )",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec![
            "best_answer_mismatch".into(),
            format!("question {}", id),
        ]);
    }

    Ok(rows)
}
