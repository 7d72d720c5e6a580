// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::QuestionType;
use crate::{ledger, qa, rewards};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub detail: String,
}

/// Heuristic nudges derived from a user's ledger and Q&A aggregates. Plain
/// rule table over query results; reads only.
pub fn recommendations(
    conn: &Connection,
    username: &str,
    today: NaiveDate,
) -> Result<Vec<Recommendation>> {
    let stats = ledger::stats(conn, username, today)?;
    let e = &stats.profile;
    let mut out = Vec::new();

    if e.last_activity != Some(today) {
        let priority = if e.streak >= 3 {
            Priority::High
        } else {
            Priority::Medium
        };
        out.push(Recommendation {
            priority,
            title: "Log in today".into(),
            detail: format!(
                "Your {}-day streak resets unless you log in today.",
                e.streak
            ),
        });
    }

    if e.balance < rewards::question_cost(QuestionType::Regular) {
        out.push(Recommendation {
            priority: Priority::High,
            title: "Balance too low to ask".into(),
            detail: format!(
                "{} coins left; answering questions is the fastest way to earn.",
                e.balance
            ),
        });
    }

    let answerable = qa::answerable_count(conn, e.id)?;
    if answerable > 0 {
        out.push(Recommendation {
            priority: Priority::Medium,
            title: "Open questions waiting".into(),
            detail: format!(
                "{} open questions you could answer for coins right now.",
                answerable
            ),
        });
    }

    if (5..7).contains(&e.streak) {
        out.push(Recommendation {
            priority: Priority::Medium,
            title: "Streak bonus in reach".into(),
            detail: format!(
                "{} more days until the 7-day streak bonus.",
                7 - e.streak
            ),
        });
    }

    if let Some(threshold) = stats.monthly.next_discount_threshold {
        let remaining = threshold - e.monthly_earnings;
        if remaining <= 30 {
            out.push(Recommendation {
                priority: Priority::Low,
                title: "Discount within reach".into(),
                detail: format!(
                    "Earn {} more coins this month for the next subscription discount.",
                    remaining
                ),
            });
        }
    }

    if stats.weekly.transaction_count == 0 {
        out.push(Recommendation {
            priority: Priority::Low,
            title: "Quiet week".into(),
            detail: "No coin activity in the last 7 days.".into(),
        });
    }

    out.sort_by(|a, b| b.priority.cmp(&a.priority));
    Ok(out)
}
