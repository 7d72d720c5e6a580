// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CoinAction, LedgerEntry, Subscription, Transaction, TxKind};
use crate::rewards::{self, StreakOutcome};
use crate::utils::{get_discount_cap, get_discount_unit, parse_date};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use thiserror::Error;

/// Recoverable ledger failures surfaced to the caller. Everything here is
/// local to one operation; nothing is fatal to the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: need {required} coins, have {available}")]
    InsufficientBalance { required: i64, available: i64 },
    #[error("user '{0}' not found")]
    UserNotFound(String),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("'{0}' was already awarded to this user")]
    DuplicateBadge(String),
}

impl LedgerError {
    pub fn shortfall(&self) -> Option<i64> {
        match self {
            LedgerError::InsufficientBalance {
                required,
                available,
            } => Some(required - available),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginReward {
    pub streak: i64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStats {
    pub earned: i64,
    pub spent: i64,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyStats {
    pub earned: i64,
    pub discount_progress: rust_decimal::Decimal,
    /// Coins of monthly earnings at which the next discount unit unlocks;
    /// None once the cap is reached.
    pub next_discount_threshold: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerStats {
    pub profile: LedgerEntry,
    pub badges: Vec<String>,
    pub weekly: WeeklyStats,
    pub monthly: MonthlyStats,
}

pub fn register_user(
    conn: &Connection,
    username: &str,
    subscription: Subscription,
) -> Result<LedgerEntry> {
    conn.execute(
        "INSERT INTO users(username, subscription) VALUES (?1, ?2)",
        params![username, subscription.as_str()],
    )
    .with_context(|| format!("Could not register user '{}'", username))?;
    entry(conn, username)
}

pub fn entry(conn: &Connection, username: &str) -> Result<LedgerEntry> {
    entry_opt(conn, username)?.ok_or_else(|| LedgerError::UserNotFound(username.into()).into())
}

fn entry_opt(conn: &Connection, username: &str) -> Result<Option<LedgerEntry>> {
    let row: Option<(
        i64,
        String,
        String,
        i64,
        i64,
        i64,
        i64,
        i64,
        Option<String>,
        i64,
        String,
    )> = conn
        .query_row(
            "SELECT id, username, subscription, balance, total_earned, total_spent,
                    streak, level, last_activity, monthly_earnings, discount_earned
             FROM users WHERE username=?1",
            params![username],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                    r.get(7)?,
                    r.get(8)?,
                    r.get(9)?,
                    r.get(10)?,
                ))
            },
        )
        .optional()?;
    let Some((
        id,
        username,
        subscription,
        balance,
        total_earned,
        total_spent,
        streak,
        level,
        last_activity,
        monthly_earnings,
        discount_earned,
    )) = row
    else {
        return Ok(None);
    };
    let last_activity = match last_activity {
        Some(s) => Some(parse_date(&s)?),
        None => None,
    };
    Ok(Some(LedgerEntry {
        id,
        username,
        subscription: Subscription::parse(&subscription)?,
        balance,
        total_earned,
        total_spent,
        streak,
        level,
        last_activity,
        monthly_earnings,
        discount_earned: discount_earned
            .parse()
            .with_context(|| format!("Invalid discount '{}'", discount_earned))?,
    }))
}

/// Insert one immutable row into the transaction log. The log is the only
/// record of coin movement; nothing updates or deletes rows once appended.
fn append_tx(
    conn: &Connection,
    user_id: i64,
    kind: TxKind,
    amount: i64,
    reason: &str,
    category: Category,
    question_id: Option<i64>,
    rating: Option<u8>,
    on: NaiveDate,
) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO transactions(user_id, kind, amount, reason, category, date, question_id, rating)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            kind.as_str(),
            amount,
            reason,
            category.as_str(),
            on.to_string(),
            question_id,
            rating
        ],
    )?;
    Ok(Transaction {
        id: conn.last_insert_rowid(),
        user_id,
        kind,
        amount,
        reason: reason.to_string(),
        category,
        date: on,
        question_id,
        rating,
    })
}

/// Credit coins to a user. Callers must hold an open SQL transaction so the
/// log append and the entry update commit together.
pub(crate) fn earn_in(
    conn: &Connection,
    username: &str,
    amount: i64,
    reason: &str,
    category: Category,
    question_id: Option<i64>,
    rating: Option<u8>,
    on: NaiveDate,
) -> Result<Transaction> {
    let e = entry(conn, username)?;
    let tx = append_tx(
        conn,
        e.id,
        TxKind::Earn,
        amount,
        reason,
        category,
        question_id,
        rating,
        on,
    )?;
    let total_earned = e.total_earned + amount;
    let monthly_earnings = e.monthly_earnings + amount;
    let discount = rewards::discount_for(
        monthly_earnings,
        get_discount_unit(conn)?,
        get_discount_cap(conn)?,
    );
    conn.execute(
        "UPDATE users SET balance=balance+?1, total_earned=?2, monthly_earnings=?3,
                discount_earned=?4, level=?5 WHERE id=?6",
        params![
            amount,
            total_earned,
            monthly_earnings,
            discount.to_string(),
            rewards::level_for(total_earned),
            e.id
        ],
    )?;
    Ok(tx)
}

/// Debit coins from a user, rejecting before any write when the balance is
/// short. Callers must hold an open SQL transaction.
pub(crate) fn spend_in(
    conn: &Connection,
    username: &str,
    amount: i64,
    reason: &str,
    category: Category,
    question_id: Option<i64>,
    on: NaiveDate,
) -> Result<Transaction> {
    let e = entry(conn, username)?;
    if e.balance < amount {
        return Err(LedgerError::InsufficientBalance {
            required: amount,
            available: e.balance,
        }
        .into());
    }
    let tx = append_tx(
        conn,
        e.id,
        TxKind::Spend,
        amount,
        reason,
        category,
        question_id,
        None,
        on,
    )?;
    conn.execute(
        "UPDATE users SET balance=balance-?1, total_spent=total_spent+?1 WHERE id=?2",
        params![amount, e.id],
    )?;
    Ok(tx)
}

pub fn earn(
    conn: &mut Connection,
    username: &str,
    amount: i64,
    reason: &str,
    category: Category,
    question_id: Option<i64>,
    rating: Option<u8>,
    on: NaiveDate,
) -> Result<Transaction> {
    let sql = conn.transaction()?;
    let tx = earn_in(&sql, username, amount, reason, category, question_id, rating, on)?;
    sql.commit()?;
    Ok(tx)
}

pub fn spend(
    conn: &mut Connection,
    username: &str,
    amount: i64,
    reason: &str,
    category: Category,
    question_id: Option<i64>,
    on: NaiveDate,
) -> Result<Transaction> {
    let sql = conn.transaction()?;
    let tx = spend_in(&sql, username, amount, reason, category, question_id, on)?;
    sql.commit()?;
    Ok(tx)
}

/// Catalog-driven earn for fixed-amount actions (achievements, lessons).
/// Dynamic actions (amount 0) are rejected; their payouts come from the
/// flows that can compute them. Once-per-user actions are gated by a badge
/// carrying the action id.
pub fn earn_action(
    conn: &mut Connection,
    username: &str,
    action: &CoinAction,
    on: NaiveDate,
) -> Result<Transaction> {
    if action.kind != TxKind::Earn || action.amount == 0 {
        return Err(LedgerError::UnknownAction(action.id.into()).into());
    }
    let sql = conn.transaction()?;
    if action.conditions == Some("once per user") {
        let e = entry(&sql, username)?;
        if !award_badge(&sql, e.id, action.id)? {
            return Err(LedgerError::DuplicateBadge(action.id.into()).into());
        }
    }
    let tx = earn_in(
        &sql,
        username,
        action.amount,
        action.description,
        action.category,
        None,
        None,
        on,
    )?;
    sql.commit()?;
    Ok(tx)
}

/// Daily login reward, idempotent per calendar date: a second call on the
/// same date returns None and writes nothing. A streak continues only when
/// the last login was exactly yesterday; otherwise it restarts at 1.
pub fn daily_login(
    conn: &mut Connection,
    username: &str,
    on: NaiveDate,
) -> Result<Option<LoginReward>> {
    let sql = conn.transaction()?;
    let e = entry(&sql, username)?;
    let streak = match rewards::streak_after(e.last_activity, on, e.streak) {
        StreakOutcome::Duplicate => return Ok(None),
        StreakOutcome::Continued(n) => n,
        StreakOutcome::Reset => 1,
    };
    let mut transactions = vec![earn_in(
        &sql,
        username,
        rewards::DAILY_LOGIN_BASE,
        "Daily login",
        Category::Daily,
        None,
        None,
        on,
    )?];
    if let Some((bonus, reason)) = rewards::streak_bonus(streak) {
        transactions.push(earn_in(
            &sql,
            username,
            bonus,
            reason,
            Category::Bonus,
            None,
            None,
            on,
        )?);
        award_badge(&sql, e.id, &format!("streak_{}", streak))?;
    }
    sql.execute(
        "UPDATE users SET streak=?1, last_activity=?2 WHERE id=?3",
        params![streak, on.to_string(), e.id],
    )?;
    sql.commit()?;
    Ok(Some(LoginReward {
        streak,
        transactions,
    }))
}

/// Grant the tier's monthly coins as a single transaction and reset the
/// monthly accrual counters in the same SQL transaction.
pub fn monthly_allocation(
    conn: &mut Connection,
    username: &str,
    on: NaiveDate,
) -> Result<Transaction> {
    let sql = conn.transaction()?;
    let e = entry(&sql, username)?;
    let amount = e.subscription.monthly_allocation();
    let reason = format!("Monthly {} allocation", e.subscription.as_str());
    let tx = append_tx(
        &sql,
        e.id,
        TxKind::Earn,
        amount,
        &reason,
        Category::Subscription,
        None,
        None,
        on,
    )?;
    let total_earned = e.total_earned + amount;
    sql.execute(
        "UPDATE users SET balance=balance+?1, total_earned=?2, monthly_earnings=0,
                discount_earned='0', level=?3 WHERE id=?4",
        params![amount, total_earned, rewards::level_for(total_earned), e.id],
    )?;
    sql.commit()?;
    Ok(tx)
}

/// Record a badge for a user. Returns false when the user already holds it.
pub fn award_badge(conn: &Connection, user_id: i64, badge: &str) -> Result<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO badges(user_id, badge) VALUES (?1, ?2)",
        params![user_id, badge],
    )?;
    Ok(n > 0)
}

pub fn badges_for(conn: &Connection, user_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT badge FROM badges WHERE user_id=?1 ORDER BY badge")?;
    let rows = stmt.query_map(params![user_id], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for b in rows {
        out.push(b?);
    }
    Ok(out)
}

fn tx_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, i64, String, i64, String, String, String, Option<i64>, Option<u8>)> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
    ))
}

fn build_tx(
    raw: (i64, i64, String, i64, String, String, String, Option<i64>, Option<u8>),
) -> Result<Transaction> {
    let (id, user_id, kind, amount, reason, category, date, question_id, rating) = raw;
    Ok(Transaction {
        id,
        user_id,
        kind: TxKind::parse(&kind)?,
        amount,
        reason,
        category: Category::parse(&category)?,
        date: parse_date(&date)?,
        question_id,
        rating,
    })
}

/// Most-recent-first transaction history for one user.
pub fn transactions_for_user(
    conn: &Connection,
    user_id: i64,
    limit: Option<usize>,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, user_id, kind, amount, reason, category, date, question_id, rating
         FROM transactions WHERE user_id=?1 ORDER BY date DESC, id DESC",
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], tx_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(build_tx(r?)?);
    }
    Ok(out)
}

/// Most-recent-first activity across all users.
pub fn recent_activity(conn: &Connection, limit: usize) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, kind, amount, reason, category, date, question_id, rating
         FROM transactions ORDER BY date DESC, id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], tx_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(build_tx(r?)?);
    }
    Ok(out)
}

/// Read-only aggregation: profile, trailing-7-day activity and the monthly
/// discount progress.
pub fn stats(conn: &Connection, username: &str, today: NaiveDate) -> Result<LedgerStats> {
    let e = entry(conn, username)?;
    let week_start = today - chrono::Duration::days(6);
    let (earned, spent, transaction_count): (i64, i64, i64) = conn.query_row(
        "SELECT IFNULL(SUM(CASE WHEN kind='earn' THEN amount ELSE 0 END),0),
                IFNULL(SUM(CASE WHEN kind='spend' THEN amount ELSE 0 END),0),
                COUNT(*)
         FROM transactions WHERE user_id=?1 AND date>=?2 AND date<=?3",
        params![e.id, week_start.to_string(), today.to_string()],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
    )?;
    let cap = get_discount_cap(conn)?;
    let next_discount_threshold = if e.discount_earned < cap {
        Some((e.monthly_earnings / 100 + 1) * 100)
    } else {
        None
    };
    let badges = badges_for(conn, e.id)?;
    Ok(LedgerStats {
        monthly: MonthlyStats {
            earned: e.monthly_earnings,
            discount_progress: e.discount_earned,
            next_discount_threshold,
        },
        weekly: WeeklyStats {
            earned,
            spent,
            transaction_count,
        },
        badges,
        profile: e,
    })
}
