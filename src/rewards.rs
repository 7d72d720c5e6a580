// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::QuestionType;
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

pub const DAILY_LOGIN_BASE: i64 = 1;
pub const STREAK_BONUS_7: i64 = 10;
pub const STREAK_BONUS_30: i64 = 25;

pub fn is_weekend(on: NaiveDate) -> bool {
    matches!(on.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Coin payout for an answer. The steps apply in this order: base 3, a
/// rating of 4 or better raises the amount to 5, best-answer adds 3, a
/// perfect rating adds 2, and a weekend doubles the final sum.
pub fn answer_reward(rating: u8, is_best: bool, on: NaiveDate) -> i64 {
    let mut amount = 3;
    if rating >= 4 {
        amount = 5;
    }
    if is_best {
        amount += 3;
    }
    if rating == 5 {
        amount += 2;
    }
    if is_weekend(on) {
        amount *= 2;
    }
    amount
}

pub fn question_cost(qtype: QuestionType) -> i64 {
    match qtype {
        QuestionType::Regular => 2,
        QuestionType::Urgent => 5,
        QuestionType::Private => 8,
        QuestionType::Vip => 15,
        QuestionType::Boost => 3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// Already logged activity on this calendar date.
    Duplicate,
    /// Last activity was exactly yesterday; streak grows.
    Continued(i64),
    /// Gap of more than one calendar day (or first activity); streak restarts.
    Reset,
}

pub fn streak_after(last_activity: Option<NaiveDate>, today: NaiveDate, streak: i64) -> StreakOutcome {
    match last_activity {
        Some(last) if last == today => StreakOutcome::Duplicate,
        Some(last) if last == today - chrono::Duration::days(1) => {
            StreakOutcome::Continued(streak + 1)
        }
        _ => StreakOutcome::Reset,
    }
}

/// Bonus paid when a streak lands exactly on a milestone. Each milestone
/// carries its own reason string so the transactions stay distinguishable.
pub fn streak_bonus(streak: i64) -> Option<(i64, &'static str)> {
    match streak {
        7 => Some((STREAK_BONUS_7, "7-day streak bonus")),
        30 => Some((STREAK_BONUS_30, "30-day streak bonus")),
        _ => None,
    }
}

/// Subscription discount accrued from monthly coin earnings: one `unit` of
/// currency per full 100 coins, capped. Monotone within a billing month
/// because `monthly_earnings` only grows between allocations.
pub fn discount_for(monthly_earnings: i64, unit: Decimal, cap: Decimal) -> Decimal {
    let units = Decimal::from(monthly_earnings / 100);
    (units * unit).min(cap)
}

/// Lifetime level: one level per 500 coins ever earned.
pub fn level_for(total_earned: i64) -> i64 {
    1 + total_earned / 500
}
