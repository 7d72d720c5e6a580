// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Earn,
    Spend,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Earn => "earn",
            TxKind::Spend => "spend",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "earn" => Ok(TxKind::Earn),
            "spend" => Ok(TxKind::Spend),
            other => Err(anyhow!("Unknown transaction kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Question,
    Answer,
    Bonus,
    Subscription,
    Daily,
    Achievement,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Question => "question",
            Category::Answer => "answer",
            Category::Bonus => "bonus",
            Category::Subscription => "subscription",
            Category::Daily => "daily",
            Category::Achievement => "achievement",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "question" => Ok(Category::Question),
            "answer" => Ok(Category::Answer),
            "bonus" => Ok(Category::Bonus),
            "subscription" => Ok(Category::Subscription),
            "daily" => Ok(Category::Daily),
            "achievement" => Ok(Category::Achievement),
            other => Err(anyhow!("Unknown transaction category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    Trial,
    Premium,
}

impl Subscription {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subscription::Trial => "trial",
            Subscription::Premium => "premium",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "trial" => Ok(Subscription::Trial),
            "premium" => Ok(Subscription::Premium),
            other => Err(anyhow!(
                "Unknown subscription '{}', expected trial|premium",
                other
            )),
        }
    }

    /// Coins granted by a monthly allocation for this tier.
    pub fn monthly_allocation(&self) -> i64 {
        match self {
            Subscription::Trial => 50,
            Subscription::Premium => 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Regular,
    Urgent,
    Private,
    Vip,
    Boost,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Regular => "regular",
            QuestionType::Urgent => "urgent",
            QuestionType::Private => "private",
            QuestionType::Vip => "vip",
            QuestionType::Boost => "boost",
        }
    }

    /// Lossy parse: unknown strings fall back to `Regular`. The second
    /// element is false when the fallback was taken, so callers can warn
    /// instead of accepting a typo without a trace.
    pub fn parse_lossy(s: &str) -> (Self, bool) {
        match s {
            "regular" => (QuestionType::Regular, true),
            "urgent" => (QuestionType::Urgent, true),
            "private" => (QuestionType::Private, true),
            "vip" => (QuestionType::Vip, true),
            "boost" => (QuestionType::Boost, true),
            _ => (QuestionType::Regular, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub kind: TxKind,
    pub amount: i64,
    pub reason: String,
    pub category: Category,
    pub date: NaiveDate,
    pub question_id: Option<i64>,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub username: String,
    pub subscription: Subscription,
    pub balance: i64,
    pub total_earned: i64,
    pub total_spent: i64,
    pub streak: i64,
    pub level: i64,
    pub last_activity: Option<NaiveDate>,
    pub monthly_earnings: i64,
    pub discount_earned: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinAction {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: TxKind,
    /// Base coin amount; 0 when the amount is computed by a reward rule.
    pub amount: i64,
    pub description: &'static str,
    pub category: Category,
    pub icon: &'static str,
    pub conditions: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub qtype: QuestionType,
    pub bounty: i64,
    pub status: String,
    pub best_answer_id: Option<i64>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub user_id: i64,
    pub body: String,
    pub rating: Option<u8>,
    pub is_best: bool,
    pub upvotes: i64,
    pub downvotes: i64,
    pub date: NaiveDate,
}
