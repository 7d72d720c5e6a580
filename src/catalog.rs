// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CoinAction, TxKind};
use once_cell::sync::Lazy;

/// Static catalog of every earn/spend action. Entries with `amount == 0`
/// have their payout computed by a reward rule (`rewards`) rather than a
/// fixed base amount.
pub static ACTIONS: Lazy<Vec<CoinAction>> = Lazy::new(|| {
    vec![
        CoinAction {
            id: "ask_question",
            name: "Ask Question",
            kind: TxKind::Spend,
            amount: 2,
            description: "Post a regular question to the community",
            category: Category::Question,
            icon: "❓",
            conditions: None,
        },
        CoinAction {
            id: "urgent_question",
            name: "Urgent Question",
            kind: TxKind::Spend,
            amount: 5,
            description: "Pin a question at the top of the feed for 24h",
            category: Category::Question,
            icon: "🔥",
            conditions: None,
        },
        CoinAction {
            id: "private_question",
            name: "Private Question",
            kind: TxKind::Spend,
            amount: 8,
            description: "Ask a question visible only to coaches",
            category: Category::Question,
            icon: "🔒",
            conditions: None,
        },
        CoinAction {
            id: "vip_question",
            name: "VIP Question",
            kind: TxKind::Spend,
            amount: 15,
            description: "Guaranteed coach answer within 24h",
            category: Category::Question,
            icon: "👑",
            conditions: None,
        },
        CoinAction {
            id: "boost_question",
            name: "Boost Question",
            kind: TxKind::Spend,
            amount: 3,
            description: "Boost an existing question's visibility",
            category: Category::Question,
            icon: "🚀",
            conditions: None,
        },
        CoinAction {
            id: "daily_login",
            name: "Daily Login",
            kind: TxKind::Earn,
            amount: 1,
            description: "Log in on a new calendar day",
            category: Category::Daily,
            icon: "📅",
            conditions: Some("once per calendar day"),
        },
        CoinAction {
            id: "streak_bonus_7",
            name: "7-Day Streak",
            kind: TxKind::Earn,
            amount: 10,
            description: "Seven consecutive days of activity",
            category: Category::Bonus,
            icon: "⚡",
            conditions: Some("streak exactly 7"),
        },
        CoinAction {
            id: "streak_bonus_30",
            name: "30-Day Streak",
            kind: TxKind::Earn,
            amount: 25,
            description: "Thirty consecutive days of activity",
            category: Category::Bonus,
            icon: "🌟",
            conditions: Some("streak exactly 30"),
        },
        CoinAction {
            id: "answer_question",
            name: "Answer Question",
            kind: TxKind::Earn,
            amount: 0,
            description: "Answer a community question; payout depends on rating",
            category: Category::Answer,
            icon: "💬",
            conditions: Some("computed from rating, best-answer flag and weekend bonus"),
        },
        CoinAction {
            id: "best_answer",
            name: "Best Answer",
            kind: TxKind::Earn,
            amount: 0,
            description: "Have your answer selected as best by the asker",
            category: Category::Answer,
            icon: "🏆",
            conditions: Some("computed from rating and weekend bonus, plus bounty"),
        },
        CoinAction {
            id: "monthly_premium",
            name: "Premium Allocation",
            kind: TxKind::Earn,
            amount: 200,
            description: "Monthly coin allocation for premium subscribers",
            category: Category::Subscription,
            icon: "💎",
            conditions: Some("once per billing month"),
        },
        CoinAction {
            id: "monthly_trial",
            name: "Trial Allocation",
            kind: TxKind::Earn,
            amount: 50,
            description: "Monthly coin allocation during the trial",
            category: Category::Subscription,
            icon: "🎁",
            conditions: Some("once per billing month"),
        },
        CoinAction {
            id: "complete_assessment",
            name: "Assessment Complete",
            kind: TxKind::Earn,
            amount: 25,
            description: "Finish the confidence assessment",
            category: Category::Achievement,
            icon: "📋",
            conditions: Some("once per user"),
        },
        CoinAction {
            id: "complete_lesson",
            name: "Lesson Complete",
            kind: TxKind::Earn,
            amount: 5,
            description: "Finish a coaching lesson",
            category: Category::Achievement,
            icon: "📖",
            conditions: None,
        },
        CoinAction {
            id: "profile_complete",
            name: "Profile Complete",
            kind: TxKind::Earn,
            amount: 10,
            description: "Fill out every profile field",
            category: Category::Achievement,
            icon: "✅",
            conditions: Some("once per user"),
        },
    ]
});

pub fn lookup(id: &str) -> Option<&'static CoinAction> {
    ACTIONS.iter().find(|a| a.id == id)
}
