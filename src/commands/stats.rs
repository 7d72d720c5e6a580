// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::utils::{date_or_today, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let username = m.get_one::<String>("user").unwrap();
    let today = date_or_today(m)?;
    let s = ledger::stats(conn, username, today)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let e = &s.profile;
        let rows = vec![
            vec!["Balance".into(), e.balance.to_string()],
            vec!["Total earned".into(), e.total_earned.to_string()],
            vec!["Total spent".into(), e.total_spent.to_string()],
            vec!["Streak".into(), e.streak.to_string()],
            vec!["Level".into(), e.level.to_string()],
            vec![
                "Badges".into(),
                if s.badges.is_empty() {
                    "-".into()
                } else {
                    s.badges.join(", ")
                },
            ],
            vec![
                "Weekly earned/spent".into(),
                format!("{} / {}", s.weekly.earned, s.weekly.spent),
            ],
            vec![
                "Weekly transactions".into(),
                s.weekly.transaction_count.to_string(),
            ],
            vec!["Monthly earned".into(), s.monthly.earned.to_string()],
            vec![
                "Discount earned".into(),
                format!("{:.2}", s.monthly.discount_progress),
            ],
            vec![
                "Next discount at".into(),
                s.monthly
                    .next_discount_threshold
                    .map(|t| format!("{} coins", t))
                    .unwrap_or_else(|| "capped".into()),
            ],
        ];
        let header = format!("{} ({})", e.username, e.subscription.as_str());
        println!("{}", pretty_table(&[header.as_str(), "Value"], rows));
    }
    Ok(())
}
