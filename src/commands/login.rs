// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::utils::date_or_today;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let username = m.get_one::<String>("user").unwrap();
    let on = date_or_today(m)?;
    match ledger::daily_login(conn, username, on)? {
        Some(reward) => {
            let total: i64 = reward.transactions.iter().map(|t| t.amount).sum();
            println!(
                "Login recorded for '{}': +{} coins (streak {})",
                username, total, reward.streak
            );
            for t in &reward.transactions {
                println!("  {} +{}", t.reason, t.amount);
            }
        }
        None => println!("'{}' already logged in on {}", username, on),
    }
    Ok(())
}
