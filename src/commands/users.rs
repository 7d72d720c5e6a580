// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Subscription;
use crate::utils::{maybe_print_json, pretty_table};
use crate::{ledger, utils};
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim().to_string();
            let tier = Subscription::parse(sub.get_one::<String>("subscription").unwrap().trim())?;
            let e = ledger::register_user(conn, &username, tier)?;
            println!(
                "Registered '{}' ({}, balance {})",
                e.username,
                e.subscription.as_str(),
                e.balance
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let id = utils::id_for_user(conn, username)?;
            conn.execute("DELETE FROM users WHERE id=?1", params![id])?;
            println!("Removed user '{}'", username);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct UserRow {
    username: String,
    subscription: String,
    balance: i64,
    streak: i64,
    level: i64,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT username, subscription, balance, streak, level FROM users ORDER BY username",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(UserRow {
            username: r.get(0)?,
            subscription: r.get(1)?,
            balance: r.get(2)?,
            streak: r.get(3)?,
            level: r.get(4)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|u| {
                vec![
                    u.username.clone(),
                    u.subscription.clone(),
                    u.balance.to_string(),
                    u.streak.to_string(),
                    u.level.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Username", "Subscription", "Balance", "Streak", "Level"], rows)
        );
    }
    Ok(())
}
