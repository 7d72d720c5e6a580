// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::utils::{id_for_user, maybe_print_json, pretty_table};
use crate::ledger;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied();
    let data: Vec<Transaction> = match sub.get_one::<String>("user") {
        Some(username) => {
            let user_id = id_for_user(conn, username)?;
            ledger::transactions_for_user(conn, user_id, limit)?
        }
        None => ledger::recent_activity(conn, limit.unwrap_or(50))?,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    t.amount.to_string(),
                    t.category.as_str().to_string(),
                    t.reason.clone(),
                    t.question_id.map(|q| q.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Amount", "Category", "Reason", "Question"], rows)
        );
    }
    Ok(())
}
