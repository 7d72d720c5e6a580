// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor;
use crate::utils::{date_or_today, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let username = m.get_one::<String>("user").unwrap();
    let today = date_or_today(m)?;
    let recs = advisor::recommendations(conn, username, today)?;
    if !maybe_print_json(json_flag, jsonl_flag, &recs)? {
        if recs.is_empty() {
            println!("Nothing to suggest for '{}' right now", username);
            return Ok(());
        }
        let rows: Vec<Vec<String>> = recs
            .iter()
            .map(|r| {
                vec![
                    format!("{:?}", r.priority).to_lowercase(),
                    r.title.clone(),
                    r.detail.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Priority", "Suggestion", "Detail"], rows));
    }
    Ok(())
}
