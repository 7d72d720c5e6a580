// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::ACTIONS;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(_conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            if !maybe_print_json(json_flag, jsonl_flag, &*ACTIONS)? {
                let rows: Vec<Vec<String>> = ACTIONS
                    .iter()
                    .map(|a| {
                        vec![
                            format!("{} {}", a.icon, a.id),
                            a.kind.as_str().to_string(),
                            if a.amount > 0 {
                                a.amount.to_string()
                            } else {
                                "dynamic".to_string()
                            },
                            a.category.as_str().to_string(),
                            a.description.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Action", "Kind", "Amount", "Category", "Description"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
