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
    let tx = ledger::monthly_allocation(conn, username, on)?;
    let e = ledger::entry(conn, username)?;
    println!(
        "{}: +{} coins for '{}' (balance {})",
        tx.reason, tx.amount, username, e.balance
    );
    Ok(())
}
