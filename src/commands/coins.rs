// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::ledger::{self, LedgerError};
use crate::models::TxKind;
use crate::utils::date_or_today;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("earn", sub)) => earn(conn, sub)?,
        Some(("spend", sub)) => spend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn earn(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let action_id = sub.get_one::<String>("action").unwrap().trim();
    let on = date_or_today(sub)?;
    let action = catalog::lookup(action_id)
        .ok_or_else(|| LedgerError::UnknownAction(action_id.into()))?;
    if action.kind != TxKind::Earn {
        anyhow::bail!("'{}' is a spend action, not an earn action", action_id);
    }
    if action.amount == 0 {
        anyhow::bail!(
            "'{}' has no fixed amount; it is paid by its own flow",
            action_id
        );
    }
    let tx = ledger::earn_action(conn, username, action, on)?;
    println!("{} {}: +{} coins for '{}'", action.icon, action.name, tx.amount, username);
    Ok(())
}

fn spend(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let action_id = sub.get_one::<String>("action").unwrap().trim();
    let on = date_or_today(sub)?;
    let action = catalog::lookup(action_id)
        .ok_or_else(|| LedgerError::UnknownAction(action_id.into()))?;
    if action.kind != TxKind::Spend {
        anyhow::bail!("'{}' is an earn action, not a spend action", action_id);
    }
    let tx = ledger::spend(
        conn,
        username,
        action.amount,
        action.description,
        action.category,
        None,
        on,
    )?;
    let e = ledger::entry(conn, username)?;
    println!(
        "{} {}: -{} coins for '{}' (balance {})",
        action.icon, action.name, tx.amount, username, e.balance
    );
    Ok(())
}
