// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use alpharise::{cli, commands, ledger};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    alpharise::db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn user_add_trims_and_registers() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "alpharise",
        "user",
        "add",
        "--username",
        " maya ",
        "--subscription",
        "premium",
    ]);
    if let Some(("user", user_m)) = matches.subcommand() {
        commands::users::handle(&conn, user_m).unwrap();
    } else {
        panic!("user command not parsed");
    }

    let e = ledger::entry(&conn, "maya").unwrap();
    assert_eq!(e.subscription.as_str(), "premium");
    assert_eq!(e.balance, 0);
}

#[test]
fn login_command_respects_explicit_date() {
    let mut conn = setup();
    ledger::register_user(&conn, "maya", alpharise::models::Subscription::Trial).unwrap();
    for date in ["2025-08-01", "2025-08-02"] {
        let matches = cli::build_cli().get_matches_from([
            "alpharise", "login", "--user", "maya", "--date", date,
        ]);
        if let Some(("login", login_m)) = matches.subcommand() {
            commands::login::handle(&mut conn, login_m).unwrap();
        } else {
            panic!("login command not parsed");
        }
    }
    let e = ledger::entry(&conn, "maya").unwrap();
    assert_eq!(e.streak, 2);
    assert_eq!(e.balance, 2);
}

#[test]
fn coins_spend_rejects_earn_actions() {
    let mut conn = setup();
    ledger::register_user(&conn, "maya", alpharise::models::Subscription::Trial).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "alpharise", "coins", "spend", "--user", "maya", "--action", "daily_login",
    ]);
    if let Some(("coins", coins_m)) = matches.subcommand() {
        let err = commands::coins::handle(&mut conn, coins_m).unwrap_err();
        assert!(err.to_string().contains("earn action"));
    } else {
        panic!("coins command not parsed");
    }
}
