// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::QuestionType;
use crate::qa;
use crate::utils::{date_or_today, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ask", sub)) => ask(conn, sub)?,
        Some(("answer", sub)) => answer(conn, sub)?,
        Some(("rate", sub)) => rate(conn, sub)?,
        Some(("best", sub)) => best(conn, sub)?,
        Some(("vote", sub)) => vote(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn ask(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let title = sub.get_one::<String>("title").unwrap();
    let body = sub.get_one::<String>("body").unwrap();
    let raw_type = sub.get_one::<String>("type").unwrap().trim();
    let bounty = *sub.get_one::<i64>("bounty").unwrap();
    let on = date_or_today(sub)?;

    let (qtype, exact) = QuestionType::parse_lossy(raw_type);
    if !exact {
        eprintln!(
            "Unknown question type '{}', falling back to '{}'",
            raw_type,
            qtype.as_str()
        );
    }
    if bounty < 0 {
        anyhow::bail!("Bounty must be non-negative, got {}", bounty);
    }
    let (q, tx) = qa::ask(conn, username, title, body, qtype, bounty, on)?;
    println!(
        "Question #{} posted by '{}' ({} question, -{} coins)",
        q.id,
        username,
        q.qtype.as_str(),
        tx.amount
    );
    Ok(())
}

fn answer(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let question_id = *sub.get_one::<i64>("question").unwrap();
    let body = sub.get_one::<String>("body").unwrap();
    let on = date_or_today(sub)?;
    let a = qa::answer(conn, username, question_id, body, on)?;
    println!(
        "Answer #{} posted by '{}' on question #{}",
        a.id, username, question_id
    );
    Ok(())
}

fn rate(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let answer_id = *sub.get_one::<i64>("answer").unwrap();
    let rating = *sub.get_one::<u8>("rating").unwrap();
    let on = date_or_today(sub)?;
    let tx = qa::rate_answer(conn, username, answer_id, rating, on)?;
    println!(
        "Answer #{} rated {}/5; answerer earned {} coins",
        answer_id, rating, tx.amount
    );
    Ok(())
}

fn best(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let answer_id = *sub.get_one::<i64>("answer").unwrap();
    let on = date_or_today(sub)?;
    let paid = qa::mark_best(conn, username, answer_id, on)?;
    let total: i64 = paid.iter().map(|t| t.amount).sum();
    println!(
        "Answer #{} marked best; answerer earned {} coins",
        answer_id, total
    );
    Ok(())
}

fn vote(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let answer_id = *sub.get_one::<i64>("answer").unwrap();
    let down = sub.get_flag("down");
    let a = qa::vote(conn, answer_id, !down)?;
    println!(
        "Answer #{}: {} up / {} down",
        a.id, a.upvotes, a.downvotes
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied();
    let data = qa::open_questions(conn, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|q| {
                vec![
                    q.id.to_string(),
                    q.date.to_string(),
                    q.qtype.as_str().to_string(),
                    q.bounty.to_string(),
                    q.title.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Bounty", "Title"], rows)
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let question_id = *sub.get_one::<i64>("question").unwrap();
    let q = qa::question(conn, question_id)?;
    let answers = qa::answers_for(conn, question_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &(&q, &answers))? {
        println!(
            "#{} [{}] {} (bounty {}, {})",
            q.id,
            q.qtype.as_str(),
            q.title,
            q.bounty,
            q.status
        );
        println!("{}", q.body);
        let rows: Vec<Vec<String>> = answers
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    if a.is_best { "★".into() } else { String::new() },
                    a.rating.map(|r| format!("{}/5", r)).unwrap_or_default(),
                    format!("+{}/-{}", a.upvotes, a.downvotes),
                    a.body.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Best", "Rating", "Votes", "Answer"], rows)
        );
    }
    Ok(())
}
