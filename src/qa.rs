// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{Answer, Category, Question, QuestionType, Transaction};
use crate::rewards;
use crate::utils::parse_date;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QaError {
    #[error("question {0} not found")]
    QuestionNotFound(i64),
    #[error("answer {0} not found")]
    AnswerNotFound(i64),
    #[error("only the question's author can do that")]
    NotQuestionAuthor,
    #[error("you cannot answer your own question")]
    OwnQuestion,
    #[error("question {0} is no longer open")]
    QuestionClosed(i64),
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("answer {0} was already rated")]
    AlreadyRated(i64),
    #[error("question {0} already has a best answer")]
    BestAnswerAlreadyChosen(i64),
}

/// Post a question, charging its type cost plus any bounty in the same SQL
/// transaction. Insufficient balance means no question row is written.
pub fn ask(
    conn: &mut Connection,
    username: &str,
    title: &str,
    body: &str,
    qtype: QuestionType,
    bounty: i64,
    on: NaiveDate,
) -> Result<(Question, Transaction)> {
    let sql = conn.transaction()?;
    let user_id = crate::utils::id_for_user(&sql, username)?;
    let cost = rewards::question_cost(qtype) + bounty;
    let reason = if bounty > 0 {
        format!("Asked {} question (bounty {})", qtype.as_str(), bounty)
    } else {
        format!("Asked {} question", qtype.as_str())
    };
    sql.execute(
        "INSERT INTO questions(user_id, title, body, qtype, bounty, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![user_id, title, body, qtype.as_str(), bounty, on.to_string()],
    )?;
    let question_id = sql.last_insert_rowid();
    let tx = ledger::spend_in(
        &sql,
        username,
        cost,
        &reason,
        Category::Question,
        Some(question_id),
        on,
    )?;
    ledger::award_badge(&sql, user_id, "first_question")?;
    let q = question(&sql, question_id)?;
    sql.commit()?;
    Ok((q, tx))
}

/// Post an answer. Authors cannot answer their own questions, and closed
/// questions take no further answers.
pub fn answer(
    conn: &mut Connection,
    username: &str,
    question_id: i64,
    body: &str,
    on: NaiveDate,
) -> Result<Answer> {
    let sql = conn.transaction()?;
    let user_id = crate::utils::id_for_user(&sql, username)?;
    let q = question(&sql, question_id)?;
    if q.user_id == user_id {
        return Err(QaError::OwnQuestion.into());
    }
    if q.status == "closed" {
        return Err(QaError::QuestionClosed(question_id).into());
    }
    sql.execute(
        "INSERT INTO answers(question_id, user_id, body, date) VALUES (?1, ?2, ?3, ?4)",
        params![question_id, user_id, body, on.to_string()],
    )?;
    let id = sql.last_insert_rowid();
    ledger::award_badge(&sql, user_id, "first_answer")?;
    let a = answer_by_id(&sql, id)?;
    sql.commit()?;
    Ok(a)
}

/// Rate an answer (asker only, once per answer) and pay the answerer the
/// rating-derived reward.
pub fn rate_answer(
    conn: &mut Connection,
    rater: &str,
    answer_id: i64,
    rating: u8,
    on: NaiveDate,
) -> Result<Transaction> {
    if !(1..=5).contains(&rating) {
        return Err(QaError::InvalidRating(rating).into());
    }
    let sql = conn.transaction()?;
    let rater_id = crate::utils::id_for_user(&sql, rater)?;
    let a = answer_by_id(&sql, answer_id)?;
    let q = question(&sql, a.question_id)?;
    if q.user_id != rater_id {
        return Err(QaError::NotQuestionAuthor.into());
    }
    if a.rating.is_some() {
        return Err(QaError::AlreadyRated(answer_id).into());
    }
    sql.execute(
        "UPDATE answers SET rating=?1 WHERE id=?2",
        params![rating, answer_id],
    )?;
    let answerer = username_for(&sql, a.user_id)?;
    let amount = rewards::answer_reward(rating, false, on);
    let tx = ledger::earn_in(
        &sql,
        &answerer,
        amount,
        &format!("Answer rated {}/5", rating),
        Category::Answer,
        Some(a.question_id),
        Some(rating),
        on,
    )?;
    sql.commit()?;
    Ok(tx)
}

/// Select the best answer. Only the question's author may do this, once per
/// question. The answerer receives the best-answer reward plus the bounty.
pub fn mark_best(
    conn: &mut Connection,
    username: &str,
    answer_id: i64,
    on: NaiveDate,
) -> Result<Vec<Transaction>> {
    let sql = conn.transaction()?;
    let user_id = crate::utils::id_for_user(&sql, username)?;
    let a = answer_by_id(&sql, answer_id)?;
    let q = question(&sql, a.question_id)?;
    if q.user_id != user_id {
        return Err(QaError::NotQuestionAuthor.into());
    }
    if q.best_answer_id.is_some() {
        return Err(QaError::BestAnswerAlreadyChosen(q.id).into());
    }
    sql.execute("UPDATE answers SET is_best=1 WHERE id=?1", params![answer_id])?;
    sql.execute(
        "UPDATE questions SET best_answer_id=?1, status='answered' WHERE id=?2",
        params![answer_id, q.id],
    )?;
    let answerer = username_for(&sql, a.user_id)?;
    let rating = a.rating.unwrap_or(0);
    let amount = rewards::answer_reward(rating, true, on);
    let mut paid = vec![ledger::earn_in(
        &sql,
        &answerer,
        amount,
        "Best answer",
        Category::Answer,
        Some(q.id),
        a.rating,
        on,
    )?];
    if q.bounty > 0 {
        paid.push(ledger::earn_in(
            &sql,
            &answerer,
            q.bounty,
            "Question bounty",
            Category::Answer,
            Some(q.id),
            None,
            on,
        )?);
    }
    ledger::award_badge(&sql, a.user_id, "best_answer")?;
    sql.commit()?;
    Ok(paid)
}

/// Community vote on an answer. Tallies only; no coin effect.
pub fn vote(conn: &Connection, answer_id: i64, up: bool) -> Result<Answer> {
    let col = if up { "upvotes" } else { "downvotes" };
    let n = conn.execute(
        &format!("UPDATE answers SET {col}={col}+1 WHERE id=?1"),
        params![answer_id],
    )?;
    if n == 0 {
        return Err(QaError::AnswerNotFound(answer_id).into());
    }
    answer_by_id(conn, answer_id)
}

pub fn question(conn: &Connection, id: i64) -> Result<Question> {
    let row: Option<(i64, i64, String, String, String, i64, String, Option<i64>, String)> = conn
        .query_row(
            "SELECT id, user_id, title, body, qtype, bounty, status, best_answer_id, date
             FROM questions WHERE id=?1",
            params![id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                    r.get(7)?,
                    r.get(8)?,
                ))
            },
        )
        .optional()?;
    let Some((id, user_id, title, body, qtype, bounty, status, best_answer_id, date)) = row else {
        return Err(QaError::QuestionNotFound(id).into());
    };
    Ok(Question {
        id,
        user_id,
        title,
        body,
        qtype: QuestionType::parse_lossy(&qtype).0,
        bounty,
        status,
        best_answer_id,
        date: parse_date(&date)?,
    })
}

pub fn answer_by_id(conn: &Connection, id: i64) -> Result<Answer> {
    let row: Option<(i64, i64, i64, String, Option<u8>, i64, i64, i64, String)> = conn
        .query_row(
            "SELECT id, question_id, user_id, body, rating, is_best, upvotes, downvotes, date
             FROM answers WHERE id=?1",
            params![id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                    r.get(7)?,
                    r.get(8)?,
                ))
            },
        )
        .optional()?;
    let Some((id, question_id, user_id, body, rating, is_best, upvotes, downvotes, date)) = row
    else {
        return Err(QaError::AnswerNotFound(id).into());
    };
    Ok(Answer {
        id,
        question_id,
        user_id,
        body,
        rating,
        is_best: is_best != 0,
        upvotes,
        downvotes,
        date: parse_date(&date)?,
    })
}

pub fn answers_for(conn: &Connection, question_id: i64) -> Result<Vec<Answer>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM answers WHERE question_id=?1 ORDER BY is_best DESC, upvotes-downvotes DESC, id",
    )?;
    let ids = stmt.query_map(params![question_id], |r| r.get::<_, i64>(0))?;
    let mut out = Vec::new();
    for id in ids {
        out.push(answer_by_id(conn, id?)?);
    }
    Ok(out)
}

pub fn open_questions(conn: &Connection, limit: Option<usize>) -> Result<Vec<Question>> {
    let mut sql =
        String::from("SELECT id FROM questions WHERE status='open' ORDER BY date DESC, id DESC");
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let mut stmt = conn.prepare(&sql)?;
    let ids = stmt.query_map([], |r| r.get::<_, i64>(0))?;
    let mut out = Vec::new();
    for id in ids {
        out.push(question(conn, id?)?);
    }
    Ok(out)
}

fn username_for(conn: &Connection, user_id: i64) -> Result<String> {
    let name: String = conn.query_row(
        "SELECT username FROM users WHERE id=?1",
        params![user_id],
        |r| r.get(0),
    )?;
    Ok(name)
}

/// Count of answers a user has posted; used by the advisor heuristics.
pub fn answer_count(conn: &Connection, user_id: i64) -> Result<i64> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM answers WHERE user_id=?1",
        params![user_id],
        |r| r.get(0),
    )?;
    Ok(n)
}

/// Open questions the given user did not ask (candidates to answer).
pub fn answerable_count(conn: &Connection, user_id: i64) -> Result<i64> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM questions WHERE status='open' AND user_id<>?1",
        params![user_id],
        |r| r.get(0),
    )?;
    Ok(n)
}
