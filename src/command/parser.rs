//! Tokenizer and field extraction for the free-text command surface
//!
//! Pure functions over token slices. The only fixed state is the pair
//! of accepted date patterns: `yyyy-M-d [Hmm]` and `d/M/yyyy [Hmm]`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::error::{CommandError, Result};
use crate::storage::FIELD_SEP;

/// Markers a plain todo must not contain. The bare `to` (no slash) is
/// part of the historical reserved set and stays rejected.
const TODO_RESERVED: [&str; 3] = ["/by", "/from", "to"];

/// Trims the input and splits on single spaces. No quoting, no escaping.
pub fn tokenize(input: &str) -> Vec<String> {
    input.trim().split(' ').map(str::to_string).collect()
}

/// Extracts the content of a `todo` command from its tokens.
pub fn parse_todo(tokens: &[String]) -> Result<String> {
    let mut content = Vec::new();
    for token in tokens.iter().skip(1) {
        if TODO_RESERVED.contains(&token.as_str()) {
            return Err(CommandError::TodoFormat);
        }
        content.push(token.as_str());
    }
    let content = content.join(" ").trim().to_string();
    if content.is_empty() {
        return Err(CommandError::TodoFormat);
    }
    check_content(&content)?;
    Ok(content)
}

/// Content may not contain the stored-field separator: a record holding
/// it would read back with the wrong field count.
fn check_content(content: &str) -> Result<()> {
    if content.contains(FIELD_SEP) {
        return Err(CommandError::SeparatorInContent);
    }
    Ok(())
}

/// Splits `deadline` tokens around the `/by` marker into
/// `(content, raw due date)`.
pub fn parse_deadline(tokens: &[String]) -> Result<(String, String)> {
    let mut content = Vec::new();
    let mut due = Vec::new();
    let mut seen_by = false;
    for token in tokens.iter().skip(1) {
        match token.as_str() {
            "/from" | "/to" => return Err(CommandError::DeadlineFormat),
            "/by" if !seen_by => seen_by = true,
            _ => {
                if seen_by {
                    due.push(token.as_str());
                } else {
                    content.push(token.as_str());
                }
            }
        }
    }
    let content = content.join(" ").trim().to_string();
    let due = due.join(" ").trim().to_string();
    if content.is_empty() || due.is_empty() {
        return Err(CommandError::DeadlineFormat);
    }
    check_content(&content)?;
    Ok((content, due))
}

/// Splits `event` tokens around `/from` then `/to` into
/// `(content, raw start, raw end)`. The markers must appear in that
/// order, once each.
pub fn parse_event(tokens: &[String]) -> Result<(String, String, String)> {
    let mut fields: [Vec<&str>; 3] = Default::default();
    let mut slot = 0;
    for token in tokens.iter().skip(1) {
        match token.as_str() {
            "/by" => return Err(CommandError::EventFormat),
            "/from" => {
                if slot != 0 {
                    return Err(CommandError::EventFormat);
                }
                slot = 1;
            }
            "/to" => {
                if slot != 1 {
                    return Err(CommandError::EventFormat);
                }
                slot = 2;
            }
            _ => fields[slot].push(token.as_str()),
        }
    }
    let [content, start, end] = fields.map(|field| field.join(" ").trim().to_string());
    if content.is_empty() || start.is_empty() || end.is_empty() {
        return Err(CommandError::EventFormat);
    }
    check_content(&content)?;
    Ok((content, start, end))
}

/// Parses a date-time in either accepted pattern. A hyphen in the date
/// portion selects `yyyy-M-d`, otherwise `d/M/yyyy`. A missing time
/// component defaults to 23:59.
pub fn parse_date_time(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    let bad = || CommandError::UnsupportedDateTime(raw.to_string());

    let (date_part, time_part) = match raw.split_once(' ') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (raw, None),
    };

    let pattern = if date_part.contains('-') {
        "%Y-%m-%d"
    } else {
        "%d/%m/%Y"
    };
    let date = NaiveDate::parse_from_str(date_part, pattern).map_err(|_| bad())?;

    let time = match time_part {
        None => NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        Some(clock) => parse_clock(clock).ok_or_else(bad)?,
    };

    Ok(date.and_time(time))
}

/// Parses a 3- or 4-digit clock token such as `1800` or `800`.
fn parse_clock(clock: &str) -> Option<NaiveTime> {
    if !(clock.len() == 3 || clock.len() == 4) || !clock.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{:0>4}", clock);
    NaiveTime::parse_from_str(&padded, "%H%M").ok()
}

/// Joins the tokens after `<command> <index> <selector>` into the
/// replacement text for an edit.
pub fn parse_update_text(tokens: &[String]) -> String {
    tokens
        .iter()
        .skip(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Parses the tokens after `<command> <index> <selector>` as a date-time.
/// A missing argument gets its own message instead of being reported as
/// an unreadable empty date.
pub fn parse_update_date(tokens: &[String]) -> Result<NaiveDateTime> {
    let raw = parse_update_text(tokens);
    if raw.is_empty() {
        return Err(CommandError::EmptyDate);
    }
    parse_date_time(&raw)
}

/// Extracts the search word of a `find` command. The phrase is limited
/// to a single word; anything else is a format error.
pub fn parse_find(tokens: &[String]) -> Result<String> {
    match tokens {
        [_, word] if !word.is_empty() => Ok(word.clone()),
        _ => Err(CommandError::FindFormat),
    }
}
