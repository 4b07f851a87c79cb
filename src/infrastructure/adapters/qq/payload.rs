//! Decoding of gateway dispatch payloads
//!
//! A gateway relay forwards dispatch frames (`op` 0) as one JSON object per
//! line. Only the group events the bot reacts to are decoded; everything else
//! is skipped.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::application::errors::BotError;
use crate::domain::entities::{Conversation, GroupEvent, InboundMessage};

const OP_DISPATCH: u8 = 0;

#[derive(Deserialize, Debug)]
struct Frame {
    #[serde(default)]
    op: u8,
    #[serde(default)]
    t: Option<String>,
    #[serde(default)]
    d: Value,
}

#[derive(Deserialize, Debug)]
struct GroupAtMessage {
    id: String,
    #[serde(default)]
    content: String,
    group_openid: String,
    #[serde(default)]
    author: Option<Author>,
    #[serde(default)]
    timestamp: Value,
}

#[derive(Deserialize, Debug)]
struct Author {
    #[serde(default)]
    member_openid: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GroupRobotEvent {
    group_openid: String,
}

/// Decode one dispatch frame. `Ok(None)` means the frame is valid but not
/// something the bot handles.
pub fn decode(raw: &str) -> Result<Option<GroupEvent>, BotError> {
    let frame: Frame = serde_json::from_str(raw).map_err(|e| BotError::Parse(e.to_string()))?;
    if frame.op != OP_DISPATCH {
        return Ok(None);
    }

    let parse = |e: serde_json::Error| BotError::Parse(e.to_string());
    let event = match frame.t.as_deref() {
        Some("GROUP_AT_MESSAGE_CREATE") => {
            let d: GroupAtMessage = serde_json::from_value(frame.d).map_err(parse)?;
            let mut message = InboundMessage::new(Conversation::group(d.group_openid), d.content).with_id(d.id);
            if let Some(author) = d.author.and_then(|a| a.member_openid) {
                message = message.with_author(author);
            }
            if let Some(timestamp) = parse_timestamp(&d.timestamp) {
                message = message.with_timestamp(timestamp);
            }
            GroupEvent::AtMessage(message)
        }
        Some("GROUP_ADD_ROBOT") => {
            let d: GroupRobotEvent = serde_json::from_value(frame.d).map_err(parse)?;
            GroupEvent::RobotAdded {
                group_openid: d.group_openid,
            }
        }
        Some("GROUP_DEL_ROBOT") => {
            let d: GroupRobotEvent = serde_json::from_value(frame.d).map_err(parse)?;
            GroupEvent::RobotRemoved {
                group_openid: d.group_openid,
            }
        }
        _ => return Ok(None),
    };

    Ok(Some(event))
}

/// Line decoder for the stdin feed; bad frames are logged and dropped.
pub fn decode_line(line: &str) -> Option<GroupEvent> {
    match decode(line) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping undecodable event: {}", e);
            None
        }
    }
}

/// RFC 3339 strings or unix seconds, as the gateway sends both
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc))
            .or_else(|| s.parse::<i64>().ok().and_then(|secs| Utc.timestamp_opt(secs, 0).single())),
        Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}
