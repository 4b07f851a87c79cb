use chrono::{DateTime, Utc};

/// The group conversation a message came from and replies go back to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Conversation {
    pub group_openid: String,
}

impl Conversation {
    pub fn group(openid: impl Into<String>) -> Self {
        Self {
            group_openid: openid.into(),
        }
    }
}

/// Represents an incoming group message that mentioned the bot
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub text: String,
    pub conversation: Conversation,
    pub author: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(conversation: Conversation, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            conversation,
            author: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Events the platform delivers for groups the bot is a member of
#[derive(Debug, Clone)]
pub enum GroupEvent {
    AtMessage(InboundMessage),
    RobotAdded { group_openid: String },
    RobotRemoved { group_openid: String },
}

/// Kind of rich media that can be uploaded for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Voice,
    File,
}

impl MediaKind {
    /// Numeric `file_type` used by the platform upload API
    pub fn file_type(&self) -> u8 {
        match self {
            MediaKind::Image => 1,
            MediaKind::Video => 2,
            MediaKind::Voice => 3,
            MediaKind::File => 4,
        }
    }
}

/// Handle to an uploaded media file, attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub file_info: String,
    pub file_uuid: Option<String>,
    pub ttl: Option<u64>,
}

impl Media {
    pub fn new(file_info: impl Into<String>) -> Self {
        Self {
            file_info: file_info.into(),
            file_uuid: None,
            ttl: None,
        }
    }
}
