use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inquiry lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Responded,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Responded => "responded",
            InquiryStatus::Closed => "closed",
        }
    }

    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "responded" => InquiryStatus::Responded,
            "closed" => InquiryStatus::Closed,
            _ => InquiryStatus::Pending,
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in an inquiry's append-only response thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub message: String,
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_parse_defaults_to_pending() {
        assert_eq!(InquiryStatus::parse_lossy("Responded"), InquiryStatus::Responded);
        assert_eq!(InquiryStatus::parse_lossy("closed"), InquiryStatus::Closed);
        assert_eq!(InquiryStatus::parse_lossy("??"), InquiryStatus::Pending);
    }
}
