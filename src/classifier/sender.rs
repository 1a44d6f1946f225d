use tracing::warn;

use crate::sms::RawMessage;

/// Sender-ID fragments for HDFC Bank and Axis Bank short codes.
pub const DEFAULT_SENDER_FRAGMENTS: [&str; 4] = ["HDFCBK", "HDFCBN", "AXISBK", "AXISBN"];

/// Accepts messages whose sender contains a known bank fragment.
///
/// Fragments are stored upper-cased and never empty, so a message with an
/// empty sender is always rejected.
#[derive(Debug, Clone)]
pub struct SenderClassifier {
    fragments: Vec<String>,
}

impl SenderClassifier {
    /// Builds a classifier from configured fragments.
    ///
    /// Fragments are trimmed and upper-cased. Blank fragments would match
    /// every sender, so they are dropped.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for fragment in fragments {
            let fragment = normalize(fragment.as_ref().trim());
            if fragment.is_empty() {
                warn!("Ignoring blank sender fragment");
                continue;
            }
            if !normalized.contains(&fragment) {
                normalized.push(fragment);
            }
        }
        Self {
            fragments: normalized,
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Returns true when the message's sender contains a configured fragment.
    pub fn classify(&self, msg: &RawMessage) -> bool {
        self.matches_sender(&msg.sender)
    }

    pub fn matches_sender(&self, sender: &str) -> bool {
        if sender.is_empty() {
            return false;
        }
        let sender = normalize(sender);
        self.fragments.iter().any(|f| sender.contains(f.as_str()))
    }
}

impl Default for SenderClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SENDER_FRAGMENTS)
    }
}

fn normalize(s: &str) -> String {
    s.to_uppercase()
}
