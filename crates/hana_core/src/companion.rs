//! Hana's canned lines.

/// Messages Hana cycles through in her speech bubble.
pub const HANA_MESSAGES: &[&str] = &[
    "A poem is a whisper from the soul...",
    "Even silence has rhythm — listen closely.",
    "Every line you write is a flower blooming.",
    "Let your thoughts dance on paper ✨",
    "Hana believes your words hold magic.",
    "Dreams rhyme better when shared 🌙",
    "What verse will the wind bring today?",
    "In every pause... a poem hides.",
];

/// Deterministic walk over `HANA_MESSAGES`.
#[derive(Debug, Clone)]
pub struct MessageRotation {
    next: usize,
}

impl MessageRotation {
    /// Starts at `start` (wrapped to the message count).
    pub fn starting_at(start: usize) -> Self {
        Self {
            next: start % HANA_MESSAGES.len(),
        }
    }

    pub fn next_message(&mut self) -> &'static str {
        let message = HANA_MESSAGES[self.next];
        self.next = (self.next + 1) % HANA_MESSAGES.len();
        message
    }
}

impl Default for MessageRotation {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl Iterator for MessageRotation {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_message())
    }
}

/// Line Hana says after a successful submission.
pub fn praise_line(author: &str, score: u8) -> String {
    format!("That was lovely, {author}! You got {score} out of 100!")
}
