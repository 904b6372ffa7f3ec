use bevy::prelude::*;

/// One line of a dialog script: who says it, what they say, and which
/// portrait the presentation layer should show.
#[derive(Debug, Clone)]
pub struct DialogLine {
    pub speaker: &'static str,
    pub text: String,
    pub portrait: &'static str,
}

impl DialogLine {
    fn santa(text: impl Into<String>) -> Self {
        Self {
            speaker: "Santa",
            text: text.into(),
            portrait: "images/santa.png",
        }
    }
}

/// The scripts the quest machine can enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Intro,
    WrongObject,
    AfterMessage,
    Locked,
    AfterGift,
}

/// Builds the script for a dialog kind, greeting the player by name.
pub fn script(kind: DialogKind, player_name: &str) -> Vec<DialogLine> {
    match kind {
        DialogKind::Intro => vec![
            DialogLine::santa(format!(
                "Hohoho! Welcome, {player_name}! I'm so glad you're here."
            )),
            DialogLine::santa(
                "I have a special present for you. But first, I left you an important message.",
            ),
            DialogLine::santa("Find the letter on the table and read it before anything else!"),
        ],
        DialogKind::WrongObject => vec![DialogLine::santa(
            "Ah-ah! Don't open that present yet. Find the letter first, alright? Hohoho!",
        )],
        DialogKind::AfterMessage => vec![
            DialogLine::santa("Beautiful, isn't it? You've done wonderful things this year."),
            DialogLine::santa("Now you may open your main present. Look for the blue gift on the table!"),
        ],
        DialogKind::Locked => vec![DialogLine::santa(
            "Patience! Enjoy the party one step at a time. Finish the earlier errands first!",
        )],
        DialogKind::AfterGift => vec![
            DialogLine::santa("How was the present? I hope you liked it!"),
            DialogLine::santa("As a sweet ending, I'd like to show you something lovely."),
            DialogLine::santa("Go to the window seat to watch a special cinematic moment!"),
        ],
    }
}

/// HUD objective line for a quest step.
pub fn objective_text(step: u32) -> &'static str {
    match step {
        0 => "Listen to Santa",
        1 => "Find the letter on the table",
        2 => "Talk to Santa again",
        3 => "Open the blue gift on the table",
        4 => "Finish the conversation",
        5 => "Find the window seat and enter cinematic mode",
        _ => "Enjoy the evening",
    }
}

/// The dialog currently blocking input, if any.
#[derive(Resource, Default)]
pub struct ActiveDialog {
    lines: Vec<DialogLine>,
    index: usize,
    open: bool,
}

impl ActiveDialog {
    pub fn open(&mut self, lines: Vec<DialogLine>) {
        self.lines = lines;
        self.index = 0;
        self.open = !self.lines.is_empty();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Option<&DialogLine> {
        self.open.then(|| self.lines.get(self.index)).flatten()
    }

    /// Advances to the next line; returns true when the script finished and
    /// the dialog closed.
    pub fn advance(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.index += 1;
        if self.index >= self.lines.len() {
            self.open = false;
            self.lines.clear();
            self.index = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_lines_then_closes() {
        let mut dialog = ActiveDialog::default();
        dialog.open(script(DialogKind::Intro, "Alex"));
        assert!(dialog.is_open());
        assert!(dialog.current().unwrap().text.contains("Alex"));

        assert!(!dialog.advance());
        assert!(!dialog.advance());
        // Third advance consumes the last line.
        assert!(dialog.advance());
        assert!(!dialog.is_open());
        assert!(dialog.current().is_none());
    }

    #[test]
    fn every_step_has_an_objective() {
        for step in 0..8 {
            assert!(!objective_text(step).is_empty());
        }
    }
}
