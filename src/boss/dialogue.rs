//! Intro dialogue playback.

use super::host::{present_sound, Presentation, PresentationSignal};

/// Lines spoken before the fight starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueScript {
    pub speaker: String,
    pub lines: Vec<String>,
    /// Seconds each line stays on screen.
    pub line_delay: f32,
    pub voice_sound: Option<String>,
}

impl DialogueScript {
    /// A script only plays if it has something to say.
    pub fn is_playable(&self) -> bool {
        !self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueProgress {
    Playing,
    Finished,
}

/// Walks a [`DialogueScript`] one line at a time.
#[derive(Debug, Clone)]
pub struct DialogueSequencer {
    script: DialogueScript,
    line: usize,
    elapsed: f32,
    finished: bool,
}

impl DialogueSequencer {
    /// Start playing: plays the voice clip and shows the first line.
    pub fn play<P: Presentation + ?Sized>(script: DialogueScript, presentation: &mut P) -> Self {
        let mut sequencer = Self {
            script,
            line: 0,
            elapsed: 0.0,
            finished: false,
        };

        present_sound(presentation, sequencer.script.voice_sound.as_deref());
        if sequencer.script.is_playable() {
            sequencer.show_current(presentation);
        } else {
            sequencer.finish(presentation);
        }

        sequencer
    }

    pub fn current_line(&self) -> Option<&str> {
        if self.finished {
            return None;
        }
        self.script.lines.get(self.line).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn advance<P: Presentation + ?Sized>(&mut self, dt: f32, presentation: &mut P) -> DialogueProgress {
        if self.finished {
            return DialogueProgress::Finished;
        }

        self.elapsed += dt;
        let delay = self.script.line_delay.max(0.0);

        while !self.finished && self.elapsed >= delay {
            self.elapsed -= delay;
            self.line += 1;

            if self.line >= self.script.lines.len() {
                self.finish(presentation);
            } else {
                self.show_current(presentation);
            }
        }

        if self.finished {
            DialogueProgress::Finished
        } else {
            DialogueProgress::Playing
        }
    }

    /// Stop early, hiding whatever is on screen.
    pub fn abort<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        if !self.finished {
            self.finish(presentation);
        }
    }

    fn show_current<P: Presentation + ?Sized>(&self, presentation: &mut P) {
        let text = &self.script.lines[self.line];
        bevy::log::debug!("[{}]: {}", self.script.speaker, text);
        presentation.present(PresentationSignal::ShowDialogueLine {
            speaker: self.script.speaker.clone(),
            text: text.clone(),
        });
    }

    fn finish<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        self.finished = true;
        presentation.present(PresentationSignal::HideDialogue);
    }
}
