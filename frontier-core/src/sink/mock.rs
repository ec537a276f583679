use super::{ConsoleLine, ProgressEvent, Tone, UiSink};
use std::{collections::VecDeque, path::PathBuf, sync::Mutex};

/// Records everything sent to it and answers prompts from scripted queues.
/// Unscripted confirmations are declined and unscripted path prompts
/// return `None`.
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Mutex<Vec<ConsoleLine>>,
    pub progress: Mutex<Vec<ProgressEvent>>,
    pub prompts: Mutex<Vec<String>>,
    pub confirm_answers: Mutex<VecDeque<bool>>,
    pub path_answers: Mutex<VecDeque<Option<PathBuf>>>,
}

impl RecordingSink {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            confirm_answers: Mutex::new(answers.iter().copied().collect()),
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|line| line.text.clone())
            .collect()
    }

    pub fn has_line(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    pub fn tone_of(&self, needle: &str) -> Option<Tone> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .find(|line| line.text.contains(needle))
            .map(|line| line.tone)
    }

    pub fn prompt_titles(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl UiSink for RecordingSink {
    fn console(&self, line: ConsoleLine) {
        self.lines.lock().unwrap().push(line);
    }

    fn progress(&self, event: ProgressEvent) {
        self.progress.lock().unwrap().push(event);
    }

    fn confirm(&self, title: &str, _message: &str) -> bool {
        self.prompts.lock().unwrap().push(title.to_string());
        self.confirm_answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(false)
    }

    fn ask_path(&self, title: &str, _message: &str) -> Option<PathBuf> {
        self.prompts.lock().unwrap().push(title.to_string());
        self.path_answers.lock().unwrap().pop_front().flatten()
    }
}
