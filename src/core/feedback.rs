//! Outgoing queue for cues, lessons and scene requests.

use super::events::{AudioCue, Chord, Lesson, SceneEvent};

/// Everything the simulation wants the outside world to hear about.
///
/// Reactions push into this during a tick; `drain` empties it afterwards.
/// Lesson counts are cumulative across drains, so "has the player been
/// taught to parry" can be answered at any point in the level.
#[derive(Debug, Default)]
pub struct Feedback {
    cues: Vec<AudioCue>,
    lessons: Vec<Lesson>,
    scene: Vec<SceneEvent>,
    seen: [u32; Lesson::ALL.len()],
    chord: Option<Chord>,
}

/// One frame worth of queued feedback.
#[derive(Debug, Default)]
pub struct Drained {
    pub cues: Vec<AudioCue>,
    pub lessons: Vec<(Lesson, u32)>,
    pub scene: Vec<SceneEvent>,
}

impl Feedback {
    pub fn cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }

    /// Switch the active chord, cueing only on an actual change.
    pub fn chord(&mut self, chord: Chord) {
        if self.chord != Some(chord) {
            self.chord = Some(chord);
            self.cues.push(AudioCue::Chord(chord));
        }
    }

    pub fn report(&mut self, lesson: Lesson) {
        self.seen[lesson.index()] += 1;
        self.lessons.push(lesson);
    }

    pub fn lessons_seen(&self, lesson: Lesson) -> u32 {
        self.seen[lesson.index()]
    }

    pub fn scene(&mut self, event: SceneEvent) {
        self.scene.push(event);
    }

    /// Queued cues, oldest first.
    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }

    pub fn scene_events(&self) -> &[SceneEvent] {
        &self.scene
    }

    pub fn drain(&mut self) -> Drained {
        let mut counts = [0u32; Lesson::ALL.len()];
        // Report running totals as they were at the time of each report.
        let base: Vec<u32> = Lesson::ALL
            .iter()
            .map(|l| {
                let queued = self.lessons.iter().filter(|q| *q == l).count() as u32;
                self.seen[l.index()] - queued
            })
            .collect();
        let lessons = self
            .lessons
            .drain(..)
            .map(|lesson| {
                counts[lesson.index()] += 1;
                (lesson, base[lesson.index()] + counts[lesson.index()])
            })
            .collect();
        Drained {
            cues: std::mem::take(&mut self.cues),
            lessons,
            scene: std::mem::take(&mut self.scene),
        }
    }
}
