//! Fire-and-forget events the combat core raises for the rest of the game.
//!
//! The simulation never talks to audio, the tutorial overlay or the scene
//! flow directly. It queues these values in [`Feedback`](super::Feedback) and
//! a system republishes them as Bevy events once per frame.

use bevy::prelude::*;

/// Chords the soundtrack switches between as the fight develops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chord {
    G,
    Em7,
    Gm,
    Bm,
}

/// Short sound cues.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Landing on solid ground.
    Footstep,
    Jump,
    /// Played every time the walk or advance animation loops.
    WalkStep,
    /// A player attack connected with at least one enemy this frame.
    HitLanded,
    /// The player parried an enemy lunge.
    Parry,
    /// A coin was collected.
    Pickup,
    /// Single pluck of the active chord.
    Pluck,
    /// Gate celebration arpeggio.
    Fanfare,
    /// The active chord changed.
    Chord(Chord),
}

/// Tutorial lessons, reported each time the player demonstrates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lesson {
    Move,
    Lunge,
    Parry,
    Garde,
    Exit,
}

impl Lesson {
    pub const ALL: [Lesson; 5] = [
        Lesson::Move,
        Lesson::Lunge,
        Lesson::Parry,
        Lesson::Garde,
        Lesson::Exit,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sent whenever a lesson is reported.
#[derive(Event, Debug, Clone, Copy)]
pub struct LessonEvent {
    pub lesson: Lesson,
    /// How many times this lesson has been reported, including this one.
    pub count: u32,
}

/// Scene lifecycle requests. Never awaited.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The player ran out of health or fell off the world.
    Death,
    /// The player walked through the open gate.
    Complete,
}
