#![no_std]

extern crate alloc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use collection::*;
pub use error::*;
pub use level::*;
pub use sampler::*;
pub use types::*;

mod board;
mod cell;
mod collection;
mod error;
mod level;
mod sampler;
mod types;

bitflags! {
    /// What a single command caused. Only the command that produced a board sets these.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Events: u8 {
        const OPENED       = 1;
        const FLAG_TOGGLED = 1 << 1;
        const FIRST_OPEN   = 1 << 2;
        const GAME_OVER    = 1 << 3;
        const GAME_CLEAR   = 1 << 4;
        const REJECTED     = 1 << 5;
    }
}

/// Feedback sound for the audio layer, one per completed command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Click,
    Error,
    Success,
    Explosion,
    Flag,
}

impl Events {
    pub fn sound_cue(self) -> Option<SoundCue> {
        use SoundCue::*;

        if self.contains(Self::GAME_OVER) {
            Some(Explosion)
        } else if self.contains(Self::REJECTED) {
            Some(Error)
        } else if self.contains(Self::GAME_CLEAR) {
            Some(Success)
        } else if self.contains(Self::FLAG_TOGGLED) {
            Some(Flag)
        } else if self.contains(Self::OPENED) {
            Some(Click)
        } else {
            None
        }
    }
}
