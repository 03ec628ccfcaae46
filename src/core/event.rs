//! Events emitted by transitions.
//!
//! The simulation has no side effects of its own. Anything a driver may
//! want to react to (a sound, a screen shake, a particle burst) comes back
//! as a [`GameEvent`] next to the new state. Sound is further reduced to a
//! [`SoundCue`] that an [`AudioCapability`] owned by the driver may pass on
//! or swallow.

use serde::{Deserialize, Serialize};

use super::inventory::ItemKind;
use super::position::Position;
use super::tile::TileKind;
use crate::economy::ShopKind;
use crate::error::Rejection;

/// What hurt the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// Stepped into water.
    Drowning,
    /// Caught near a collapse.
    CaveIn,
}

/// Something that happened during a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Dirt was dug out.
    Dig {
        /// Dug cell.
        at: Position,
    },
    /// Rock was blasted.
    Explosion {
        /// Blasted cell.
        at: Position,
    },
    /// A mineral was collected.
    MineralFound {
        /// Mined cell.
        at: Position,
        /// Which mineral.
        mineral: TileKind,
        /// Score added.
        value: i64,
    },
    /// The player lost health.
    Damage {
        /// Health removed.
        amount: i32,
        /// Source of the damage.
        cause: DamageCause,
    },
    /// Health reached zero.
    GameOver,
    /// The elevator moved with the player.
    ElevatorRide {
        /// Carriage position after the ride.
        to: Position,
        /// Money charged.
        fare: i64,
    },
    /// The player walked into a shop door.
    ShopOpened {
        /// Which shop.
        kind: ShopKind,
    },
    /// A shop item was bought.
    Purchase {
        /// Item bought.
        item: ItemKind,
        /// Price paid.
        price: i64,
    },
    /// A mineral was sold.
    Sale {
        /// Item sold.
        item: ItemKind,
        /// Money received.
        value: i64,
    },
    /// Unstable ground collapsed.
    CaveIn {
        /// The collapsed cell.
        origin: Position,
    },
    /// An action was refused.
    Blocked {
        /// Why.
        reason: Rejection,
    },
}

impl GameEvent {
    /// The sound a driver would play for this event, if any.
    #[must_use]
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Dig { .. } => Some(SoundCue::Dig),
            GameEvent::Explosion { .. } => Some(SoundCue::Explosion),
            GameEvent::MineralFound { .. } | GameEvent::Sale { .. } => Some(SoundCue::Collect),
            GameEvent::Damage { .. } => Some(SoundCue::Hurt),
            GameEvent::GameOver => Some(SoundCue::GameOver),
            GameEvent::ElevatorRide { .. } => Some(SoundCue::Elevator),
            GameEvent::Purchase { .. } => Some(SoundCue::Purchase),
            GameEvent::CaveIn { .. } => Some(SoundCue::Rumble),
            GameEvent::Blocked { reason } if reason.is_logged() => Some(SoundCue::Blocked),
            GameEvent::ShopOpened { .. } | GameEvent::Blocked { .. } => None,
        }
    }
}

/// Abstract sound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Digging dirt.
    Dig,
    /// Picking up something valuable.
    Collect,
    /// Dynamite.
    Explosion,
    /// Taking damage.
    Hurt,
    /// Ground collapsing.
    Rumble,
    /// Elevator moving.
    Elevator,
    /// Buying from a shop.
    Purchase,
    /// Move refused.
    Blocked,
    /// End of the game.
    GameOver,
}

/// Parameters of a short synthesized tone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Oscillator frequency.
    pub frequency_hz: f32,
    /// Starting gain, decaying to silence.
    pub gain: f32,
    /// Length of the tone.
    pub duration_ms: u32,
}

impl SoundCue {
    /// Suggested tone for drivers that synthesize their audio.
    #[must_use]
    pub fn tone(self) -> Tone {
        let (frequency_hz, gain, duration_ms) = match self {
            SoundCue::Dig => (150.0, 0.1, 100),
            SoundCue::Collect => (440.0, 0.2, 100),
            SoundCue::Explosion => (60.0, 0.3, 300),
            SoundCue::Hurt => (220.0, 0.2, 150),
            SoundCue::Rumble => (45.0, 0.3, 500),
            SoundCue::Elevator => (330.0, 0.1, 200),
            SoundCue::Purchase => (660.0, 0.15, 100),
            SoundCue::Blocked => (110.0, 0.1, 80),
            SoundCue::GameOver => (98.0, 0.25, 800),
        };
        Tone {
            frequency_hz,
            gain,
            duration_ms,
        }
    }
}

/// Driver-owned switch deciding whether cues reach the speakers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioCapability {
    enabled: bool,
}

impl AudioCapability {
    /// Audio on.
    #[must_use]
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Audio off; every cue is dropped.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether cues pass through.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// The cues to play for a batch of events.
    pub fn cues(self, events: &[GameEvent]) -> impl Iterator<Item = SoundCue> + '_ {
        events
            .iter()
            .filter(move |_| self.enabled)
            .filter_map(GameEvent::sound_cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_tones() {
        let dig = SoundCue::Dig.tone();
        assert!((dig.frequency_hz - 150.0).abs() < f32::EPSILON);
        assert_eq!(dig.duration_ms, 100);

        let collect = SoundCue::Collect.tone();
        assert!((collect.frequency_hz - 440.0).abs() < f32::EPSILON);
        assert!((collect.gain - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_event_cues() {
        let at = Position::new(1, 1);
        assert_eq!(GameEvent::Dig { at }.sound_cue(), Some(SoundCue::Dig));
        assert_eq!(GameEvent::ShopOpened { kind: ShopKind::ToolShop }.sound_cue(), None);
        assert_eq!(
            GameEvent::Blocked { reason: Rejection::OutOfBounds }.sound_cue(),
            None
        );
        assert_eq!(
            GameEvent::Blocked { reason: Rejection::NeedPickaxe }.sound_cue(),
            Some(SoundCue::Blocked)
        );
    }

    #[test]
    fn test_audio_capability_filters() {
        let events = vec![
            GameEvent::Dig { at: Position::new(0, 0) },
            GameEvent::GameOver,
        ];

        let on: Vec<_> = AudioCapability::enabled().cues(&events).collect();
        assert_eq!(on, vec![SoundCue::Dig, SoundCue::GameOver]);

        assert_eq!(AudioCapability::disabled().cues(&events).count(), 0);
    }
}
