/// Something the host should react to after the timers tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The sound timer just counted down from 1 to 0; any tone should stop.
    SoundStopped,
}

/// # Timers
/// Two 8-bit timers (delay & sound).
/// - both count down by one per tick and stop at 0
/// - ticks are meant to happen at `TIMER_HZ`, whatever the CPU is doing
/// - a tone plays for as long as the sound timer is above 0
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TimerPair {
    pub delay: u8,
    pub sound: u8,
}

impl TimerPair {
    pub fn new() -> Self {
        TimerPair { delay: 0, sound: 0 }
    }

    pub fn tick(&mut self) -> Option<TimerEvent> {
        self.delay = self.delay.saturating_sub(1);
        match self.sound {
            0 => None,
            1 => {
                self.sound = 0;
                Some(TimerEvent::SoundStopped)
            }
            _ => {
                self.sound -= 1;
                None
            }
        }
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
