/// Ticks a fully typed phrase stays on screen before erasing starts.
pub const HOLD_TICKS: u32 = 120;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding { ticks_left: u32 },
    Erasing,
}

/// Looping type-hold-erase effect over a phrase list, one char per tick.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    shown: usize,
    phase: Phase,
}

impl TypingEffect {
    /// Empty phrase entries are dropped; an empty list types nothing.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|s| s.as_ref().chars().collect::<Vec<char>>())
                .filter(|p| !p.is_empty())
                .collect(),
            phrase: 0,
            shown: 0,
            phase: Phase::Typing,
        }
    }

    pub fn visible(&self) -> String {
        match self.phrases.get(self.phrase) {
            Some(p) => p[..self.shown].iter().collect(),
            None => String::new(),
        }
    }

    /// Advance one tick and return the text to display.
    pub fn tick(&mut self) -> String {
        if self.phrases.is_empty() {
            return String::new();
        }

        let len = self.phrases[self.phrase].len();
        match self.phase {
            Phase::Typing => {
                self.shown += 1;
                if self.shown >= len {
                    self.shown = len;
                    self.phase = Phase::Holding {
                        ticks_left: HOLD_TICKS,
                    };
                }
            }
            Phase::Holding { ticks_left } => {
                if ticks_left == 0 {
                    self.phase = Phase::Erasing;
                } else {
                    self.phase = Phase::Holding {
                        ticks_left: ticks_left - 1,
                    };
                }
            }
            Phase::Erasing => {
                if self.shown > 0 {
                    self.shown -= 1;
                }
                if self.shown == 0 {
                    self.phrase = (self.phrase + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                }
            }
        }

        self.visible()
    }
}

#[cfg(test)]
mod tests {
    use super::{HOLD_TICKS, TypingEffect};

    #[test]
    fn types_one_char_per_tick() {
        let mut fx = TypingEffect::new(&["hi"]);
        assert_eq!(fx.tick(), "h");
        assert_eq!(fx.tick(), "hi");
    }

    #[test]
    fn holds_then_erases_then_loops() {
        let mut fx = TypingEffect::new(&["ab", "c"]);
        fx.tick();
        fx.tick(); // "ab" fully typed
        for _ in 0..=HOLD_TICKS {
            assert_eq!(fx.tick().is_empty(), false);
        }
        // Erasing down to empty, then the next phrase starts.
        assert_eq!(fx.tick(), "a");
        assert_eq!(fx.tick(), "");
        assert_eq!(fx.tick(), "c");
    }

    #[test]
    fn multibyte_phrases_never_split_chars() {
        let mut fx = TypingEffect::new(&["héllo"]);
        fx.tick();
        assert_eq!(fx.tick(), "hé");
    }

    #[test]
    fn empty_list_stays_empty() {
        let mut fx = TypingEffect::new::<&str>(&[]);
        assert_eq!(fx.tick(), "");
    }
}
