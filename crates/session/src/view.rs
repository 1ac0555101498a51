use domain::has_hazard;

/// Per-render reveal state for hazard-tagged content. Lives only as long as
/// the render instance that owns it and is never written back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealGate {
    censored: bool,
    revealed: bool,
}

impl RevealGate {
    pub fn for_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        Self {
            censored: has_hazard(tags),
            revealed: false,
        }
    }

    pub fn obscured(&self) -> bool {
        self.censored && !self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }
}
