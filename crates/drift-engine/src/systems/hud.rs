//! Text lines shown over the canvas.
//!
//! The panel only stores strings; the page owns the DOM regions. Each
//! [`publish`](HudPanel::publish) bumps a revision counter, and the page
//! redraws only when it sees a new revision.

#[derive(Debug, Clone)]
pub struct HudPanel {
    lines: Vec<String>,
    revision: u32,
}

impl HudPanel {
    /// A panel with `slots` empty lines.
    pub fn new(slots: usize) -> Self {
        Self {
            lines: vec![String::new(); slots],
            revision: 0,
        }
    }

    /// Replace the lines, in slot order. Extra lines are dropped, missing
    /// ones are left as they were.
    pub fn publish<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut written = 0;
        for (slot, line) in self.lines.iter_mut().zip(lines) {
            *slot = line;
            written += 1;
        }
        if written < self.lines.len() {
            log::warn!("hud: published {} of {} lines", written, self.lines.len());
        }
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn line(&self, slot: usize) -> Option<&str> {
        self.lines.get(slot).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn slot_count(&self) -> usize {
        self.lines.len()
    }

    /// Incremented once per publish.
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

impl Default for HudPanel {
    fn default() -> Self {
        Self::new(3)
    }
}
