use anyhow::{Result, bail};

/// Issues unique, strictly increasing ids derived from creation time
///
/// An id is the creation time in milliseconds rendered as a decimal string. When the clock has
/// not moved past the last issued id (two entries in the same millisecond, or a clock step
/// backwards) the id is bumped to `last + 1`, so ordering and uniqueness hold regardless.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_issued: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an existing id into account so later ids sort after it
    ///
    /// Ids that are not decimal numbers are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            self.last_issued = Some(self.last_issued.map_or(value, |last| last.max(value)));
        }
    }

    /// Issue the next id for an entry created at `now_millis`
    ///
    /// Fails without issuing anything when the last id is already `i64::MAX`.
    pub fn next_id(&mut self, now_millis: i64) -> Result<String> {
        let value = match self.last_issued {
            Some(last) if now_millis <= last => match last.checked_add(1) {
                Some(next) => next,
                None => bail!("No id left after {}; clear the history to continue", last),
            },
            _ => now_millis,
        };
        self.last_issued = Some(value);
        Ok(value.to_string())
    }
}
