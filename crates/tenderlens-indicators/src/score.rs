//! Hit/test accumulator shared by the completeness rules.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RatioScore {
    tests: u32,
    hits: u32,
}

impl RatioScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test(&mut self, passed: bool) -> &mut Self {
        self.tests += 1;
        if passed {
            self.hits += 1;
        }
        self
    }

    pub fn tests(&self) -> u32 {
        self.tests
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// `100 * hits / tests`, or 0 when nothing was tested.
    pub fn ratio(&self) -> f64 {
        if self.tests == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.hits) / f64::from(self.tests)
    }
}
