use crate::context::FusionContext;
use crate::engine::{FusionError, FusionPlugin};
use tenderlens_core::Observation;

/// Takes the value from the most recent observation that has one.
pub struct LatestValue<O, R, T> {
    name: &'static str,
    extract: fn(&O) -> Option<T>,
    assign: fn(&mut R, T),
}

impl<O, R, T> LatestValue<O, R, T> {
    pub fn new(name: &'static str, extract: fn(&O) -> Option<T>, assign: fn(&mut R, T)) -> Self {
        Self {
            name,
            extract,
            assign,
        }
    }
}

impl<O, R, T> FusionPlugin<O, R> for LatestValue<O, R, T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fuse(
        &self,
        observations: &[Observation<O>],
        record: &mut R,
        _ctx: &FusionContext<'_>,
    ) -> Result<(), FusionError> {
        if let Some(value) = observations.iter().find_map(|o| (self.extract)(&o.fields)) {
            (self.assign)(record, value);
        }
        Ok(())
    }
}

/// Trimmed copy of a text value; blank text counts as absent.
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
