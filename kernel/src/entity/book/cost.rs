use vodca::{AsRefln, Fromln};

use crate::entity::{Field, FieldError, FieldViolation};

/// Price in US dollars, kept with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Fromln, AsRefln)]
pub struct BookCost(f64);

impl BookCost {
    pub fn new(cost: impl Into<f64>) -> Self {
        Self(cost.into())
    }

    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let error = |violation| FieldError::new(Field::Cost, violation);
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(error(FieldViolation::Empty));
        }
        let cost = raw
            .parse::<f64>()
            .ok()
            .filter(|cost| cost.is_finite())
            .ok_or_else(|| error(FieldViolation::NotNumber))?;
        if cost < 0.0 {
            return Err(error(FieldViolation::Negative));
        }
        // halves go to the even cent; magnitudes whose cents overflow have none
        let cents = cost * 100.0;
        let rounded = if cents.is_finite() {
            cents.round_ties_even() / 100.0
        } else {
            cost
        };
        // adding zero folds "-0" into 0
        Ok(Self(rounded + 0.0))
    }
}
