//! # Hunt Star Score
//!
//! The daily activity score is a weighted count of coincidences between sun
//! and moon events. Each [`Rule`] tests one candidate clock time against one
//! window; the score is the sum of the weights of the rules that match.
//!
//! Major coincidences (sun ±1h inside a meridian window) weigh 3, minor ones
//! (sun ±1h inside a moonrise/moonset window) weigh 2, moon events landing in
//! any moon window weigh 0.5, and a nearly new moon adds another 0.5.
//!
//! A rule whose candidate or window is absent is skipped: it contributes
//! nothing and is not a failure. There is no cap and no normalisation.

use crate::clock::{is_between, ClockTime};
use crate::windows::{DerivedWindows, Window};
use crate::RawEvents;

use self::Candidate as C;
use self::Target as T;

/// The clock time a rule tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Candidate {
    HourBeforeSunrise,
    HourAfterSunrise,
    HourBeforeSunset,
    HourAfterSunset,
    Moonrise,
    Moonset,
}

/// The window a candidate is tested against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Meridian,
    OppositeMeridian,
    Moonrise,
    Moonset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// `candidate` falls inside the `target` window
    Overlap {
        candidate: Candidate,
        target: Target,
        weight: f64,
    },
    /// Illumination percentage in `(min_exclusive, max_inclusive]`
    Illumination {
        min_exclusive: f64,
        max_inclusive: f64,
        weight: f64,
    },
}

/// Result of evaluating one rule for one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// An operand was absent
    Skipped,
    NoMatch,
    Match,
}

/// One day's inputs to the rule table.
#[derive(Clone, Copy, Debug)]
pub struct ScoreInputs<'a> {
    pub events: &'a RawEvents,
    pub windows: &'a DerivedWindows,
}

const fn overlap(candidate: Candidate, target: Target, weight: f64) -> Rule {
    Rule::Overlap {
        candidate,
        target,
        weight,
    }
}

/// The fixed rule table, in evaluation order.
pub static RULES: [Rule; 25] = [
    // sunrise, major
    overlap(C::HourBeforeSunrise, T::Meridian, 3.0),
    overlap(C::HourAfterSunrise, T::Meridian, 3.0),
    overlap(C::HourBeforeSunrise, T::OppositeMeridian, 3.0),
    overlap(C::HourAfterSunrise, T::OppositeMeridian, 3.0),
    // sunrise, minor
    overlap(C::HourBeforeSunrise, T::Moonrise, 2.0),
    overlap(C::HourAfterSunrise, T::Moonrise, 2.0),
    overlap(C::HourBeforeSunrise, T::Moonset, 2.0),
    overlap(C::HourAfterSunrise, T::Moonset, 2.0),
    // sunset, major
    overlap(C::HourBeforeSunset, T::Meridian, 3.0),
    overlap(C::HourAfterSunset, T::Meridian, 3.0),
    overlap(C::HourBeforeSunset, T::OppositeMeridian, 3.0),
    overlap(C::HourAfterSunset, T::OppositeMeridian, 3.0),
    // sunset, minor
    overlap(C::HourBeforeSunset, T::Moonrise, 2.0),
    overlap(C::HourAfterSunset, T::Moonrise, 2.0),
    overlap(C::HourBeforeSunset, T::Moonset, 2.0),
    overlap(C::HourAfterSunset, T::Moonset, 2.0),
    // moon events in major windows
    overlap(C::Moonrise, T::Meridian, 0.5),
    overlap(C::Moonset, T::Meridian, 0.5),
    overlap(C::Moonrise, T::OppositeMeridian, 0.5),
    overlap(C::Moonset, T::OppositeMeridian, 0.5),
    // moon events in minor windows
    overlap(C::Moonrise, T::Moonrise, 0.5),
    overlap(C::Moonset, T::Moonrise, 0.5),
    overlap(C::Moonrise, T::Moonset, 0.5),
    overlap(C::Moonset, T::Moonset, 0.5),
    // near new moon; compared on the 0-100 percentage scale
    Rule::Illumination {
        min_exclusive: 0.0,
        max_inclusive: 10.0,
        weight: 0.5,
    },
];

impl Candidate {
    pub fn resolve(self, inputs: &ScoreInputs<'_>) -> Option<ClockTime> {
        let w = inputs.windows;
        match self {
            C::HourBeforeSunrise => w.sunrise.map(|s| s.start_clock()),
            C::HourAfterSunrise => w.sunrise.map(|s| s.end_clock()),
            C::HourBeforeSunset => w.sunset.map(|s| s.start_clock()),
            C::HourAfterSunset => w.sunset.map(|s| s.end_clock()),
            C::Moonrise => inputs.events.moonrise.as_ref().map(ClockTime::from_instant),
            C::Moonset => inputs.events.moonset.as_ref().map(ClockTime::from_instant),
        }
    }
}

impl Target {
    pub fn resolve(self, windows: &DerivedWindows) -> Option<Window> {
        match self {
            T::Meridian => windows.meridian,
            T::OppositeMeridian => windows.opposite_meridian,
            T::Moonrise => windows.moonrise,
            T::Moonset => windows.moonset,
        }
    }
}

impl Rule {
    pub fn weight(&self) -> f64 {
        match *self {
            Rule::Overlap { weight, .. } | Rule::Illumination { weight, .. } => weight,
        }
    }

    pub fn evaluate(&self, inputs: &ScoreInputs<'_>) -> Outcome {
        let matched = match *self {
            Rule::Overlap {
                candidate, target, ..
            } => {
                let (Some(time), Some(window)) =
                    (candidate.resolve(inputs), target.resolve(inputs.windows))
                else {
                    return Outcome::Skipped;
                };
                is_between(time, window.start_clock(), window.end_clock())
            }
            Rule::Illumination {
                min_exclusive,
                max_inclusive,
                ..
            } => {
                let percent = inputs.events.illumination_percent();
                percent > min_exclusive && percent <= max_inclusive
            }
        };

        if matched {
            Outcome::Match
        } else {
            Outcome::NoMatch
        }
    }

    /// Weight this rule adds to the day's score.
    pub fn contribution(&self, inputs: &ScoreInputs<'_>) -> f64 {
        match self.evaluate(inputs) {
            Outcome::Match => self.weight(),
            Outcome::Skipped | Outcome::NoMatch => 0.0,
        }
    }
}

/// Sum of matched weights over an arbitrary rule table.
pub fn score_with(rules: &[Rule], inputs: &ScoreInputs<'_>) -> f64 {
    rules.iter().map(|rule| rule.contribution(inputs)).sum()
}

/// The day's score under [`RULES`].
pub fn score(events: &RawEvents, windows: &DerivedWindows) -> f64 {
    score_with(&RULES, &ScoreInputs { events, windows })
}

/// Rules of [`RULES`] that matched, for diagnostics.
pub fn matched_rules(events: &RawEvents, windows: &DerivedWindows) -> Vec<&'static Rule> {
    let inputs = ScoreInputs { events, windows };
    RULES
        .iter()
        .filter(|rule| rule.evaluate(&inputs) == Outcome::Match)
        .collect()
}
