//! Car rating records and their bounded scores.
//!
//! A [`Rating`] is the only entity the panel persists. Its three axes hold a
//! [`Score`], an integer constrained to the inclusive range `0..=5`, so an
//! out-of-range value can never be stored or edited into a draft.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing rating values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    /// A score fell outside the supported range.
    #[error("score {value} is outside the range {min}..={max}")]
    ScoreOutOfRange {
        /// The rejected value.
        value: i64,
        /// Lowest accepted score.
        min: u8,
        /// Highest accepted score.
        max: u8,
    },

    /// An axis name did not match any known axis.
    #[error("unknown rating axis: {name}")]
    UnknownAxis {
        /// The unrecognised name.
        name: String,
    },
}

/// An integer score in the inclusive range `0..=5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Lowest score.
    pub const MIN: Self = Self(0);
    /// Highest score.
    pub const MAX: Self = Self(5);

    /// Creates a score, rejecting values above [`Score::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::ScoreOutOfRange`] when `value` exceeds the
    /// maximum.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if value > Self::MAX.0 {
            return Err(RatingError::ScoreOutOfRange {
                value: i64::from(value),
                min: Self::MIN.0,
                max: Self::MAX.0,
            });
        }
        Ok(Self(value))
    }

    /// Creates a score, clamping `value` into range.
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the next score up, staying at the maximum.
    #[must_use]
    pub const fn step_up(self) -> Self {
        Self::saturating(self.0.saturating_add(1))
    }

    /// Returns the next score down, staying at the minimum.
    #[must_use]
    pub const fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl TryFrom<i64> for Score {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(|narrow| Self::new(narrow).ok())
            .ok_or(RatingError::ScoreOutOfRange {
                value,
                min: Self::MIN.0,
                max: Self::MAX.0,
            })
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three axes a car is rated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingAxis {
    /// Straight-line performance.
    Speed,
    /// Cornering and control.
    Handling,
    /// Appearance.
    Looks,
}

impl RatingAxis {
    /// All axes in display order.
    pub const ALL: [Self; 3] = [Self::Speed, Self::Handling, Self::Looks];

    /// Field name used in stored documents and change events.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Handling => "handling",
            Self::Looks => "looks",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::Handling => "Handling",
            Self::Looks => "Looks",
        }
    }
}

impl FromStr for RatingAxis {
    type Err = RatingError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.name() == name)
            .ok_or_else(|| RatingError::UnknownAxis {
                name: name.to_owned(),
            })
    }
}

/// A named car rating.
///
/// The `id` doubles as the display name and the storage key. A rating with
/// an empty `id` is a draft that has never been named and is never written
/// to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Car name and document key.
    pub id: String,
    /// Speed score.
    #[serde(default)]
    pub speed: Score,
    /// Handling score.
    #[serde(default)]
    pub handling: Score,
    /// Looks score.
    #[serde(default)]
    pub looks: Score,
}

impl Rating {
    /// Returns an empty draft.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a rating with the given name and zeroed scores.
    #[must_use]
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns true when the rating has a name and may be persisted.
    #[must_use]
    pub const fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Returns the score for `axis`.
    #[must_use]
    pub const fn score(&self, axis: RatingAxis) -> Score {
        match axis {
            RatingAxis::Speed => self.speed,
            RatingAxis::Handling => self.handling,
            RatingAxis::Looks => self.looks,
        }
    }

    /// Sets the score for `axis`, leaving the other axes untouched.
    pub const fn set_score(&mut self, axis: RatingAxis, value: Score) {
        match axis {
            RatingAxis::Speed => self.speed = value,
            RatingAxis::Handling => self.handling = value,
            RatingAxis::Looks => self.looks = value,
        }
    }

    /// Builder-style variant of [`Rating::set_score`].
    #[must_use]
    pub const fn with_score(mut self, axis: RatingAxis, value: Score) -> Self {
        self.set_score(axis, value);
        self
    }
}
