//! Join-point identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{AROUND_POINT_NAME, JOIN_POINT_SEPARATOR};
use crate::error::{Error, Result};

/// `<aspectName>.<pointName>` key binding a call site to one advice wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JoinPointId {
    aspect: String,
    point: String,
}

impl JoinPointId {
    /// Build an id from its two halves
    pub fn new(aspect: impl Into<String>, point: impl Into<String>) -> Self {
        Self {
            aspect: aspect.into(),
            point: point.into(),
        }
    }

    /// Id of an around-style aspect: `<aspect>.proceed`
    pub fn around(aspect: impl Into<String>) -> Self {
        Self::new(aspect, AROUND_POINT_NAME)
    }

    /// Parse `<aspect>.<point>`
    ///
    /// The point name is everything after the last separator, so explicit
    /// aspect names may themselves contain dots.
    pub fn parse(id: &str) -> Result<Self> {
        match id.rsplit_once(JOIN_POINT_SEPARATOR) {
            Some((aspect, point)) if !aspect.is_empty() && !point.is_empty() => {
                Ok(Self::new(aspect, point))
            }
            _ => Err(Error::configuration(format!(
                "Invalid join point id '{id}': expected <aspect>{JOIN_POINT_SEPARATOR}<point>"
            ))),
        }
    }

    /// Aspect half
    pub fn aspect(&self) -> &str {
        &self.aspect
    }

    /// Point half
    pub fn point(&self) -> &str {
        &self.point
    }

    /// True for `<aspect>.proceed`
    pub fn is_around(&self) -> bool {
        self.point == AROUND_POINT_NAME
    }
}

impl fmt::Display for JoinPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.aspect, JOIN_POINT_SEPARATOR, self.point)
    }
}

impl std::str::FromStr for JoinPointId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
