//! Course identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const COURSE_PREFIX: &str = "course-v1:";

/// Identifies a course run: `course-v1:org+number+run`.
///
/// The deprecated slash form `org/number/run` is accepted on input; output always uses the
/// `course-v1:` form.
///
/// ```rust
/// use studio_domain::course::CourseKey;
///
/// let key: CourseKey = "edX/DemoX/2024".parse().unwrap();
/// assert_eq!(key.to_string(), "course-v1:edX+DemoX+2024");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseKey {
    org: String,
    number: String,
    run: String,
}

impl CourseKey {
    /// # Errors
    /// Returns [`CourseKeyError`] if any part is empty or contains characters outside
    /// `[A-Za-z0-9_.-]`.
    pub fn new(
        org: impl Into<String>,
        number: impl Into<String>,
        run: impl Into<String>,
    ) -> Result<Self, CourseKeyError> {
        let key = Self { org: org.into(), number: number.into(), run: run.into() };
        if [&key.org, &key.number, &key.run].into_iter().all(|part| is_valid_part(part)) {
            Ok(key)
        } else {
            Err(CourseKeyError { input: key.to_string() })
        }
    }

    #[must_use]
    pub fn org(&self) -> &str {
        &self.org
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn run(&self) -> &str {
        &self.run
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{COURSE_PREFIX}{}+{}+{}", self.org, self.number, self.run)
    }
}

impl FromStr for CourseKey {
    type Err = CourseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CourseKeyError { input: s.to_owned() };

        let parts: Vec<&str> = match s.strip_prefix(COURSE_PREFIX) {
            Some(rest) => rest.split('+').collect(),
            None => s.split('/').collect(),
        };
        let [org, number, run] = parts.as_slice() else {
            return Err(invalid());
        };

        Self::new(*org, *number, *run).map_err(|_| invalid())
    }
}

impl Serialize for CourseKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CourseKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Rejected course key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseKeyError {
    input: String,
}

impl fmt::Display for CourseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid course key '{}': expected course-v1:org+number+run", self.input)
    }
}

impl std::error::Error for CourseKeyError {}
