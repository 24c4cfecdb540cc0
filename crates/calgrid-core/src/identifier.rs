//! Interned identifiers for appointments, professionals and clients.
//!
//! Every record in a calendar dataset is referenced by a short string key
//! (`appt_1`, `prof_2`, ...). Those keys are compared and hashed constantly
//! while partitioning and laying out tracks, so they are interned once and
//! carried around as a copyable [`Id`].

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by all identifiers.
///
/// # Thread Safety
///
/// Access is serialized through a `Mutex`.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned string identifier.
///
/// # Examples
///
/// ```
/// use calgrid_core::identifier::Id;
///
/// let staff = Id::new("prof_1");
/// assert_eq!(staff, "prof_1");
///
/// let generated = Id::with_sequence("appt", 7);
/// assert_eq!(generated, "appt_7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an identifier of the form `<prefix>_<seq>`.
    ///
    /// Used when the schedule has to mint an id for a newly saved appointment.
    pub fn with_sequence(prefix: &str, seq: usize) -> Self {
        Self::new(&format!("{prefix}_{seq}"))
    }

    /// Returns the interned string as an owned `String`.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let value = interner.resolve(self.0).unwrap_or_default();
        f.write_str(value)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "prof_1"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("prof_1");
        let id2 = Id::new("prof_1");
        let id3 = Id::new("prof_2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "prof_1");
    }

    #[test]
    fn test_with_sequence() {
        let id1 = Id::with_sequence("appt", 1);
        let id2 = Id::with_sequence("appt", 2);

        assert_ne!(id1, id2);
        assert_eq!(id1, "appt_1");
        assert_eq!(id1, Id::new("appt_1"));
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("client_4");
        assert_eq!(format!("{id}"), "client_4");
        assert_eq!(id.as_string(), "client_4");
    }

    #[test]
    fn test_from_str() {
        let id: Id = "client_2".parse().unwrap();
        assert_eq!(id, Id::from("client_2"));
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("appt_3");

        assert!(id == "appt_3");
        assert!(id != "appt_30");

        let owned = String::from("appt_3");
        assert!(id == owned.as_str());
    }
}
