//! Delivery locations.
//!
//! A [`Location`] is identified by its street address and zipcode. The
//! display label is carried for presentation only.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A place a truck can stop at.
///
/// Two locations with the same address and zipcode are the same location even
/// when their labels differ.
///
/// # Examples
/// ```
/// use parcel_core::Location;
///
/// let hub = Location::new("Western Hub", "4001 South 700 East", "84107");
/// let alias = Location::new("HUB", "4001 South 700 East", "84107");
///
/// assert_eq!(hub, alias);
/// assert_eq!(hub.to_string(), "(Western Hub: 4001 South 700 East; 84107)");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Human-readable name, ignored by equality.
    pub label: String,
    /// Street address.
    pub address: String,
    /// Postal code; empty when unknown.
    pub zipcode: String,
}

impl Location {
    /// Construct a location from its label, address and zipcode.
    pub fn new(
        label: impl Into<String>,
        address: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            address: address.into(),
            zipcode: zipcode.into(),
        }
    }

    /// Construct an unlabelled location, as used for package destinations.
    ///
    /// # Examples
    /// ```
    /// use parcel_core::Location;
    ///
    /// let stop = Location::unlabelled("195 W Oakland Ave", "84115");
    /// assert!(stop.label.is_empty());
    /// ```
    pub fn unlabelled(address: impl Into<String>, zipcode: impl Into<String>) -> Self {
        Self::new(String::new(), address, zipcode)
    }

    /// Returns `true` when `address` and `zipcode` identify this location.
    #[must_use]
    pub fn matches(&self, address: &str, zipcode: &str) -> bool {
        self.address == address && self.zipcode == zipcode
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.address, &other.zipcode)
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        self.zipcode.hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {}; {})", self.label, self.address, self.zipcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn label_does_not_affect_identity() {
        let a = Location::new("Council Hall", "300 State St", "84103");
        let b = Location::new("City Offices", "300 State St", "84103");
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn zipcode_distinguishes_locations() {
        let a = Location::unlabelled("300 State St", "84103");
        let b = Location::unlabelled("300 State St", "84111");
        assert_ne!(a, b);
    }
}
