//! # Coordinate Directory
//!
//! The beaches this service reports on, with the coordinates used to query
//! providers. The built-in table covers Rio de Janeiro's ocean and bay
//! beaches; a `[[locations]]` table in the config file replaces it.

use crate::Location;

/// Built-in beaches: (name, latitude, longitude).
const RIO_BEACHES: &[(&str, f64, f64)] = &[
    ("Copacabana", -22.9714, -43.1823),
    ("Ipanema", -22.9837, -43.1985),
    ("Leblon", -22.9864, -43.2233),
    ("Barra da Tijuca", -23.0089, -43.3220),
    ("Recreio dos Bandeirantes", -23.0279, -43.4779),
    ("São Conrado", -22.9997, -43.2563),
    ("Leme", -22.9642, -43.1709),
    ("Arpoador", -22.9892, -43.1919),
    ("Prainha", -23.0404, -43.5019),
    ("Grumari", -23.0486, -43.5305),
    ("Flamengo", -22.9375, -43.1747),
    ("Botafogo", -22.9507, -43.1845),
    ("Urca", -22.9486, -43.1658),
    ("Joatinga", -23.0166, -43.2833),
    ("Macumba", -23.0333, -43.4833),
    ("Pontal", -23.0333, -43.4667),
    ("Pepê", -23.0089, -43.3220),
    ("Diabo", -22.9892, -43.1919),
    ("Reserva", -23.0279, -43.4779),
];

/// Ordered, read-only set of known locations.
#[derive(Clone, Debug)]
pub struct Directory {
    locations: Vec<Location>,
}

impl Directory {
    /// Directory of the built-in Rio de Janeiro beaches.
    pub fn rio() -> Self {
        Self {
            locations: RIO_BEACHES
                .iter()
                .map(|&(name, lat, lon)| Location::new(name, lat, lon))
                .collect(),
        }
    }

    /// Build a directory from an explicit list. Later duplicates of a name
    /// are dropped so every name maps to exactly one location.
    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let mut unique: Vec<Location> = Vec::new();
        for location in locations {
            if unique.iter().any(|l| l.name == location.name) {
                tracing::warn!(location = %location.name, "duplicate location ignored");
                continue;
            }
            unique.push(location);
        }
        Self { locations: unique }
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|l| l.name.as_str())
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
