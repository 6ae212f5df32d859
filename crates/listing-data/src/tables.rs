//! Fixed data tables the generator cycles through.

/// A city centre used to anchor generated listings.
pub(crate) struct City {
    /// City name.
    pub name: &'static str,
    /// Two-letter state code.
    pub state: &'static str,
    /// Centre latitude.
    pub latitude: f64,
    /// Centre longitude.
    pub longitude: f64,
}

/// Ten US city centres; houses cycle through them in ordinal order.
pub(crate) const CITIES: [City; 10] = [
    City {
        name: "New York",
        state: "NY",
        latitude: 40.7128,
        longitude: -74.0060,
    },
    City {
        name: "Los Angeles",
        state: "CA",
        latitude: 34.0522,
        longitude: -118.2437,
    },
    City {
        name: "Chicago",
        state: "IL",
        latitude: 41.8781,
        longitude: -87.6298,
    },
    City {
        name: "Houston",
        state: "TX",
        latitude: 29.7604,
        longitude: -95.3698,
    },
    City {
        name: "Phoenix",
        state: "AZ",
        latitude: 33.4484,
        longitude: -112.0740,
    },
    City {
        name: "Philadelphia",
        state: "PA",
        latitude: 39.9526,
        longitude: -75.1652,
    },
    City {
        name: "San Antonio",
        state: "TX",
        latitude: 29.4241,
        longitude: -98.4936,
    },
    City {
        name: "San Diego",
        state: "CA",
        latitude: 32.7157,
        longitude: -117.1611,
    },
    City {
        name: "Dallas",
        state: "TX",
        latitude: 32.7767,
        longitude: -96.7970,
    },
    City {
        name: "San Jose",
        state: "CA",
        latitude: 37.3382,
        longitude: -121.8863,
    },
];

/// Property type labels; houses cycle through them in ordinal order.
pub(crate) const PROPERTY_TYPES: [&str; 6] = [
    "Single Family",
    "Apartment",
    "Condo",
    "Townhouse",
    "Villa",
    "Cottage",
];

/// Street names; houses cycle through them in ordinal order.
pub(crate) const STREETS: [&str; 10] = [
    "Main St",
    "Oak Ave",
    "Pine Rd",
    "Elm St",
    "Maple Dr",
    "Cedar Ln",
    "Birch Way",
    "Willow Ct",
    "Spruce St",
    "Cherry Ave",
];

/// Feature labels sampled into listing descriptions.
pub(crate) const FEATURES: [&str; 10] = [
    "Fireplace",
    "Hardwood Floors",
    "Garden",
    "Balcony",
    "Pool",
    "Garage",
    "Central AC",
    "Updated Kitchen",
    "Walk-in Closet",
    "Fenced Yard",
];
