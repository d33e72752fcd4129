//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Design runs must be
//! bit-reproducible, and double precision keeps centroid averaging over a few
//! thousand orders free of accumulated rounding that could flip a nearest-
//! warehouse tie.

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Kilometres per degree of latitude (spherical approximation).
const KM_PER_DEG_LAT: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Haversine great-circle distance in metres.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        self.distance_km(other) * 1_000.0
    }

    /// `true` when both coordinates are finite and within the WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// `true` when `other` lies within `epsilon_m` metres of `self`.
    #[inline]
    pub fn coincides_with(self, other: GeoPoint, epsilon_m: f64) -> bool {
        self.distance_m(other) <= epsilon_m
    }

    /// Arithmetic mean of a set of points.  `None` for an empty iterator.
    ///
    /// Plain lat/lon averaging is adequate at city scale, where the
    /// curvature error is far below the resolution of the source data.
    pub fn centroid<I: IntoIterator<Item = GeoPoint>>(points: I) -> Option<GeoPoint> {
        let (mut lat, mut lon, mut n) = (0.0_f64, 0.0_f64, 0_usize);
        for p in points {
            lat += p.lat;
            lon += p.lon;
            n += 1;
        }
        (n > 0).then(|| GeoPoint::new(lat / n as f64, lon / n as f64))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned lat/lon rectangle describing the operating region.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    /// Inclusive containment test.  Non-finite coordinates are never contained.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.is_valid()
            && p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lon >= self.min_lon
            && p.lon <= self.max_lon
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) * 0.5,
            (self.min_lon + self.max_lon) * 0.5,
        )
    }

    /// `true` when min ≤ max on both axes and all bounds are finite.
    pub fn is_well_formed(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lon, self.max_lon]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lat <= self.max_lat
            && self.min_lon <= self.max_lon
    }
}

// ── LocalProjection ───────────────────────────────────────────────────────────

/// Equirectangular projection to a planar kilometre grid around `origin`.
///
/// Used for R-tree neighbourhood queries, where Euclidean distance on the
/// projected plane must approximate great-circle distance.  Within a 50 km
/// city footprint the error stays below 0.5 %.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalProjection {
    origin: GeoPoint,
    km_per_deg_lon: f64,
}

impl LocalProjection {
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            km_per_deg_lon: KM_PER_DEG_LAT * origin.lat.to_radians().cos(),
        }
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Project to `[x_km, y_km]` (east, north) relative to the origin.
    #[inline]
    pub fn project(&self, p: GeoPoint) -> [f64; 2] {
        [
            (p.lon - self.origin.lon) * self.km_per_deg_lon,
            (p.lat - self.origin.lat) * KM_PER_DEG_LAT,
        ]
    }
}

// ── Nearest site ──────────────────────────────────────────────────────────────

/// Index and distance (km) of the site nearest to `point`.
///
/// Linear scan; equal distances resolve to the lower index so the result
/// depends only on the data, never on iteration order elsewhere.  Returns
/// `None` for an empty site list.
pub fn nearest_site<I>(point: GeoPoint, sites: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = GeoPoint>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, site) in sites.into_iter().enumerate() {
        let d = point.distance_km(site);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
