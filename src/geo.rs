//! Geographic aggregation for the map view
//!
//! The centroid is a plain mean of latitudes and longitudes. It only frames
//! the initial map view; there is no spherical correction.

use crate::model::Enterprise;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A located enterprise, i.e. one map marker
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker<'a> {
    pub enterprise: &'a Enterprise,
    pub position: GeoPoint,
}

/// Everything needed to draw the map: the initial center and the markers
#[derive(Debug, Clone, Serialize)]
pub struct MapView<'a> {
    pub center: GeoPoint,
    pub markers: Vec<MapMarker<'a>>,
}

impl<'a> MapView<'a> {
    /// `None` when no enterprise has usable coordinates; the caller shows a
    /// "no location data" fallback instead of a map.
    pub fn from_enterprises(enterprises: &'a [Enterprise]) -> Option<Self> {
        let markers = located(enterprises);
        let center = mean_point(markers.iter().map(|m| m.position))?;
        Some(MapView { center, markers })
    }
}

/// Enterprises flagged as located with both coordinates present, in input order
pub fn located(enterprises: &[Enterprise]) -> Vec<MapMarker<'_>> {
    enterprises
        .iter()
        .filter_map(|enterprise| {
            enterprise
                .location()
                .map(|position| MapMarker { enterprise, position })
        })
        .collect()
}

/// Mean coordinate of the located enterprises, or `None` if there are none
pub fn centroid(enterprises: &[Enterprise]) -> Option<GeoPoint> {
    mean_point(enterprises.iter().filter_map(Enterprise::location))
}

fn mean_point(points: impl Iterator<Item = GeoPoint>) -> Option<GeoPoint> {
    let (count, lat, lng) = points.fold((0usize, 0.0, 0.0), |(n, lat, lng), p| {
        (n + 1, lat + p.lat, lng + p.lng)
    });
    if count == 0 {
        return None;
    }
    Some(GeoPoint::new(lat / count as f64, lng / count as f64))
}
