//! Address lookup
//!
//! Turns a partial street address into a short list of candidates with
//! coordinates. Picking one fills in a submission's location.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use regen_directory::{GeoPoint, GeocoderConfig, NewEnterprise};

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoder access token is not set")]
    MissingToken,

    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// One suggestion for a partial address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCandidate {
    pub place_name: String,
    pub location: GeoPoint,
}

impl AddressCandidate {
    /// Set the draft's address and coordinates from this candidate
    pub fn apply_to(&self, draft: &mut NewEnterprise) {
        draft.address = Some(self.place_name.clone());
        draft.latitude = Some(self.location.lat);
        draft.longitude = Some(self.location.lng);
        draft.has_location = true;
    }
}

/// Address autocomplete provider
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidates for a partial address; blank input yields none
    async fn suggest(&self, partial_address: &str) -> GeocodeResult<Vec<AddressCandidate>>;
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    place_name: String,
    /// `[lng, lat]`
    center: [f64; 2],
}

impl From<Feature> for AddressCandidate {
    fn from(feature: Feature) -> Self {
        let [lng, lat] = feature.center;
        AddressCandidate {
            place_name: feature.place_name,
            location: GeoPoint::new(lat, lng),
        }
    }
}

/// Mapbox Places forward geocoder
pub struct MapboxGeocoder {
    config: GeocoderConfig,
    access_token: String,
    http_client: Client,
}

impl MapboxGeocoder {
    pub fn from_config(config: &GeocoderConfig) -> GeocodeResult<Self> {
        let access_token = config
            .access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(GeocodeError::MissingToken)?;
        Ok(Self {
            config: config.clone(),
            access_token,
            http_client: Client::new(),
        })
    }

    /// Point at a different API host (tests, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn request_url(&self, query: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json?access_token={}&autocomplete=true&country={}&language={}&limit={}",
            self.config.base_url.trim_end_matches('/'),
            utf8_percent_encode(query, NON_ALPHANUMERIC),
            utf8_percent_encode(&self.access_token, NON_ALPHANUMERIC),
            utf8_percent_encode(&self.config.country, NON_ALPHANUMERIC),
            utf8_percent_encode(&self.config.language, NON_ALPHANUMERIC),
            self.config.limit,
        )
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn suggest(&self, partial_address: &str) -> GeocodeResult<Vec<AddressCandidate>> {
        let query = partial_address.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Geocoding {:?}", query);

        let response = self.http_client.get(self.request_url(query)).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::RequestFailed(response.status().to_string()));
        }
        let collection: FeatureCollection = response.json().await?;
        Ok(collection.features.into_iter().map(AddressCandidate::from).collect())
    }
}
