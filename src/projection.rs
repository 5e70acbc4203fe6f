//! Web Mercator projection between geographic and world-pixel coordinates.
//!
//! The world is a 256 px square at zoom 0 and doubles in each dimension per
//! zoom level, matching the tiling scheme of the native map SDKs. Pixel `x`
//! grows eastward from the antimeridian and `y` grows southward from the
//! northern Mercator limit.

use std::f64::consts::PI;

/// Side length of the world in pixels at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Northern latitude limit of the Mercator projection.
pub const MAX_LAT: f64 = 85.051_128_779_806_59;

/// Southern latitude limit of the Mercator projection.
pub const MIN_LAT: f64 = -MAX_LAT;

/// Lowest representable zoom level.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest representable zoom level.
pub const MAX_ZOOM: f64 = 30.0;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Create a position from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Clamp latitude into the Mercator range and wrap longitude into `[-180, 180)`.
    pub fn normalized(self) -> Self {
        let lat = if self.lat.is_nan() {
            0.0
        } else {
            self.lat.clamp(MIN_LAT, MAX_LAT)
        };
        let lng = if self.lng.is_finite() {
            (self.lng + 180.0).rem_euclid(360.0) - 180.0
        } else {
            0.0
        };
        Self { lat, lng }
    }
}

/// A point in world-pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Projection for a single zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    zoom: f64,
    world_size: f64,
}

impl Projection {
    /// Create a projection at `zoom`, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn new(zoom: f64) -> Self {
        let zoom = clamp_zoom(zoom);
        Self {
            zoom,
            world_size: TILE_SIZE * 2.0_f64.powf(zoom),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Side length of the world square in pixels.
    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    /// Project a geographic position into world pixels.
    pub fn to_pixel(&self, position: LatLng) -> Pixel {
        let position = position.normalized();
        let x = (position.lng + 180.0) / 360.0 * self.world_size;
        let sin_lat = position.lat.to_radians().sin();
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * self.world_size;
        Pixel::new(x, y)
    }

    /// Invert [`Projection::to_pixel`].
    pub fn to_lat_lng(&self, pixel: Pixel) -> LatLng {
        let lng = pixel.x / self.world_size * 360.0 - 180.0;
        let y = 0.5 - pixel.y / self.world_size;
        let lat = 90.0 - 360.0 * (-y * 2.0 * PI).exp().atan() / PI;
        LatLng::new(lat, lng)
    }
}

/// Clamp a zoom level into the representable range. Non-finite values map to `MIN_ZOOM`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        MIN_ZOOM
    }
}
