//! Visible map region and zoom level.

use crate::projection::{clamp_zoom, LatLng, Pixel, Projection, MAX_LAT, MIN_LAT};

/// A latitude/longitude rectangle.
///
/// When `south_west.lng > north_east.lng` the bounds cross the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Bounds covering the whole Mercator world.
    pub fn world() -> Self {
        Self::new(LatLng::new(MIN_LAT, -180.0), LatLng::new(MAX_LAT, 180.0))
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.south_west.lng > self.north_east.lng
    }

    pub fn contains(&self, position: LatLng) -> bool {
        if position.lat < self.south_west.lat || position.lat > self.north_east.lat {
            return false;
        }
        if self.crosses_antimeridian() {
            position.lng >= self.south_west.lng || position.lng <= self.north_east.lng
        } else {
            position.lng >= self.south_west.lng && position.lng <= self.north_east.lng
        }
    }

    fn clamped(self) -> Self {
        let clamp_lat = |lat: f64| {
            if lat.is_nan() {
                0.0
            } else {
                lat.clamp(MIN_LAT, MAX_LAT)
            }
        };
        let clamp_lng = |lng: f64| {
            if lng.is_nan() {
                0.0
            } else {
                lng.clamp(-180.0, 180.0)
            }
        };
        let south = clamp_lat(self.south_west.lat);
        let north = clamp_lat(self.north_east.lat);
        Self::new(
            LatLng::new(south.min(north), clamp_lng(self.south_west.lng)),
            LatLng::new(south.max(north), clamp_lng(self.north_east.lng)),
        )
    }
}

/// The current visible region and zoom level of the map.
///
/// Construction never fails: out-of-range zoom and bounds are clamped to the
/// nearest representable value, since views can report transient garbage while
/// being torn down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    bounds: LatLngBounds,
}

impl Viewport {
    pub fn new(zoom: f64, bounds: LatLngBounds) -> Self {
        let clamped_zoom = clamp_zoom(zoom);
        if clamped_zoom != zoom {
            log::warn!("viewport zoom {zoom} out of range, clamped to {clamped_zoom}");
        }
        let clamped_bounds = bounds.clamped();
        if clamped_bounds != bounds {
            log::warn!("viewport bounds {bounds:?} out of range, clamped to {clamped_bounds:?}");
        }
        Self {
            zoom: clamped_zoom,
            bounds: clamped_bounds,
        }
    }

    /// A viewport showing the whole world at `zoom`.
    pub fn world(zoom: f64) -> Self {
        Self::new(zoom, LatLngBounds::world())
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn bounds(&self) -> &LatLngBounds {
        &self.bounds
    }

    /// Zoom level clustering decisions are made at.
    ///
    /// Membership only changes when the integer zoom changes, so continuous
    /// pinch-zooming does not reshuffle clusters every frame.
    pub fn discrete_zoom(&self) -> f64 {
        self.zoom.floor()
    }

    /// Projection at [`Viewport::discrete_zoom`].
    pub fn projection(&self) -> Projection {
        Projection::new(self.discrete_zoom())
    }

    /// Pixel-space rectangle of the visible bounds, padded by `padding_px` on every side.
    pub(crate) fn pixel_region(&self, padding_px: f64) -> PixelRegion {
        let projection = self.projection();
        let world = projection.world_size();
        let lng_to_x = |lng: f64| (lng + 180.0) / 360.0 * world;
        let top = projection.to_pixel(LatLng::new(self.bounds.north_east.lat, 0.0)).y;
        let bottom = projection.to_pixel(LatLng::new(self.bounds.south_west.lat, 0.0)).y;
        PixelRegion {
            min_x: lng_to_x(self.bounds.south_west.lng) - padding_px,
            max_x: lng_to_x(self.bounds.north_east.lng) + padding_px,
            min_y: top - padding_px,
            max_y: bottom + padding_px,
            wraps: self.bounds.crosses_antimeridian(),
        }
    }
}

/// Axis-aligned pixel rectangle, possibly wrapping around the antimeridian.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PixelRegion {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    wraps: bool,
}

impl PixelRegion {
    pub(crate) fn contains(&self, pixel: Pixel) -> bool {
        if pixel.y < self.min_y || pixel.y > self.max_y {
            return false;
        }
        if self.wraps {
            pixel.x >= self.min_x || pixel.x <= self.max_x
        } else {
            pixel.x >= self.min_x && pixel.x <= self.max_x
        }
    }
}

/// Supplies the current viewport of an attached map view.
pub trait ViewportSource {
    fn viewport(&self) -> Viewport;
}

impl ViewportSource for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

impl<F> ViewportSource for F
where
    F: Fn() -> Viewport,
{
    fn viewport(&self) -> Viewport {
        self()
    }
}
