//! Radar metadata for the maps a recording may report.

use common::Point;

/// Where the radar image's top left corner sits in world coordinates and how
/// many world units one radar pixel covers.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct MapMetadata {
    pub origin: Point,
    pub scale: f32,
}

impl MapMetadata {
    /// Used for maps missing from [`MAPS`], translation then only flips the Y axis.
    pub const UNKNOWN: Self = Self {
        origin: Point::new(0.0, 0.0),
        scale: 1.0,
    };

    const fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            scale,
        }
    }

    pub fn lookup(map_name: &str) -> Option<Self> {
        MAPS.get(map_name).copied()
    }
}

pub static MAPS: phf::Map<&'static str, MapMetadata> = phf::phf_map! {
    "de_ancient" => MapMetadata::new(-2953.0, 2164.0, 5.0),
    "de_anubis" => MapMetadata::new(-2796.0, 3328.0, 5.22),
    "de_cache" => MapMetadata::new(-2000.0, 3250.0, 5.5),
    "de_canals" => MapMetadata::new(-2496.0, 1792.0, 4.0),
    "de_cbble" => MapMetadata::new(-3840.0, 3072.0, 6.0),
    "de_dust2" => MapMetadata::new(-2476.0, 3239.0, 4.4),
    "de_inferno" => MapMetadata::new(-2087.0, 3870.0, 4.9),
    "de_mirage" => MapMetadata::new(-3230.0, 1713.0, 5.0),
    "de_nuke" => MapMetadata::new(-3453.0, 2887.0, 7.0),
    "de_overpass" => MapMetadata::new(-4831.0, 1781.0, 5.2),
    "de_train" => MapMetadata::new(-2477.0, 2392.0, 4.7),
    "de_vertigo" => MapMetadata::new(-3168.0, 1762.0, 4.0),
    "cs_agency" => MapMetadata::new(-2947.0, 2492.0, 5.0),
    "cs_office" => MapMetadata::new(-1838.0, 1858.0, 4.1),
};

/// World coordinates to radar coordinates, Y grows downwards on the radar.
pub fn translate(map: &MapMetadata, x: f32, y: f32) -> (f32, f32) {
    (x - map.origin.x, map.origin.y - y)
}

/// Like [`translate`], additionally scaled to radar pixels.
pub fn translate_scaled(map: &MapMetadata, x: f32, y: f32) -> (f32, f32) {
    let (x, y) = translate(map, x, y);
    (x / map.scale, y / map.scale)
}
