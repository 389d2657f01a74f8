use serde::{Deserialize, Serialize};

use crate::plan::WallAttrs;

/// Tunable editor defaults, in world units.
///
/// Deserializes from persisted settings; missing fields fall back to the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Thickness applied to newly drawn walls.
    pub wall_thickness: f64,
    /// Height applied to newly drawn walls.
    pub wall_height: f64,
    /// Name applied to newly drawn walls.
    pub wall_name: String,
    /// Snap radius for vertex and wall targets while drawing.
    pub snap_distance: f64,
    /// Wider snap radius used when placing doors.
    pub door_snap_distance: f64,
    /// Door opening width along the wall.
    pub door_width: f64,
    /// Door leaf thickness, clamped to the wall's thickness on placement.
    pub door_height: f64,
    /// Clearance margin around a candidate door in the overlap check.
    pub door_clearance_margin: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            wall_thickness: 10.0,
            wall_height: 300.0,
            wall_name: "Wall".to_owned(),
            snap_distance: 10.0,
            door_snap_distance: 50.0,
            door_width: 70.0,
            door_height: 10.0,
            door_clearance_margin: 5.0,
        }
    }
}

impl EditorConfig {
    /// The attributes applied to a newly drawn wall.
    #[must_use]
    pub fn wall_attrs(&self) -> WallAttrs {
        WallAttrs {
            thickness: self.wall_thickness,
            height: self.wall_height,
            name: self.wall_name.clone(),
        }
    }
}
