//! Plain-data copies of world state for renderers and wire layers
//!
//! Snapshots own all of their data, so later steps never change a snapshot
//! a caller already holds.

use crate::body::{Body, BodyId};
use crate::body_state::{BodyClass, BodyColor};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub radius: f64,
    pub mass: f64,
    pub temperature: f64,
    /// Angular velocity in rad/s
    pub spin: f64,
    pub rotation_angle: f64,
    pub class: BodyClass,
    pub color: BodyColor,
    pub texture_ref: String,
    pub selected: bool,
    pub fixed: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            name: body.name.clone(),
            position: body.position.to_vec(),
            velocity: body.velocity.to_vec(),
            radius: body.radius(),
            mass: body.mass(),
            temperature: body.temperature(),
            spin: body.spin,
            rotation_angle: body.rotation_angle,
            class: body.class(),
            color: body.state().color(),
            texture_ref: body.state().texture_ref().to_string(),
            selected: body.selected,
            fixed: body.fixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Simulated time elapsed (sum of `dt * time_factor`)
    pub time: f64,
    pub bodies: Vec<BodySnapshot>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn body(&self, id: BodyId) -> Option<&BodySnapshot> {
        self.bodies.iter().find(|b| b.id == id)
    }
}
