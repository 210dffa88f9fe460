//! WASM bindings for the gravity simulation core.
//!
//! A browser frame controller creates a world, feeds it bodies and calls
//! `simulation_step` once per animation frame, reading positions back with
//! `simulation_get_bodies` for drawing.
//!
//! # Architecture
//!
//! Worlds live in thread-local storage (WASM is single-threaded). Functions
//! return opaque IDs for referencing mutable state, and serializable
//! snapshots for reading state.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! // A 2D bouncing world; missing fields take their defaults
//! const simId = simulation_create({ dimension: 2, collision_mode: "bounce", restitution: 0.8 });
//!
//! const earthId = simulation_add_body(simId, {
//!   mass: 50.0,
//!   radius: 10.0,
//!   position: [60.0, 20.0],
//!   velocity: [0.0, -8.0],
//!   name: "Earth"
//! });
//!
//! simulation_set_parameter(simId, { name: "time_factor", value: 2.0 });
//! simulation_set_parameter(simId, { name: "paused", value: false });
//! simulation_step(simId, 1 / 60);
//!
//! const bodies = simulation_get_bodies(simId);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use log::debug;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use gravity::body::BodyId;
use gravity::config::{Parameter, WorldConfig};
use gravity::scenario::{ScenarioConfig, sun_and_earth};
use gravity::snapshot::BodySnapshot;
use gravity::{BodySpec, Dimension, SimError, World};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn sim_error(error: SimError) -> JsError {
    JsError::new(&error.to_string())
}

// =============================================================================
// Thread-local storage for worlds
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, World>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn register(world: World) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, world);
    });

    id
}

fn not_found(sim_id: u32) -> JsError {
    JsError::new(&format!("Simulation {} not found", sim_id))
}

fn with_simulation<T>(
    sim_id: u32,
    f: impl FnOnce(&World) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let world = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;
        f(world)
    })
}

fn with_simulation_mut<T>(
    sim_id: u32,
    f: impl FnOnce(&mut World) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let world = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;
        f(world)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Complete world state snapshot
///
/// Field names are snake_case like the core's `BodySnapshot`.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationState {
    /// Simulated time elapsed
    pub time: f64,
    pub bodies: Vec<BodySnapshot>,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub total_energy: f64,
}

// =============================================================================
// Simulation management functions
// =============================================================================

/// Create an empty world from a `WorldConfig` object.
///
/// Returns a simulation ID for use with other functions.
#[wasm_bindgen]
pub fn simulation_create(config: JsValue) -> Result<u32, JsError> {
    let config: WorldConfig = from_js(config)?;
    let world = World::new(config).map_err(sim_error)?;
    Ok(register(world))
}

/// Create a world seeded with the default star and planet.
///
/// # Arguments
/// * `dimension` - 2 or 3
#[wasm_bindgen]
pub fn simulation_create_default(dimension: u8) -> Result<u32, JsError> {
    let dimension = Dimension::try_from(dimension).map_err(sim_error)?;
    let world = World::from_scenario(sun_and_earth(dimension)).map_err(sim_error)?;
    Ok(register(world))
}

/// Create a world from a scenario JSON document (`{"world": ..., "bodies": [...]}`).
#[wasm_bindgen]
pub fn simulation_load_scenario(json: &str) -> Result<u32, JsError> {
    let scenario = ScenarioConfig::from_json(json).map_err(sim_error)?;
    let world = World::from_scenario(scenario).map_err(sim_error)?;
    Ok(register(world))
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        if sims.borrow_mut().remove(&sim_id).is_some() {
            debug!("deleted simulation {sim_id}");
        }
    });
}

// =============================================================================
// Body management
// =============================================================================

/// Add a body to the simulation.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `body` - `BodySpec` object (mass, radius, position, velocity and
///   optional spin, temperature, name, texture_ref, fixed)
///
/// # Returns
/// The new body's ID
#[wasm_bindgen]
pub fn simulation_add_body(sim_id: u32, body: JsValue) -> Result<u32, JsError> {
    let spec: BodySpec = from_js(body)?;
    with_simulation_mut(sim_id, |world| {
        world.add_body(spec).map(|id| id.0).map_err(sim_error)
    })
}

/// Remove a body from the simulation.
///
/// # Returns
/// true if the body was found and removed
#[wasm_bindgen]
pub fn simulation_remove_body(sim_id: u32, body_id: u32) -> Result<bool, JsError> {
    with_simulation_mut(sim_id, |world| {
        Ok(world.remove_body(BodyId(body_id)).is_ok())
    })
}

/// Remove every body, keeping the world parameters.
#[wasm_bindgen]
pub fn simulation_clear(sim_id: u32) -> Result<(), JsError> {
    with_simulation_mut(sim_id, |world| {
        world.remove_all();
        Ok(())
    })
}

/// Anchor a body in place or release it.
#[wasm_bindgen]
pub fn simulation_set_fixed(sim_id: u32, body_id: u32, fixed: bool) -> Result<(), JsError> {
    with_simulation_mut(sim_id, |world| {
        world.set_fixed(BodyId(body_id), fixed).map_err(sim_error)
    })
}

/// Flip the selection flag of one body.
///
/// # Returns
/// The new selection state
#[wasm_bindgen]
pub fn simulation_toggle_selection(sim_id: u32, body_id: u32) -> Result<bool, JsError> {
    with_simulation_mut(sim_id, |world| {
        world.toggle_selection(BodyId(body_id)).map_err(sim_error)
    })
}

/// Update one world parameter from a `{name, value}` object.
#[wasm_bindgen]
pub fn simulation_set_parameter(sim_id: u32, parameter: JsValue) -> Result<(), JsError> {
    let parameter: Parameter = from_js(parameter)?;
    with_simulation_mut(sim_id, |world| {
        world.set_parameter(parameter).map_err(sim_error)
    })
}

// =============================================================================
// Simulation stepping
// =============================================================================

/// Advance the simulation by one frame.
///
/// # Returns
/// Simulated time elapsed
#[wasm_bindgen]
pub fn simulation_step(sim_id: u32, dt: f64) -> Result<f64, JsError> {
    with_simulation_mut(sim_id, |world| {
        world.step(dt).map_err(sim_error)?;
        Ok(world.time())
    })
}

/// Advance the simulation by multiple frames.
///
/// More efficient than calling simulation_step repeatedly.
///
/// # Returns
/// Simulated time elapsed
#[wasm_bindgen]
pub fn simulation_integrate(sim_id: u32, dt: f64, n_steps: usize) -> Result<f64, JsError> {
    with_simulation_mut(sim_id, |world| {
        for _ in 0..n_steps {
            world.step(dt).map_err(sim_error)?;
        }
        Ok(world.time())
    })
}

// =============================================================================
// State queries
// =============================================================================

/// Get all bodies for rendering.
#[wasm_bindgen]
pub fn simulation_get_bodies(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |world| to_js(&world.snapshot().bodies))
}

/// Get complete simulation state snapshot.
///
/// Includes time, bodies, and energy for diagnostics.
#[wasm_bindgen]
pub fn simulation_get_state(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |world| {
        let snapshot = world.snapshot();
        let kinetic_energy = world.kinetic_energy();
        let potential_energy = world.potential_energy().map_err(sim_error)?;

        to_js(&SimulationState {
            time: snapshot.time,
            bodies: snapshot.bodies,
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
        })
    })
}

/// Get body count.
#[wasm_bindgen]
pub fn simulation_body_count(sim_id: u32) -> Result<usize, JsError> {
    with_simulation(sim_id, |world| Ok(world.body_count()))
}
