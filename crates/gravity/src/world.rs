use crate::body::{Body, BodyId};
use crate::body_state::classify;
use crate::collisions::{CollisionEvent, CollisionMode, bounce_bodies, first_contact, merge_bodies};
use crate::config::{Parameter, WorldConfig};
use crate::error::{Result, SimError, ensure_positive};
use crate::forces::{DirectGravity, ForceModel};
use crate::snapshot::{BodySnapshot, WorldSnapshot};
use crate::vector::{Dimension, Vector};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Input record for [`World::add_body`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub mass: f64,
    pub radius: f64,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    /// Angular velocity in rad/s
    #[serde(default)]
    pub spin: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub texture_ref: Option<String>,
    /// Anchored in place; the velocity is ignored
    #[serde(default)]
    pub fixed: bool,
}

impl BodySpec {
    /// A spin-less, cold body with default name and texture
    pub fn new(mass: f64, radius: f64, position: Vec<f64>, velocity: Vec<f64>) -> Self {
        Self {
            mass,
            radius,
            position,
            velocity,
            spin: 0.0,
            temperature: 0.0,
            name: None,
            texture_ref: None,
            fixed: false,
        }
    }

    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_texture(mut self, texture_ref: impl Into<String>) -> Self {
        self.texture_ref = Some(texture_ref.into());
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Angular velocity for a rotation period; non-positive periods mean no spin
    pub fn spin_from_period(period: f64) -> f64 {
        if period > 0.0 { TAU / period } else { 0.0 }
    }
}

/// A merge resolved during a step
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRecord {
    pub event: CollisionEvent,
    /// Id of the body that replaced the pair
    pub merged: BodyId,
}

/// What happened during one [`World::step`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub merges: Vec<MergeRecord>,
    /// Contacts resolved by bouncing, including ones already separating
    pub bounces: Vec<CollisionEvent>,
}

/// The simulation: bodies plus global parameters
///
/// Every body shares the world's dimension. `step` and the mutators take
/// `&mut self`, so a step can never run concurrently with itself or with
/// direct body edits.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    bodies: Vec<Body>,
    next_id: u32,
    /// Simulated time, sum of `dt * time_factor`
    time: f64,
}

/// Convenience constructor mirroring the controller-facing interface
pub fn create_world(
    dimension: Dimension,
    gravitational_constant: f64,
    time_factor: f64,
    collision_mode: CollisionMode,
    restitution: f64,
) -> Result<World> {
    World::new(WorldConfig {
        dimension,
        gravitational_constant,
        time_factor,
        collision_mode,
        restitution,
        ..WorldConfig::default()
    })
}

impl World {
    /// Creates an empty world
    ///
    /// # Examples
    ///
    /// ```
    /// use gravity::config::WorldConfig;
    /// use gravity::world::{BodySpec, World};
    ///
    /// let mut world = World::new(WorldConfig::default()).unwrap();
    /// let id = world
    ///     .add_body(BodySpec::new(50.0, 10.0, vec![60.0, 20.0, 0.0], vec![0.0, -8.0, 0.0]))
    ///     .unwrap();
    ///
    /// world.step(1.0 / 60.0).unwrap();
    /// assert_eq!(world.snapshot().bodies[0].id, id);
    /// ```
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "creating {}D world (G = {}, mode = {:?})",
            config.dimension.count(),
            config.gravitational_constant,
            config.collision_mode
        );
        Ok(Self {
            config,
            bodies: Vec::new(),
            next_id: 0,
            time: 0.0,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn dimension(&self) -> Dimension {
        self.config.dimension
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, id: BodyId) -> Result<&Body> {
        self.bodies
            .iter()
            .find(|b| b.id == id)
            .ok_or(SimError::UnknownBodyId(id))
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body> {
        self.bodies
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(SimError::UnknownBodyId(id))
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    fn vector_in_world(&self, name: &'static str, components: &[f64]) -> Result<Vector> {
        let vector = Vector::from_components(components)?;
        check_finite(name, &vector)?;
        if vector.dimension() != self.dimension() {
            return Err(SimError::invalid(
                name,
                format!(
                    "has {} components but the world is {}D",
                    components.len(),
                    self.dimension().count()
                ),
            ));
        }
        Ok(vector)
    }

    /// Adds a body and returns its id
    ///
    /// Fails with `InvalidParameter` for non-positive mass or radius, a
    /// negative temperature, position/velocity of the wrong dimension or
    /// with non-finite components, or a mass that would push the world's
    /// total mass past `f64::MAX`. On failure the world is unchanged.
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId> {
        self.try_add_body(spec).inspect_err(|e| warn!("rejected body: {e}"))
    }

    fn try_add_body(&mut self, spec: BodySpec) -> Result<BodyId> {
        let position = self.vector_in_world("position", &spec.position)?;
        let velocity = self.vector_in_world("velocity", &spec.velocity)?;

        let mut state = classify(spec.mass, spec.radius, spec.temperature)?;
        // Keeps every merge representable: a merged mass never exceeds the total
        if !(self.total_mass() + spec.mass).is_finite() {
            return Err(SimError::invalid(
                "mass",
                format!("{} would overflow the world's total mass", spec.mass),
            ));
        }
        if let Some(texture) = spec.texture_ref {
            state = state.with_texture(texture);
        }
        let name = spec
            .name
            .unwrap_or_else(|| format!("Planet #{}", self.bodies.len()));

        let mut body = Body::new(BodyId(self.next_id), state, position, velocity, spec.spin, name)?;
        body.set_fixed(spec.fixed);
        let id = self.allocate_id();
        debug!("added body {id} ({}, {:?})", body.name, body.class());
        self.bodies.push(body);
        Ok(id)
    }

    /// Removes one body, returning it
    pub fn remove_body(&mut self, id: BodyId) -> Result<Body> {
        let idx = self
            .bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(SimError::UnknownBodyId(id))?;
        Ok(self.bodies.remove(idx))
    }

    /// Removes every body; ids are not reused afterwards
    pub fn remove_all(&mut self) {
        info!("clearing {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    pub fn set_parameter(&mut self, parameter: Parameter) -> Result<()> {
        self.config
            .apply(parameter)
            .inspect_err(|e| warn!("rejected parameter {parameter:?}: {e}"))
    }

    /// Fails with `InvalidParameter` for non-finite components or a fixed body
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vector) -> Result<()> {
        let body = self.body_mut(id)?;
        body.position.ensure_same_dimension(&velocity)?;
        check_finite("velocity", &velocity)?;
        if body.fixed {
            return Err(SimError::invalid("velocity", format!("body {id} is fixed")));
        }
        body.velocity = velocity;
        Ok(())
    }

    /// Moves a body, fixed ones included
    ///
    /// Fails with `InvalidParameter` for non-finite components.
    pub fn set_position(&mut self, id: BodyId, position: Vector) -> Result<()> {
        let body = self.body_mut(id)?;
        body.position.ensure_same_dimension(&position)?;
        check_finite("position", &position)?;
        body.position = position;
        Ok(())
    }

    /// Anchors a body in place or releases it
    pub fn set_fixed(&mut self, id: BodyId, fixed: bool) -> Result<()> {
        self.body_mut(id)?.set_fixed(fixed);
        Ok(())
    }

    /// Flips the selection flag of one body, returning the new value
    pub fn toggle_selection(&mut self, id: BodyId) -> Result<bool> {
        Ok(self.body_mut(id)?.toggle_selected())
    }

    /// Selects one body and deselects all others
    pub fn select(&mut self, id: BodyId) -> Result<()> {
        self.body(id)?;
        for body in &mut self.bodies {
            body.selected = body.id == id;
        }
        Ok(())
    }

    /// First selected body, if any
    pub fn selected(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.selected)
    }

    /// Advances the simulation by one tick of `dt`
    ///
    /// 1. Each non-fixed body (in order) is checked against every other live
    ///    body; the first overlap is resolved with the configured collision
    ///    mode and ends that body's scan. A merged pair is removed from
    ///    further consideration this step, and a bounced pair is not
    ///    resolved again from the partner's side.
    /// 2. Bodies untouched by a collision, and not fixed, get the
    ///    gravitational pull of all live bodies and are kicked by
    ///    `dt * time_factor`.
    /// 3. Merged pairs are removed and their replacements appended.
    /// 4. Every remaining body drifts by `dt * time_factor`; fixed bodies
    ///    only rotate.
    ///
    /// A paused world returns an empty report and does not change.
    ///
    /// Fails with `InvalidParameter` unless `dt` is finite and positive, and
    /// with `MergeOverflow` if a merge is not representable. A failed step
    /// leaves the world unchanged.
    pub fn step(&mut self, dt: f64) -> Result<StepReport> {
        ensure_positive("dt", dt)?;
        if self.config.paused {
            return Ok(StepReport::default());
        }

        let n = self.bodies.len();
        let mut removed = vec![false; n];
        let mut involved = vec![false; n];
        let mut additions = Vec::new();
        let mut report = StepReport::default();

        let mut resolved: Vec<(usize, usize)> = Vec::new();

        for i in 0..n {
            if removed[i] || self.bodies[i].fixed {
                continue;
            }
            let Some((j, event)) = first_contact(&self.bodies, i, &removed)? else {
                continue;
            };
            if resolved.contains(&(j, i)) {
                continue;
            }
            resolved.push((i, j));
            involved[i] = true;
            involved[j] = true;

            match self.config.collision_mode {
                CollisionMode::Merge => {
                    let id = BodyId(self.next_id + additions.len() as u32);
                    let merged = merge_bodies(&self.bodies[i], &self.bodies[j], id)?;
                    debug!("merged {} and {} into {id}", event.body_a, event.body_b);
                    removed[i] = true;
                    removed[j] = true;
                    additions.push(merged);
                    report.merges.push(MergeRecord { event, merged: id });
                }
                CollisionMode::Bounce => {
                    let (a, b) = pair_mut(&mut self.bodies, i, j);
                    if bounce_bodies(a, b, self.config.restitution)? {
                        debug!("bounced {} off {}", event.body_a, event.body_b);
                    }
                    report.bounces.push(event);
                }
            }
        }

        // Ids are reserved only once every merge of the step succeeded
        self.next_id += additions.len() as u32;

        let gravity = DirectGravity::new(self.config.gravitational_constant);
        let integrator = self.config.integrator.integrator();
        let scaled_dt = dt * self.config.time_factor;

        let mut accelerations = Vec::with_capacity(n);
        for (i, body) in self.bodies.iter().enumerate() {
            let acceleration = if removed[i] || involved[i] || body.fixed {
                None
            } else {
                Some(gravity.force_on(i, &self.bodies, &removed)?.divide(body.mass()))
            };
            accelerations.push(acceleration);
        }

        for (body, acceleration) in self.bodies.iter_mut().zip(&accelerations) {
            match acceleration {
                Some(a) => integrator.kick(body, a, scaled_dt)?,
                None => body.last_acceleration = Vector::zeros(body.dimension()),
            }
        }

        let mut idx = 0;
        self.bodies.retain(|_| {
            let keep = !removed[idx];
            idx += 1;
            keep
        });
        self.bodies.extend(additions);

        for body in &mut self.bodies {
            integrator.drift(body, dt, self.config.time_factor)?;
        }
        self.time += scaled_dt;

        trace!("step done: t = {}, {} bodies", self.time, self.bodies.len());
        Ok(report)
    }

    /// Owned copy of every body, in world order
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            time: self.time,
            bodies: self.bodies.iter().map(BodySnapshot::from).collect(),
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    pub fn total_momentum(&self) -> Result<Vector> {
        self.bodies
            .iter()
            .try_fold(Vector::zeros(self.dimension()), |mut total, b| -> Result<Vector> {
                total.accumulate(&b.momentum())?;
                Ok(total)
            })
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    pub fn potential_energy(&self) -> Result<f64> {
        DirectGravity::new(self.config.gravitational_constant).potential_energy(&self.bodies)
    }
}

fn check_finite(name: &'static str, vector: &Vector) -> Result<()> {
    if vector.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("{vector} has non-finite components")))
    }
}

/// Two distinct mutable bodies out of one slice
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
