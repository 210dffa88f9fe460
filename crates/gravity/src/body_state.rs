//! Derived physical state of a body
//!
//! A [`BodyState`] is computed once from mass, radius and temperature and is
//! never mutated afterwards. Merging two bodies builds a fresh state from
//! the merged properties.

use crate::error::{Result, ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Bodies hotter than this (K) are stars, whatever their density
pub const STAR_TEMPERATURE: f64 = 2000.0;
/// Stars hotter than this (K) render blue
pub const BLUE_STAR_TEMPERATURE: f64 = 10_000.0;
/// Stars hotter than this (K) render white; cooler stars render red
pub const WHITE_STAR_TEMPERATURE: f64 = 5000.0;
/// Non-stellar bodies denser than this are rocky, the rest are gaseous
pub const ROCKY_DENSITY: f64 = 2000.0;

pub const STAR_TEXTURE: &str = "/textures/Sun.jpg";
pub const ROCKY_TEXTURE: &str = "/textures/Moon.jpg";
/// Spelled to match the asset file shipped with the web renderer
pub const GAS_TEXTURE: &str = "/textures/Juipter.jpg";

/// Rendering class of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyClass {
    Rocky,
    Gas,
    Star,
}

/// RGB color handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BodyColor {
    pub const BLACK: BodyColor = BodyColor::new(0, 0, 0);
    pub const RED: BodyColor = BodyColor::new(255, 0, 0);
    pub const WHITE: BodyColor = BodyColor::new(255, 255, 255);
    pub const BLUE: BodyColor = BodyColor::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the color as a hex string (e.g., "#FF0000")
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Immutable physical record of a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    mass: f64,
    radius: f64,
    temperature: f64,
    volume: f64,
    density: f64,
    class: BodyClass,
    texture_ref: String,
    color: BodyColor,
}

/// Volume of a sphere of the given radius
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3)
}

/// Classifies a body from its temperature and density
///
/// The temperature test runs first: a hot body is a star even when it is
/// dense enough to count as rocky.
pub fn classify_class(temperature: f64, density: f64) -> BodyClass {
    if temperature > STAR_TEMPERATURE {
        BodyClass::Star
    } else if density > ROCKY_DENSITY {
        BodyClass::Rocky
    } else {
        BodyClass::Gas
    }
}

fn default_appearance(class: BodyClass, temperature: f64) -> (&'static str, BodyColor) {
    match class {
        BodyClass::Star => {
            let color = if temperature > BLUE_STAR_TEMPERATURE {
                BodyColor::BLUE
            } else if temperature > WHITE_STAR_TEMPERATURE {
                BodyColor::WHITE
            } else {
                BodyColor::RED
            };
            (STAR_TEXTURE, color)
        }
        BodyClass::Rocky => (ROCKY_TEXTURE, BodyColor::BLACK),
        BodyClass::Gas => (GAS_TEXTURE, BodyColor::BLACK),
    }
}

/// Builds the state for a body of the given mass, radius and temperature
///
/// Fails with `InvalidParameter` if mass or radius is not strictly positive,
/// or if temperature is negative.
///
/// # Examples
///
/// ```
/// use gravity::body_state::{classify, BodyClass, BodyColor};
///
/// let sun = classify(1000.0, 20.0, 5778.0).unwrap();
/// assert_eq!(sun.class(), BodyClass::Star);
/// assert_eq!(sun.color(), BodyColor::WHITE);
///
/// let earth = classify(50.0, 10.0, 288.0).unwrap();
/// assert_eq!(earth.class(), BodyClass::Gas);
/// ```
pub fn classify(mass: f64, radius: f64, temperature: f64) -> Result<BodyState> {
    ensure_positive("mass", mass)?;
    ensure_positive("radius", radius)?;
    ensure_non_negative("temperature", temperature)?;

    let volume = sphere_volume(radius);
    let density = mass / volume;
    let class = classify_class(temperature, density);
    let (texture, color) = default_appearance(class, temperature);

    Ok(BodyState {
        mass,
        radius,
        temperature,
        volume,
        density,
        class,
        texture_ref: texture.to_string(),
        color,
    })
}

impl BodyState {
    /// Same state with a caller-chosen texture
    pub fn with_texture(mut self, texture_ref: impl Into<String>) -> Self {
        self.texture_ref = texture_ref.into();
        self
    }

    /// Same state with a caller-chosen color
    pub fn with_color(mut self, color: BodyColor) -> Self {
        self.color = color;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn class(&self) -> BodyClass {
        self.class
    }

    pub fn texture_ref(&self) -> &str {
        &self.texture_ref
    }

    pub fn color(&self) -> BodyColor {
        self.color
    }
}
