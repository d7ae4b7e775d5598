// Physics world configuration

use super::solver::IntegrationMethod;
use super::spatial_hash::DEFAULT_CELL_SIZE;
use glam::Vec2;

/// Default gravity (screen coordinates: +y points down)
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 9.81);

/// Largest timestep a single `update` will integrate (seconds)
pub const DEFAULT_MAX_TIMESTEP: f32 = 1.0 / 30.0;

/// Physics configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("Spatial hash cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    #[error("Maximum timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("Invalid positional correction: percent = {percent}, slop = {slop}")]
    InvalidCorrection { percent: f32, slop: f32 },
}

/// Tuning for the positional correction applied after impulses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionSettings {
    /// Fraction of the remaining penetration removed per step
    pub percent: f32,
    /// Penetration tolerated without correction
    pub slop: f32,
}

impl Default for CorrectionSettings {
    fn default() -> Self {
        Self {
            percent: 0.2,
            slop: 0.01,
        }
    }
}

/// Settings for a [`PhysicsWorld`](super::PhysicsWorld)
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: Vec2,
    pub cell_size: f32,
    pub max_timestep: f32,
    pub integration_method: IntegrationMethod,
    pub correction: CorrectionSettings,
}

impl PhysicsConfig {
    /// Set the constant acceleration applied to dynamic bodies
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the broad-phase grid cell size
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the largest timestep integrated per `update`
    pub fn with_max_timestep(mut self, max_timestep: f32) -> Self {
        self.max_timestep = max_timestep;
        self
    }

    /// Select the integrator
    pub fn with_integration_method(mut self, method: IntegrationMethod) -> Self {
        self.integration_method = method;
        self
    }

    /// Set positional correction tuning
    pub fn with_correction(mut self, correction: CorrectionSettings) -> Self {
        self.correction = correction;
        self
    }

    /// Check every numeric setting
    pub fn validate(&self) -> Result<(), PhysicsError> {
        validate_cell_size(self.cell_size)?;

        if !(self.max_timestep > 0.0 && self.max_timestep.is_finite()) {
            return Err(PhysicsError::InvalidTimestep(self.max_timestep));
        }

        let CorrectionSettings { percent, slop } = self.correction;
        if !(0.0..=1.0).contains(&percent) || !(slop >= 0.0 && slop.is_finite()) {
            return Err(PhysicsError::InvalidCorrection { percent, slop });
        }

        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            cell_size: DEFAULT_CELL_SIZE,
            max_timestep: DEFAULT_MAX_TIMESTEP,
            integration_method: IntegrationMethod::default(),
            correction: CorrectionSettings::default(),
        }
    }
}

pub(crate) fn validate_cell_size(cell_size: f32) -> Result<(), PhysicsError> {
    if cell_size > 0.0 && cell_size.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidCellSize(cell_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gravity, Vec2::new(0.0, 9.81));
        assert_eq!(config.cell_size, 100.0);
        assert_eq!(config.integration_method, IntegrationMethod::Verlet);
    }

    #[test]
    fn test_builder_methods() {
        let config = PhysicsConfig::default()
            .with_gravity(Vec2::ZERO)
            .with_cell_size(8.0)
            .with_integration_method(IntegrationMethod::LeapFrog);

        assert_eq!(config.gravity, Vec2::ZERO);
        assert_eq!(config.cell_size, 8.0);
        assert_eq!(config.integration_method, IntegrationMethod::LeapFrog);
    }

    #[test]
    fn test_invalid_cell_size() {
        for bad in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let result = PhysicsConfig::default().with_cell_size(bad).validate();
            assert!(matches!(result, Err(PhysicsError::InvalidCellSize(_))));
        }
    }

    #[test]
    fn test_invalid_timestep() {
        let result = PhysicsConfig::default().with_max_timestep(0.0).validate();
        assert_eq!(result, Err(PhysicsError::InvalidTimestep(0.0)));
    }

    #[test]
    fn test_invalid_correction() {
        let correction = CorrectionSettings {
            percent: 1.5,
            ..CorrectionSettings::default()
        };
        let config = PhysicsConfig::default().with_correction(correction);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidCorrection { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PhysicsError::InvalidCellSize(-1.0);
        assert_eq!(
            err.to_string(),
            "Spatial hash cell size must be positive and finite, got -1"
        );
    }
}
