use crate::{ConfigErrorResult, DEFAULT_M_COST_KIB, DEFAULT_P_COST, DEFAULT_T_COST, error::ConfigError};

use serde::Deserialize;

// Validation constraints
pub const MIN_M_COST_KIB: u32 = 8;
pub const MAX_M_COST_KIB: u32 = 4_194_304;
pub const MIN_T_COST: u32 = 1;
pub const MAX_T_COST: u32 = 64;
pub const MIN_P_COST: u32 = 1;
pub const MAX_P_COST: u32 = 16;

/// Credential hashing work factor.
///
/// All three Argon2 cost dimensions are configurable; raising them later is
/// safe because cost parameters are embedded in every stored hash.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub m_cost_kib: u32,
    /// Iteration count
    pub t_cost: u32,
    /// Parallelism (lanes)
    pub p_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            m_cost_kib: DEFAULT_M_COST_KIB,
            t_cost: DEFAULT_T_COST,
            p_cost: DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.m_cost_kib < MIN_M_COST_KIB || self.m_cost_kib > MAX_M_COST_KIB {
            return Err(ConfigError::password(format!(
                "password.m_cost_kib must be {}-{}, got {}",
                MIN_M_COST_KIB, MAX_M_COST_KIB, self.m_cost_kib
            )));
        }

        if self.t_cost < MIN_T_COST || self.t_cost > MAX_T_COST {
            return Err(ConfigError::password(format!(
                "password.t_cost must be {}-{}, got {}",
                MIN_T_COST, MAX_T_COST, self.t_cost
            )));
        }

        if self.p_cost < MIN_P_COST || self.p_cost > MAX_P_COST {
            return Err(ConfigError::password(format!(
                "password.p_cost must be {}-{}, got {}",
                MIN_P_COST, MAX_P_COST, self.p_cost
            )));
        }

        Ok(())
    }
}
