//! Engine configuration.
//!
//! Defaults are compiled in; a TOML file and `DREAMTEAM_*` environment
//! variables can patch individual values. Explicit path wins over the
//! global config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub assembly: AssemblyConfig,
}

/// Tunables for the per-(researcher, skill) affinity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the structured (sparse keyword) component; the
    /// conceptual (embedding) component gets `1 - alpha`.
    pub alpha: f64,
    /// Years until a publication's recency weight decays to zero.
    pub half_life_years: f64,
    /// Fraction of the peak similarity a publication must reach to count
    /// toward the density bonus.
    pub density_threshold: f64,
    /// Upper bound on the density bonus added to the conceptual peak.
    pub density_bonus_cap: f64,
    pub role_weights: RoleWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alpha: 0.7,
            half_life_years: 10.0,
            density_threshold: 0.85,
            density_bonus_cap: 0.15,
            role_weights: RoleWeights::default(),
        }
    }
}

/// Per-role weights for the grant experience factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWeights {
    pub pi: f64,
    pub co_pi: f64,
    pub senior_personnel: f64,
    pub other: f64,
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self {
            pi: 1.0,
            co_pi: 0.6,
            senior_personnel: 0.3,
            other: 0.2,
        }
    }
}

/// Tunables for team assembly and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Greedy stops once the team has reached the minimum size and the
    /// best remaining gain falls below this value (0-100 scale).
    pub epsilon: f64,
    /// Score at or above which a candidate counts as a strong scorer
    /// when the hybrid strategy ranks skills by scarcity.
    pub high_score_threshold: f64,
    /// Required skills whose achieved coverage stays below this value
    /// are reported as gaps.
    pub gap_threshold: f64,
    pub min_team_size: usize,
    pub max_team_size: usize,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-3,
            high_score_threshold: 60.0,
            gap_threshold: 40.0,
            min_team_size: 3,
            max_team_size: 8,
        }
    }
}

impl EngineConfig {
    /// Load configuration: defaults, patched by the global file (if
    /// present), an explicit file (`--config` or `DREAMTEAM_CONFIG`),
    /// then environment overrides. Validates the merged result.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("DREAMTEAM_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else if let Some(patch) = Self::load_global()? {
            config.merge_patch(patch);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&config_dir.join("dreamteam/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| EngineError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| EngineError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(scoring) = patch.scoring {
            self.scoring.merge(scoring);
        }
        if let Some(assembly) = patch.assembly {
            self.assembly.merge(assembly);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_f64("DREAMTEAM_ALPHA")? {
            self.scoring.alpha = value;
        }
        if let Some(value) = env_f64("DREAMTEAM_HALF_LIFE_YEARS")? {
            self.scoring.half_life_years = value;
        }
        if let Some(value) = env_f64("DREAMTEAM_EPSILON")? {
            self.assembly.epsilon = value;
        }
        if let Some(value) = env_f64("DREAMTEAM_GAP_THRESHOLD")? {
            self.assembly.gap_threshold = value;
        }
        Ok(())
    }

    /// Reject values that would make scoring or assembly meaningless.
    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        if !(0.0..=1.0).contains(&s.alpha) {
            return Err(EngineError::Config(format!(
                "scoring.alpha must be in [0, 1], got {}",
                s.alpha
            )));
        }
        if s.half_life_years <= 0.0 {
            return Err(EngineError::Config(format!(
                "scoring.half_life_years must be positive, got {}",
                s.half_life_years
            )));
        }
        if !(0.0..=1.0).contains(&s.density_threshold) {
            return Err(EngineError::Config(format!(
                "scoring.density_threshold must be in [0, 1], got {}",
                s.density_threshold
            )));
        }
        if s.density_bonus_cap < 0.0 {
            return Err(EngineError::Config(format!(
                "scoring.density_bonus_cap must be non-negative, got {}",
                s.density_bonus_cap
            )));
        }
        for (name, weight) in [
            ("pi", s.role_weights.pi),
            ("co_pi", s.role_weights.co_pi),
            ("senior_personnel", s.role_weights.senior_personnel),
            ("other", s.role_weights.other),
        ] {
            if weight < 0.0 {
                return Err(EngineError::Config(format!(
                    "scoring.role_weights.{name} must be non-negative, got {weight}"
                )));
            }
        }

        let a = &self.assembly;
        if a.epsilon < 0.0 {
            return Err(EngineError::Config(format!(
                "assembly.epsilon must be non-negative, got {}",
                a.epsilon
            )));
        }
        if a.min_team_size == 0 {
            return Err(EngineError::Config(
                "assembly.min_team_size must be positive".to_string(),
            ));
        }
        if a.max_team_size < a.min_team_size {
            return Err(EngineError::Config(format!(
                "assembly.max_team_size ({}) below min_team_size ({})",
                a.max_team_size, a.min_team_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    scoring: Option<ScoringPatch>,
    assembly: Option<AssemblyPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ScoringPatch {
    alpha: Option<f64>,
    half_life_years: Option<f64>,
    density_threshold: Option<f64>,
    density_bonus_cap: Option<f64>,
    role_weights: Option<RoleWeightsPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RoleWeightsPatch {
    pi: Option<f64>,
    co_pi: Option<f64>,
    senior_personnel: Option<f64>,
    other: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct AssemblyPatch {
    epsilon: Option<f64>,
    high_score_threshold: Option<f64>,
    gap_threshold: Option<f64>,
    min_team_size: Option<usize>,
    max_team_size: Option<usize>,
}

impl ScoringConfig {
    fn merge(&mut self, patch: ScoringPatch) {
        if let Some(alpha) = patch.alpha {
            self.alpha = alpha;
        }
        if let Some(half_life) = patch.half_life_years {
            self.half_life_years = half_life;
        }
        if let Some(threshold) = patch.density_threshold {
            self.density_threshold = threshold;
        }
        if let Some(cap) = patch.density_bonus_cap {
            self.density_bonus_cap = cap;
        }
        if let Some(roles) = patch.role_weights {
            if let Some(pi) = roles.pi {
                self.role_weights.pi = pi;
            }
            if let Some(co_pi) = roles.co_pi {
                self.role_weights.co_pi = co_pi;
            }
            if let Some(senior) = roles.senior_personnel {
                self.role_weights.senior_personnel = senior;
            }
            if let Some(other) = roles.other {
                self.role_weights.other = other;
            }
        }
    }
}

impl AssemblyConfig {
    fn merge(&mut self, patch: AssemblyPatch) {
        if let Some(epsilon) = patch.epsilon {
            self.epsilon = epsilon;
        }
        if let Some(threshold) = patch.high_score_threshold {
            self.high_score_threshold = threshold;
        }
        if let Some(threshold) = patch.gap_threshold {
            self.gap_threshold = threshold;
        }
        if let Some(min) = patch.min_team_size {
            self.min_team_size = min;
        }
        if let Some(max) = patch.max_team_size {
            self.max_team_size = max;
        }
    }
}

fn env_f64(name: &str) -> Result<Option<f64>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|err| EngineError::Config(format!("{name}: {err}"))),
        Err(_) => Ok(None),
    }
}
