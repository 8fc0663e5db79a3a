//! Runtime configuration for sum-check sessions.
//!
//! ```rust
//! use sumcheck_ip::config::{ChallengeSourceKind, SumCheckConfig};
//!
//! let config = SumCheckConfig {
//!     challenge_source: ChallengeSourceKind::Transcript,
//!     parallel_threshold: 4096,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SumCheckError};
use crate::field::SumCheckField;
use crate::polynomial::multilinear::PARALLEL_THRESHOLD;
use crate::sumcheck::challenge::{ChallengeSource, RngChallenger, TranscriptChallenger};

/// Where the verifier's challenges come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeSourceKind {
    /// Operating system CSPRNG (interactive protocol)
    Os,
    /// Fiat-Shamir over a transcript labelled with `transcript_label`
    Transcript,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumCheckConfig {
    /// Sub-cube size from which the prover splits its sums across rayon workers
    pub parallel_threshold: usize,

    /// Domain separator for Fiat-Shamir transcripts
    pub transcript_label: String,

    pub challenge_source: ChallengeSourceKind,

    /// Largest arity accepted by [`crate::sumcheck::run_sumcheck`]
    pub max_num_vars: usize,
}

impl Default for SumCheckConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: PARALLEL_THRESHOLD,
            transcript_label: "sumcheck-ip".to_string(),
            challenge_source: ChallengeSourceKind::Os,
            max_num_vars: 30,
        }
    }
}

impl SumCheckConfig {
    /// Fresh OS randomness every round
    pub fn interactive() -> Self {
        Self::default()
    }

    /// Challenges derived from the transcript; reproducible for a given statement
    pub fn non_interactive() -> Self {
        Self {
            challenge_source: ChallengeSourceKind::Transcript,
            ..Default::default()
        }
    }

    /// Deterministic and small: the parallel path is taken even for tiny
    /// oracles so both code paths get exercised.
    pub fn test() -> Self {
        Self {
            parallel_threshold: 4,
            transcript_label: "sumcheck-ip-test".to_string(),
            challenge_source: ChallengeSourceKind::Transcript,
            max_num_vars: 20,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(SumCheckError::InvalidParameter(
                "parallel_threshold must be positive".into(),
            ));
        }
        if self.transcript_label.is_empty() {
            return Err(SumCheckError::InvalidParameter(
                "transcript_label must not be empty".into(),
            ));
        }
        if self.max_num_vars == 0 {
            return Err(SumCheckError::InvalidParameter(
                "max_num_vars must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Build the configured challenge source
    pub fn challenger<F: SumCheckField>(&self) -> Box<dyn ChallengeSource<F> + Send> {
        match self.challenge_source {
            ChallengeSourceKind::Os => Box::new(RngChallenger::from_os()),
            ChallengeSourceKind::Transcript => {
                Box::new(TranscriptChallenger::new(self.transcript_label.as_bytes()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Fp61;
    use crate::polynomial::DegreeBounds;

    #[test]
    fn default_config_is_valid() {
        let config = SumCheckConfig::default();
        assert_eq!(config.parallel_threshold, 1024);
        assert_eq!(config.transcript_label, "sumcheck-ip");
        assert_eq!(config.challenge_source, ChallengeSourceKind::Os);
        assert_eq!(config.max_num_vars, 30);
        config.validate().unwrap();
        SumCheckConfig::non_interactive().validate().unwrap();
        SumCheckConfig::test().validate().unwrap();
    }

    #[test]
    fn invalid_configs_rejected() {
        let zero_threshold = SumCheckConfig {
            parallel_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_threshold.validate(),
            Err(SumCheckError::InvalidParameter(_))
        ));

        let empty_label = SumCheckConfig {
            transcript_label: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            empty_label.validate(),
            Err(SumCheckError::InvalidParameter(_))
        ));
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = SumCheckConfig::test();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"Transcript\""));
        let decoded: SumCheckConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn transcript_challenger_is_deterministic_per_label() {
        let bounds = DegreeBounds::multilinear(1).unwrap();
        let sample = |config: &SumCheckConfig| -> Fp61 {
            let mut source = config.challenger::<Fp61>();
            source.observe_statement(&Fp61::from(1u64), &bounds);
            source.sample(1).unwrap()
        };

        let config = SumCheckConfig::test();
        assert_eq!(sample(&config), sample(&config));

        let relabelled = SumCheckConfig {
            transcript_label: "other".to_string(),
            ..SumCheckConfig::test()
        };
        assert_ne!(sample(&config), sample(&relabelled));
    }
}
