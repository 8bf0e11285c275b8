//! Picks a candidate that has a photo, with a bounded number of probes.

use rand::Rng;
use tracing::debug;

use super::{Pick, QuizError};
use crate::config::QuizConfig;
use crate::lookup::KnowledgeBase;

/// Random thumbnail probing with a deterministic fallback.
///
/// Each attempt draws a uniformly random candidate and asks for its
/// thumbnail; the first candidate with one wins. After `max_attempts`
/// misses the first candidate is returned with whatever thumbnail it has,
/// possibly none.
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    max_attempts: u32,
}

impl CandidateSelector {
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            max_attempts: config.max_pick_attempts,
        }
    }

    /// Select a pick from `candidates`.
    ///
    /// Any lookup failure aborts the selection.
    pub async fn select<R: Rng + Send>(
        &self,
        kb: &dyn KnowledgeBase,
        candidates: &[String],
        rng: &mut R,
    ) -> Result<Pick, QuizError> {
        let Some(first) = candidates.first() else {
            return Err(QuizError::NoCandidates);
        };

        for attempt in 1..=self.max_attempts {
            let name = &candidates[rng.gen_range(0..candidates.len())];
            if let Some(thumbnail) = kb.fetch_thumbnail(name).await? {
                debug!("Picked '{}' on attempt {}", name, attempt);
                return Ok(Pick {
                    name: name.clone(),
                    thumbnail: Some(thumbnail),
                });
            }
        }

        debug!(
            "No photo after {} attempts, falling back to '{}'",
            self.max_attempts, first
        );
        let thumbnail = kb.fetch_thumbnail(first).await?;
        Ok(Pick {
            name: first.clone(),
            thumbnail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupError;
    use crate::testing::MockKnowledgeBase;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn selector() -> CandidateSelector {
        CandidateSelector::new(&QuizConfig::default())
    }

    #[tokio::test]
    async fn test_first_hit_wins() {
        let kb = MockKnowledgeBase::new();
        kb.set_thumbnail("Max Planck", "https://img.example/planck.jpg")
            .await;

        // StepRng(0, 0) always draws index 0
        let mut rng = StepRng::new(0, 0);
        let pick = selector()
            .select(&kb, &names(&["Max Planck", "Niels Bohr"]), &mut rng)
            .await
            .unwrap();

        assert_eq!(pick.name, "Max Planck");
        assert_eq!(pick.thumbnail.as_deref(), Some("https://img.example/planck.jpg"));
        assert_eq!(kb.thumbnail_count().await, 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_first_after_max_attempts() {
        let kb = MockKnowledgeBase::new();

        let mut rng = StdRng::seed_from_u64(1);
        let pick = selector()
            .select(&kb, &names(&["Lise Meitner", "Emmy Noether"]), &mut rng)
            .await
            .unwrap();

        assert_eq!(pick.name, "Lise Meitner");
        assert!(pick.thumbnail.is_none());
        // 10 random probes plus the fallback lookup
        assert_eq!(kb.thumbnail_count().await, 11);
    }

    #[tokio::test]
    async fn test_fallback_keeps_late_thumbnail() {
        let kb = MockKnowledgeBase::new();
        kb.set_thumbnail("Enrico Fermi", "https://img.example/fermi.jpg")
            .await;

        // Always probes "Nameless", which has no photo
        let mut rng = StepRng::new(0, 0);
        let config = QuizConfig {
            max_pick_attempts: 3,
            ..Default::default()
        };
        let pick = CandidateSelector::new(&config)
            .select(&kb, &names(&["Nameless", "Enrico Fermi"]), &mut rng)
            .await
            .unwrap();

        assert_eq!(pick.name, "Nameless");
        assert!(pick.thumbnail.is_none());
        assert_eq!(kb.thumbnail_count().await, 4);
    }

    #[tokio::test]
    async fn test_pick_is_always_a_candidate() {
        let kb = MockKnowledgeBase::new();
        let list = names(&["A", "B", "C", "D"]);
        kb.set_thumbnail("C", "https://img.example/c.jpg").await;

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pick = selector().select(&kb, &list, &mut rng).await.unwrap();
            assert!(list.contains(&pick.name));
        }
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let kb = MockKnowledgeBase::new();
        let mut rng = StdRng::seed_from_u64(0);
        let result = selector().select(&kb, &[], &mut rng).await;
        assert!(matches!(result, Err(QuizError::NoCandidates)));
        assert_eq!(kb.lookup_count().await, 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_aborts() {
        let kb = MockKnowledgeBase::new();
        kb.set_next_error(LookupError::ParseError("truncated".to_string()))
            .await;

        let mut rng = StdRng::seed_from_u64(0);
        let result = selector().select(&kb, &names(&["A"]), &mut rng).await;

        assert!(matches!(result, Err(QuizError::Lookup(_))));
        assert_eq!(kb.thumbnail_count().await, 1);
    }
}
