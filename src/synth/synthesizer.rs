use rand::Rng;
use tracing::debug;

use crate::error::ClassifierError;
use crate::glyph::encoder::EncodedVector;
use crate::synth::example::{Exemplar, TrainingExample};

/// Builds training sets out of uniformly random negatives plus a few exemplars.
///
/// Random draws are not checked against the exemplars: a negative that happens
/// to equal an exemplar input stays in the set with its conflicting label.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSetSynthesizer {
    vector_length: usize,
    class_count: usize,
}

impl TrainingSetSynthesizer {
    pub fn new(vector_length: usize, class_count: usize) -> TrainingSetSynthesizer {
        TrainingSetSynthesizer { vector_length, class_count }
    }

    pub fn vector_length(&self) -> usize {
        self.vector_length
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// `count` random negatives followed by one one-hot example per exemplar,
    /// in exemplar order.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        count: usize,
        exemplars: &[Exemplar],
        rng: &mut R,
    ) -> Result<Vec<TrainingExample>, ClassifierError> {
        for exemplar in exemplars {
            if exemplar.input.len() != self.vector_length {
                return Err(ClassifierError::InputWidth {
                    expected: self.vector_length,
                    actual: exemplar.input.len(),
                });
            }
            if exemplar.class_index >= self.class_count {
                return Err(ClassifierError::ClassIndexOutOfRange {
                    index: exemplar.class_index,
                    classes: self.class_count,
                });
            }
        }

        let mut set = self.random_negatives(count, rng);
        set.extend(exemplars.iter().map(|e| {
            TrainingExample::one_hot(e.input.clone(), e.class_index, self.class_count)
        }));

        debug!(
            negatives = count,
            exemplars = exemplars.len(),
            vector_length = self.vector_length,
            "synthesized training set"
        );
        Ok(set)
    }

    fn random_negatives<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<TrainingExample> {
        (0..count)
            .map(|_| {
                let input: EncodedVector = (0..self.vector_length)
                    .map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 })
                    .collect();
                TrainingExample::negative(input, self.class_count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn exemplars() -> Vec<Exemplar> {
        vec![
            Exemplar::new(vec![1.0, 0.0, 1.0, 0.0], 2),
            Exemplar::new(vec![0.0, 1.0, 1.0, 0.0], 0),
        ]
    }

    #[test]
    fn size_is_negatives_plus_exemplars() {
        let mut rng = StdRng::seed_from_u64(9);
        let synth = TrainingSetSynthesizer::new(4, 3);
        let set = synth.synthesize(250, &exemplars(), &mut rng).unwrap();
        assert_eq!(set.len(), 252);
        assert_eq!(set[250].output, vec![0.0, 0.0, 1.0]);
        assert_eq!(set[250].input, vec![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(set[251].output, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn negatives_are_binary_and_unlabeled() {
        let mut rng = StdRng::seed_from_u64(10);
        let set = TrainingSetSynthesizer::new(7, 2).synthesize(100, &[], &mut rng).unwrap();
        assert_eq!(set.len(), 100);
        for ex in &set {
            assert_eq!(ex.input.len(), 7);
            assert!(ex.input.iter().all(|&v| v == 0.0 || v == 1.0));
            assert_eq!(ex.output, vec![0.0, 0.0]);
        }
        // A fair coin over 700 draws is never all one value in practice.
        let ones = set.iter().flat_map(|e| &e.input).filter(|&&v| v == 1.0).count();
        assert!(ones > 200 && ones < 500, "ones = {ones}");
    }

    #[test]
    fn zero_count_keeps_only_exemplars() {
        let mut rng = StdRng::seed_from_u64(11);
        let synth = TrainingSetSynthesizer::new(4, 3);
        assert_eq!(synth.vector_length(), 4);
        assert_eq!(synth.class_count(), 3);
        let set = synth.synthesize(0, &exemplars(), &mut rng).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn colliding_negative_keeps_its_conflicting_label() {
        let mut rng = StdRng::seed_from_u64(14);
        let exemplar = [Exemplar::new(vec![1.0], 0)];
        let set = TrainingSetSynthesizer::new(1, 1).synthesize(64, &exemplar, &mut rng).unwrap();
        assert_eq!(set.len(), 65);
        // 64 fair draws over a single bit all being 0 has probability 2^-64.
        assert!(set[..64].iter().any(|e| e.input == vec![1.0] && e.output == vec![0.0]));
        let last = &set[64];
        assert_eq!(last.input, vec![1.0]);
        assert_eq!(last.output, vec![1.0]);
    }

    #[test]
    fn out_of_range_class_is_rejected() {
        let mut rng = StdRng::seed_from_u64(12);
        let bad = [Exemplar::new(vec![1.0; 4], 3)];
        let err = TrainingSetSynthesizer::new(4, 3).synthesize(5, &bad, &mut rng).unwrap_err();
        assert!(matches!(err, ClassifierError::ClassIndexOutOfRange { index: 3, classes: 3 }));
    }

    #[test]
    fn wrong_length_exemplar_is_rejected() {
        let mut rng = StdRng::seed_from_u64(13);
        let bad = [Exemplar::new(vec![1.0; 5], 0)];
        assert!(TrainingSetSynthesizer::new(4, 1).synthesize(5, &bad, &mut rng).is_err());
    }
}
