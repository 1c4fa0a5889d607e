use crate::features::domain::feature_set::{Feature, FeatureSet, PartialFeatures};
use crate::shared::classification::{ClassificationResult, Label};

/// Domain interface for a stateless feature classifier.
///
/// `classify` may only read the fields named by `inputs`; the rest of the
/// set it receives can be placeholders.
pub trait Classifier: Send {
    type Label: Label;

    fn inputs(&self) -> &'static [Feature];

    fn classify(&self, features: &FeatureSet) -> ClassificationResult<Self::Label>;

    /// Classifies when every input was extracted, else reports the invalid
    /// label. `None` means the frame itself was unusable.
    fn classify_or_invalid(
        &self,
        features: Option<&PartialFeatures>,
    ) -> ClassificationResult<Self::Label> {
        match features.map(|f| f.select(self.inputs())) {
            Some(Ok(selected)) => self.classify(&selected),
            _ => ClassificationResult::invalid(),
        }
    }
}
