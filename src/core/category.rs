use crate::domain::model::CategoryVocabulary;

/// Picks the first vocabulary entry contained in the utterance.
///
/// Vocabulary order decides ties, not position in the text.
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    vocabulary: CategoryVocabulary,
}

impl CategoryClassifier {
    pub fn new(vocabulary: CategoryVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &CategoryVocabulary {
        &self.vocabulary
    }

    pub fn classify(&self, text: &str) -> &str {
        let lowered = text.to_lowercase();

        match self
            .vocabulary
            .categories()
            .iter()
            .find(|category| lowered.contains(category.as_str()))
        {
            Some(category) => {
                tracing::debug!("Category '{}' matched", category);
                category.as_str()
            }
            None => {
                tracing::debug!(
                    "No category keyword, using '{}'",
                    self.vocabulary.default_category()
                );
                self.vocabulary.default_category()
            }
        }
    }
}
