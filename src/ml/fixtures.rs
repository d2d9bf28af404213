// Test-only classifier with hand-picked outputs.
//
// Each rule is (fragment, P(Negative)). The first rule whose
// fragment occurs in the text decides the probabilities; text
// matching no rule gets an even 0.5 / 0.5 split. Every call is
// recorded so tests can check what text reached the classifier.

use std::cell::RefCell;

use crate::domain::sentiment::SentimentResult;
use crate::domain::traits::SentimentClassifier;
use crate::error::Result;

pub struct ScriptedClassifier {
    rules: Vec<(String, f64)>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(rules: &[(&str, f64)]) -> Self {
        Self {
            rules: rules.iter().map(|(f, p)| (f.to_string(), *p)).collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every text passed to classify(), in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SentimentClassifier for ScriptedClassifier {
    fn classify(&self, text: &str) -> Result<SentimentResult> {
        self.calls.borrow_mut().push(text.to_string());
        let p_neg = self
            .rules
            .iter()
            .find(|(fragment, _)| text.contains(fragment.as_str()))
            .map(|(_, p)| *p)
            .unwrap_or(0.5);
        Ok(SentimentResult::from_probabilities([p_neg, 1.0 - p_neg]))
    }
}
