//! Sparse keyword vectors.
//!
//! Term-weight maps over a small vocabulary (publication keywords,
//! skill phrases). Stored as an ordered map so iteration, serialization,
//! and similarity are deterministic.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Words carrying no signal in skill phrases or keyword lists.
const STOP_WORDS: &[&str] = &[
    "and", "in", "of", "for", "the", "a", "an", "to", "with", "on", "at", "by", "expertise",
    "experience", "knowledge", "ability", "skills", "understanding", "capacity", "proficiency",
    "e.g", "eg", "including", "such", "as",
];

/// A sparse term-weight vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparseVector {
    weights: BTreeMap<String, f32>,
}

impl SparseVector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Build from explicit term weights. Non-finite and non-positive
    /// weights are dropped.
    #[must_use]
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = (String, f32)>,
    {
        Self {
            weights: weights
                .into_iter()
                .filter(|(_, w)| w.is_finite() && *w > 0.0)
                .collect(),
        }
    }

    /// Build a term-frequency vector from extracted keywords.
    #[must_use]
    pub fn from_terms<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut weights: BTreeMap<String, f32> = BTreeMap::new();
        for term in terms {
            *weights.entry(term.to_string()).or_insert(0.0) += 1.0;
        }
        Self { weights }
    }

    /// Extract keyword terms from a free-text phrase: lowercase, split on
    /// non-word characters, drop stop words, short tokens, and numbers.
    #[must_use]
    pub fn extract_terms(text: &str) -> Vec<String> {
        static SPLITTER: OnceLock<Regex> = OnceLock::new();
        let splitter = SPLITTER.get_or_init(|| Regex::new(r"[^\w-]+").unwrap());

        splitter
            .split(&text.to_lowercase())
            .map(|word| word.trim_matches('-'))
            .filter(|word| {
                word.len() >= 3
                    && !STOP_WORDS.contains(word)
                    && !word.chars().all(|c| c.is_ascii_digit())
            })
            .map(ToString::to_string)
            .collect()
    }

    /// Derive a uniform-frequency vector from a skill phrase.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let terms = Self::extract_terms(text);
        Self::from_terms(terms.iter().map(String::as_str))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn weight(&self, term: &str) -> f32 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Accumulate another vector into this one.
    pub fn add_assign(&mut self, other: &Self) {
        for (term, weight) in &other.weights {
            *self.weights.entry(term.clone()).or_insert(0.0) += weight;
        }
    }

    #[must_use]
    pub fn norm(&self) -> f32 {
        self.weights
            .values()
            .map(|w| w * w)
            .sum::<f32>()
            .sqrt()
    }

    /// Cosine similarity over the shared terms, in [0, 1] for
    /// non-negative weights. Either side empty yields 0.
    #[must_use]
    pub fn cosine(&self, other: &Self) -> f32 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        // Iterate the smaller map and probe the larger one.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let dot: f32 = small
            .weights
            .iter()
            .map(|(term, w)| w * large.weight(term))
            .sum();

        let norm_product = self.norm() * other.norm();
        if norm_product == 0.0 {
            0.0
        } else {
            (dot / norm_product).clamp(0.0, 1.0)
        }
    }
}

impl FromIterator<(String, f32)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        Self::from_weights(iter)
    }
}
