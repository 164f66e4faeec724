// Batch keyword index: what each existing deck batch talks about.

use std::collections::BTreeMap;

use crate::deck::record::QuestionRecord;
use crate::topics::keywords::KeywordSet;
use crate::topics::traits::KeywordExtractor;

/// Keyword set per batch, keyed by batch name.
#[derive(Debug, Clone, Default)]
pub struct BatchIndex {
    batches: BTreeMap<String, KeywordSet>,
}

impl BatchIndex {
    /// Index the keywords of `batch + " " + question` for every record that
    /// has both a batch and a question.
    pub fn from_records(records: &[QuestionRecord], extractor: &dyn KeywordExtractor) -> Self {
        let mut batches: BTreeMap<String, KeywordSet> = BTreeMap::new();
        for record in records {
            let batch = record.batch.trim();
            let question = record.question.trim();
            if batch.is_empty() || question.is_empty() {
                continue;
            }
            let keywords = extractor.keywords(&format!("{batch} {question}"));
            batches.entry(batch.to_string()).or_default().extend(keywords);
        }
        Self { batches }
    }

    /// Build an index directly from keyword sets.
    pub fn from_sets<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = (String, KeywordSet)>,
    {
        Self {
            batches: sets.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn get(&self, batch: &str) -> Option<&KeywordSet> {
        self.batches.get(batch)
    }

    /// Batches in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeywordSet)> {
        self.batches.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::record::Correct;
    use crate::topics::keywords::TokenKeywords;

    fn q(question: &str, batch: &str) -> QuestionRecord {
        QuestionRecord {
            question: question.to_string(),
            choice_a: "a".to_string(),
            choice_b: "b".to_string(),
            choice_c: "c".to_string(),
            choice_d: "d".to_string(),
            correct: Correct::A,
            explanation: String::new(),
            tags: String::new(),
            source: String::new(),
            batch: batch.to_string(),
        }
    }

    #[test]
    fn test_keywords_union_per_batch() {
        let records = vec![
            q("What does peering connect?", "Networking::Peering"),
            q("Is peering transitive?", "Networking::Peering"),
            q("Unbatched question", ""),
            q("", "Empty::Question"),
        ];
        let index = BatchIndex::from_records(&records, &TokenKeywords::new(3));
        assert_eq!(index.len(), 1);
        let kw = index.get("Networking::Peering").unwrap();
        for word in ["networking", "peering", "connect", "transitive"] {
            assert!(kw.contains(word), "missing {word}");
        }
    }
}
