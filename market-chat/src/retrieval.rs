//! Keyword retrieval over the knowledge base
//!
//! Scores documents by normalized keyword overlap with the query. Hits on a
//! document's product name weigh double: a question naming a market should
//! surface that market first.

use crate::knowledge::{Document, KnowledgeBase};
use product_matching::normalize::extract_keywords;

pub struct Retriever {
    k: usize,
}

impl Retriever {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Top-k documents by score; documents scoring zero are excluded.
    pub fn retrieve<'a>(&self, kb: &'a KnowledgeBase, query: &str) -> Vec<&'a Document> {
        let query_keywords = extract_keywords(query);
        if query_keywords.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &Document)> = kb
            .documents()
            .iter()
            .filter_map(|doc| {
                let content_keywords = extract_keywords(&doc.content);
                let mut score = query_keywords.intersection(&content_keywords).count();

                if let Some(name) = doc.metadata.get("product_name").or_else(|| doc.metadata.get("market_name")) {
                    let name_keywords = extract_keywords(name);
                    score += query_keywords.intersection(&name_keywords).count();
                }

                if score > 0 {
                    Some((score, doc))
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(self.k).map(|(_, doc)| doc).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn doc(content: &str, name: Option<&str>) -> Document {
        let mut metadata = BTreeMap::new();
        if let Some(n) = name {
            metadata.insert("product_name".to_string(), n.to_string());
        }
        Document {
            content: content.to_string(),
            doc_type: "unified_market".to_string(),
            metadata,
        }
    }

    #[test]
    fn test_retrieves_matching_document() {
        let kb = KnowledgeBase::from_documents(vec![
            doc("Product: Bitcoin above $100k\nPrice: 0.35", Some("Bitcoin above $100k")),
            doc("Product: US recession 2025\nPrice: 0.32", Some("US recession 2025")),
        ]);

        let results = Retriever::new(5).retrieve(&kb, "What is the Bitcoin market price?");
        assert!(!results.is_empty());
        assert!(results[0].content.contains("Bitcoin"));
    }

    #[test]
    fn test_name_hits_outrank_body_hits() {
        let kb = KnowledgeBase::from_documents(vec![
            doc("Some body text mentioning recession once", None),
            doc("recession analysis document", Some("US recession 2025")),
        ]);

        let results = Retriever::new(5).retrieve(&kb, "recession odds?");
        assert_eq!(results.len(), 2);
        // Name match counts twice, so the named document ranks first
        assert!(results[0].metadata.contains_key("product_name"));
    }

    #[test]
    fn test_unrelated_query_returns_nothing() {
        let kb = KnowledgeBase::from_documents(vec![doc("Bitcoin market data", None)]);
        let results = Retriever::new(5).retrieve(&kb, "olympics gymnastics final");
        assert!(results.is_empty());
    }

    #[test]
    fn test_k_limits_results() {
        let docs: Vec<Document> = (0..10)
            .map(|i| doc(&format!("recession document number {}", i), None))
            .collect();
        let kb = KnowledgeBase::from_documents(docs);

        let results = Retriever::new(3).retrieve(&kb, "recession outlook");
        assert_eq!(results.len(), 3);
    }
}
