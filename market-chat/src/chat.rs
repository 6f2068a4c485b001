//! Conversational session over the knowledge base

use anyhow::Result;
use tracing::info;

use crate::knowledge::KnowledgeBase;
use crate::retrieval::Retriever;
use common::ChatConfig;
use gemini_client::GeminiClient;

const SYSTEM_PROMPT: &str = "You are an expert prediction market analyst with access to comprehensive market data from multiple platforms including Polymarket, Kalshi, Prediction-Market, and Manifold.

Instructions:
- Provide accurate, data-driven responses based on the retrieved market data
- When discussing prices, always mention which platform(s) the data comes from
- Highlight arbitrage opportunities when price differences exist across platforms
- Explain confidence scores when relevant
- Be conversational and helpful
- If you don't have specific data to answer a question, say so clearly";

pub struct ChatSession {
    client: GeminiClient,
    kb: KnowledgeBase,
    retriever: Retriever,
    config: ChatConfig,
    /// (question, answer) pairs, oldest first
    history: Vec<(String, String)>,
}

impl ChatSession {
    pub fn new(client: GeminiClient, kb: KnowledgeBase, config: ChatConfig) -> Self {
        Self {
            client,
            retriever: Retriever::new(config.retrieval_k),
            kb,
            config,
            history: Vec::new(),
        }
    }

    /// Answer a question with retrieved context and conversation history.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        info!("Processing question: {}", question);

        let prompt = self.build_prompt(question);
        let answer = self.client.generate_text(&prompt).await?;

        self.history.push((question.to_string(), answer.clone()));
        if self.history.len() > self.config.history_limit {
            let overflow = self.history.len() - self.config.history_limit;
            self.history.drain(..overflow);
        }

        Ok(answer)
    }

    /// Quick overview of the collected markets.
    pub async fn market_summary(&mut self) -> Result<String> {
        self.ask(
            "Give me a summary of all available prediction markets, \
             including the number of platforms and categories covered.",
        )
        .await
    }

    /// Cross-platform price discrepancy scan.
    pub async fn arbitrage_opportunities(&mut self) -> Result<String> {
        self.ask(
            "What are the best arbitrage opportunities available? Show me \
             markets with significant price differences across platforms.",
        )
        .await
    }

    pub fn document_count(&self) -> usize {
        self.kb.len()
    }

    fn build_prompt(&self, question: &str) -> String {
        let context = self
            .retriever
            .retrieve(&self.kb, question)
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");

        let context = if context.is_empty() {
            "(no matching market data found)".to_string()
        } else {
            context
        };

        let history = self
            .history
            .iter()
            .map(|(q, a)| format!("User: {}\nAnalyst: {}", q, a))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{system}\n\nContext:\n{context}\n\nChat History:\n{history}\n\nQuestion: {question}\n\nAnswer:",
            system = SYSTEM_PROMPT,
            context = context,
            history = history,
            question = question,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Document;
    use std::collections::BTreeMap;

    fn session_with_doc() -> ChatSession {
        let mut metadata = BTreeMap::new();
        metadata.insert("product_name".to_string(), "Bitcoin above $100k".to_string());
        let kb = KnowledgeBase::from_documents(vec![Document {
            content: "Product: Bitcoin above $100k\nPolymarket Price: 0.35".to_string(),
            doc_type: "unified_market".to_string(),
            metadata,
        }]);

        ChatSession::new(
            GeminiClient::new("k".repeat(40)),
            kb,
            ChatConfig::default(),
        )
    }

    #[test]
    fn test_prompt_includes_context_and_question() {
        let session = session_with_doc();
        let prompt = session.build_prompt("What are the Bitcoin odds?");

        assert!(prompt.contains("expert prediction market analyst"));
        assert!(prompt.contains("Polymarket Price: 0.35"));
        assert!(prompt.contains("Question: What are the Bitcoin odds?"));
    }

    #[test]
    fn test_prompt_handles_no_matching_context() {
        let session = session_with_doc();
        let prompt = session.build_prompt("olympics gymnastics final");
        assert!(prompt.contains("(no matching market data found)"));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = session_with_doc();
        session.config.history_limit = 2;
        for i in 0..5 {
            session
                .history
                .push((format!("q{}", i), format!("a{}", i)));
        }
        // Simulate the trim ask() performs
        let overflow = session.history.len() - session.config.history_limit;
        session.history.drain(..overflow);

        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].0, "q3");
    }
}
