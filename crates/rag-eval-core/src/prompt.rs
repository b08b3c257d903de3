//! Prompt construction

/// Build a prompt with the question and context
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Based on the following information from Star Wars scripts, please answer this question:

Question: {question}

Information:
{context}

Please provide a concise and detailed answer based only on the information provided above.
"
    )
}
