//! Prompt templates for answer synthesis and completeness review.

/// Prompt asking the model for a structured answer over the retrieved
/// context.
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are an AI assistant that answers questions based on the provided context documents.
Analyze the context and provide a comprehensive answer to the user's question.

Context Documents:
{context}

Question: {question}

Please provide your response in the following JSON format:
{{
    "answer": "Your detailed answer based on the context",
    "confidence": 0.85,
    "missing_info": [
        {{
            "type": "document|data|context|specific_fact",
            "description": "What specific information is missing",
            "suggested_action": "What action should be taken to get this information",
            "priority": 3
        }}
    ],
    "enrichment_suggestions": [
        {{
            "type": "document_type",
            "description": "What kind of document would help",
            "action": "Specific action to take",
            "confidence": 0.8,
            "estimated_effort": "low|medium|high"
        }}
    ]
}}

Guidelines:
1. If the context contains sufficient information, provide a confident answer (confidence > 0.7)
2. If information is partially available, provide what you can and flag missing parts (confidence 0.4-0.7)
3. If very little relevant information is available, be honest about limitations (confidence < 0.4)
4. For missing_info, be specific about what's missing and why it's important
5. For enrichment_suggestions, provide actionable recommendations
6. Always base your answer primarily on the provided context
"#
    )
}

/// Prompt asking the model to score the completeness of an answer.
pub fn completeness_prompt(answer: &str, question: &str, context: &str) -> String {
    format!(
        r#"Analyze the completeness of this answer in relation to the question and available context.

Question: {question}
Answer: {answer}
Available Context: {context}

Rate the completeness and identify specific gaps. Respond in JSON format:
{{
    "completeness_score": 0.85,
    "missing_aspects": [
        "Specific aspect that's missing",
        "Another missing aspect"
    ],
    "confidence_issues": [
        "Areas where the answer is uncertain"
    ],
    "suggested_improvements": [
        "How to improve the answer"
    ]
}}
"#
    )
}
