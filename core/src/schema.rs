//! Function declarations that constrain the model's output shape.

use serde_json::json;

use crate::types::{FunctionDeclaration, Tool};

pub const ANALYZE_FUNCTION_NAME: &str = "analyze_meeting_notes";
pub const SUMMARIZE_FUNCTION_NAME: &str = "summarize_and_extract_tasks";

/// System instruction for the analyze flow
pub const SECRETARY_INSTRUCTION: &str = "You are a professional secretary. Analyze the provided meeting notes or images of notes/whiteboards and extract structured information. Be precise and action-oriented.";

/// System instruction for the summarize flow
pub const SUMMARIZER_INSTRUCTION: &str = "You summarize text and break it down into concrete tasks. Reply in the language of the input.";

/// Declaration whose parameters mirror `MeetingAnalysis`
pub fn analyze_function() -> FunctionDeclaration {
    FunctionDeclaration {
        name: ANALYZE_FUNCTION_NAME.to_string(),
        description: Some(
            "Extract summary, key points, and action items from meeting notes or transcriptions."
                .to_string(),
        ),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "A short descriptive title for the meeting."
                },
                "summary": {
                    "type": "STRING",
                    "description": "A 2-3 sentence overview of what was discussed."
                },
                "keyPoints": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of the most important discussion points."
                },
                "actionItems": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "task": { "type": "STRING", "description": "Clear description of the task." },
                            "assignee": { "type": "STRING", "description": "The person responsible (if mentioned)." },
                            "dueDate": { "type": "STRING", "description": "Deadline for the task (if mentioned)." },
                            "priority": {
                                "type": "STRING",
                                "enum": ["High", "Medium", "Low"],
                                "description": "Urgency of the task."
                            }
                        },
                        "required": ["task", "priority"]
                    },
                    "description": "List of concrete actions to be taken after the meeting."
                }
            },
            "required": ["title", "summary", "keyPoints", "actionItems"]
        }),
    }
}

/// Declaration whose parameters mirror `TaskResult`
pub fn summarize_function() -> FunctionDeclaration {
    FunctionDeclaration {
        name: SUMMARIZE_FUNCTION_NAME.to_string(),
        description: Some("Summarize the text and list the tasks it implies.".to_string()),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "summary": { "type": "STRING", "description": "A concise summary of the text." },
                "tasks": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Concrete tasks derived from the text."
                }
            },
            "required": ["summary", "tasks"]
        }),
    }
}

/// Wrap a single declaration in the tool list Gemini expects
pub fn single_function_tool(declaration: FunctionDeclaration) -> Vec<Tool> {
    vec![Tool {
        function_declarations: vec![declaration],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn analyze_schema_requires_all_top_level_fields() {
        let params = analyze_function().parameters;
        assert_eq!(
            params["required"],
            json!(["title", "summary", "keyPoints", "actionItems"])
        );
    }

    #[test]
    fn action_item_priority_is_an_enum() {
        let params = analyze_function().parameters;
        let item = &params["properties"]["actionItems"]["items"];
        assert_eq!(item["required"], json!(["task", "priority"]));
        assert_eq!(
            item["properties"]["priority"]["enum"],
            json!(["High", "Medium", "Low"])
        );
        assert!(item["properties"]["assignee"].is_object());
        assert!(item["properties"]["dueDate"].is_object());
    }

    #[test]
    fn tool_serializes_with_declarations() {
        let tools = single_function_tool(summarize_function());
        let value = serde_json::to_value(&tools).unwrap();
        assert_eq!(
            value[0]["function_declarations"][0]["name"],
            Value::from(SUMMARIZE_FUNCTION_NAME)
        );
    }
}
