use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub type_: String,
    pub properties: Value,
    pub required: Vec<String>,
}

impl ToolInputSchema {
    pub fn new(type_: &str, properties: Value, required: Vec<String>) -> Self {
        Self {
            type_: type_.to_string(),
            properties,
            required,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMeta {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

impl ToolMeta {
    pub fn new(name: &str, title: &str, description: &str, input_schema: ToolInputSchema) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Ordered tool listing returned from `tools/list`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ToolsMeta(pub Vec<ToolMeta>);

impl ToolsMeta {
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolMeta> {
        self.0.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_mcp_field_names() {
        let schema = ToolInputSchema::new(
            "object",
            json!({ "url": { "type": "string" } }),
            vec!["url".to_string()],
        );
        let meta = ToolMeta::new("crawl", "Crawl", "Extract content from URL", schema);
        let v = serde_json::to_value(&meta).unwrap();
        assert_eq!(v["inputSchema"]["type"], "object");
        assert_eq!(v["inputSchema"]["required"], json!(["url"]));
        assert!(v.get("input_schema").is_none());
    }

    #[test]
    fn tools_meta_is_a_plain_array() {
        let tools = ToolsMeta(vec![]);
        assert_eq!(serde_json::to_string(&tools).unwrap(), "[]");
    }
}
