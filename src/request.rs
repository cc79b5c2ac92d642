use serde::Serialize;

/// The body POSTed to the task endpoint. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRequest {
    pub user_id: String,
    pub task: String,
    pub use_tools: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_exactly_three_fields() {
        let req = TaskRequest {
            user_id: "user123".to_string(),
            task: "calculate 3*7".to_string(),
            use_tools: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["user_id"], "user123");
        assert_eq!(obj["task"], "calculate 3*7");
        assert_eq!(obj["use_tools"], true);
    }

    #[test]
    fn serializes_false_flag() {
        let req = TaskRequest {
            user_id: "guest".to_string(),
            task: "hi".to_string(),
            use_tools: false,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"use_tools\":false"));
    }
}
