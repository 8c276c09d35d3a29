pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn record_json_shape() {
        let r = types::Record {
            number: "1".into(),
            name: "Alice".into(),
            age: 30,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"number": "1", "name": "Alice", "age": 30})
        );
    }
}
