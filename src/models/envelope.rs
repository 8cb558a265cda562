use serde::{Deserialize, Serialize};

/// The `{ "data": ... }` wrapper used for every request and response body.
///
/// Collections arrive as `Envelope<Vec<T>>`, singletons as `Envelope<T>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_envelope() {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2],"meta":{}}"#).unwrap();
        assert_eq!(envelope.into_inner(), vec![1, 2]);
    }

    #[test]
    fn test_serialize_wraps_in_data() {
        let json = serde_json::to_value(Envelope::new("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "data": "x" }));
    }
}
