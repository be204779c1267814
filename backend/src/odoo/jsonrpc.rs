//! Odoo's `/jsonrpc` envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: JsonRpcParams,
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcParams {
    pub service: String,
    pub method: String,
    pub args: Vec<Value>,
}

impl JsonRpcRequest {
    pub fn call(service: &str, method: &str, args: Vec<Value>, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "call".to_string(),
            params: JsonRpcParams { service: service.to_string(), method: method.to_string(), args },
            id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<JsonRpcErrorData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorData {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("odoo error {code}: {message}")]
pub struct OdooRpcError {
    pub code: i64,
    pub message: String,
}

impl From<JsonRpcErrorBody> for OdooRpcError {
    fn from(body: JsonRpcErrorBody) -> Self {
        // Odoo puts the useful text (the Python exception) under data.message
        let message = body
            .data
            .map(|d| d.message)
            .filter(|m| !m.is_empty())
            .or(Some(body.message).filter(|m| !m.is_empty()))
            .unwrap_or("Odoo API error".to_string());
        Self { code: body.code, message }
    }
}

impl JsonRpcResponse {
    /// The `result` member, or the server's error. A missing result reads as `null`.
    pub fn into_result(self) -> Result<Value, OdooRpcError> {
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_matches_odoo_envelope() {
        let request = JsonRpcRequest::call("common", "login", vec![json!("db"), json!("u"), json!("p")], 1);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "method": "call", "params": {"service": "common", "method": "login", "args": ["db", "u", "p"]}, "id": 1})
        );
    }

    #[test]
    fn error_prefers_data_message() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "error": {"code": 200, "message": "Odoo Server Error", "data": {"message": "Access Denied"}}
        }))
        .unwrap();
        assert_eq!(response.into_result().unwrap_err(), OdooRpcError { code: 200, message: "Access Denied".to_string() });

        let response: JsonRpcResponse = serde_json::from_value(json!({"error": {"code": 1, "message": ""}})).unwrap();
        assert_eq!(response.into_result().unwrap_err().message, "Odoo API error");
    }

    #[test]
    fn false_result_is_kept() {
        let response: JsonRpcResponse = serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": false})).unwrap();
        assert_eq!(response.into_result().unwrap(), json!(false));
    }
}
