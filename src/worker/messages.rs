// Control messages accepted by the worker
// Author: kelexine (https://github.com/kelexine)

use crate::worker::lifecycle::WorkerState;
use serde::{Deserialize, Serialize};

/// A control message posted to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ControlMessage {
    /// Force a waiting worker generation to activate immediately.
    SkipWaiting,
}

/// Acknowledgement returned after a control message is handled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAck {
    pub state: WorkerState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_waiting_wire_format() {
        let msg: ControlMessage = serde_json::from_str(r#"{"action":"skipWaiting"}"#).unwrap();
        assert_eq!(msg, ControlMessage::SkipWaiting);

        let json = serde_json::to_string(&ControlMessage::SkipWaiting).unwrap();
        assert_eq!(json, r#"{"action":"skipWaiting"}"#);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let parsed: Result<ControlMessage, _> = serde_json::from_str(r#"{"action":"reload"}"#);
        assert!(parsed.is_err());
    }
}
