//! Test fixtures and common test data.

/// A single-device status document covering every sensor category.
///
/// The "SMOKE" external sensor reports "N/A", so mapping this document
/// yields exactly one defect.
pub const SAMPLE_SNAPSHOT_JSON: &str = r#"{
  "data": {
    "all": [
      {
        "device": { "model": "E-16D", "uptime": "12 days 04:31", "firmware": "4.2" },
        "network": { "addr": "10.0.0.5" },
        "isens": [
          { "desc": "TEMP1", "val": "22.3 C", "status": 1 },
          { "desc": "HUMIDITY1", "val": "45 %", "status": 1 }
        ],
        "esens": [
          { "desc": "EXT TEMP", "val": "19.5 C", "status": 1 },
          { "desc": "SMOKE", "val": "N/A", "status": 0 }
        ],
        "diginp": [
          { "desc": "Door", "val": "Open", "status": 3 },
          { "desc": "Window", "val": "Closed", "status": 1 }
        ],
        "power": [
          { "idx": 1, "desc": "PSU1", "val": "On", "status": 1 },
          { "idx": 2, "desc": "PSU2", "val": "Off", "status": 6 }
        ]
      }
    ]
  }
}"#;

/// Successful login response body.
pub fn login_body(cookie: &str) -> String {
    format!(r#"{{"cookie":"{}"}}"#, cookie)
}
