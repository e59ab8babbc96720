use serde_json::{Map, Value, json};

/// Loosely typed pipeline configuration keyed by dotted paths (`extract.windowBefore`).
///
/// Typed views are built on top of it (see `ExtractOptions::from_config`), so a config file only
/// needs to spell out the keys it overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig(Value);

impl Default for PipelineConfig {
    fn default() -> Self {
        Self(json!({
            "extract": {
                "windowBefore": 5000,
                "windowAfter": 3000,
                "strategy": "window"
            },
            "render": {
                "themeSource": "name"
            }
        }))
    }
}

impl PipelineConfig {
    /// Parses a JSON object and merges it over the defaults.
    ///
    /// Nested objects merge key by key; any other value replaces the default outright.
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        let Value::Object(overrides) = serde_json::from_str::<Value>(text)? else {
            return Err(crate::Error::InvalidConfig {
                key: "<root>".to_string(),
                message: "expected a JSON object".to_string(),
            });
        };
        let mut cfg = Self::default();
        if let Value::Object(base) = &mut cfg.0 {
            merge_into(base, overrides);
        }
        Ok(cfg)
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        dotted_path
            .split('.')
            .try_fold(&self.0, |cur, segment| cur.as_object()?.get(segment))
    }

    /// Reads a non-negative integer, reporting a present-but-wrong value as an error.
    pub fn usize_or(&self, dotted_path: &str, default: usize) -> crate::Result<usize> {
        match self.get(dotted_path) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| crate::Error::InvalidConfig {
                    key: dotted_path.to_string(),
                    message: format!("expected a non-negative integer, got {v}"),
                }),
        }
    }

    pub fn str_or<'a>(&'a self, dotted_path: &str, default: &'a str) -> crate::Result<&'a str> {
        match self.get(dotted_path) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v.as_str().ok_or_else(|| crate::Error::InvalidConfig {
                key: dotted_path.to_string(),
                message: format!("expected a string, got {v}"),
            }),
        }
    }
}

fn merge_into(base: &mut Map<String, Value>, overrides: Map<String, Value>) {
    for (key, value) in overrides {
        let value = match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_into(existing, nested);
                continue;
            }
            (_, value) => value,
        };
        base.insert(key, value);
    }
}
