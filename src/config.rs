use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    /// Length of the per-crawl debug id used to correlate log lines.
    #[serde(default = "default_debug_id_len")]
    pub debug_id_len: usize,

    /// Log every forwarded request/response pair with its running count.
    #[serde(default = "default_log_traffic")]
    pub log_traffic: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            debug_id_len: default_debug_id_len(),
            log_traffic: default_log_traffic(),
        }
    }
}

fn default_debug_id_len() -> usize {
    8
}

fn default_log_traffic() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let conf: CrawlerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(8, conf.debug_id_len);
        assert!(!conf.log_traffic);
    }

    #[test]
    fn partial_document_overrides_one_field() {
        let conf: CrawlerConfig = serde_json::from_str(r#"{"debugIdLen": 12}"#).unwrap();
        assert_eq!(12, conf.debug_id_len);
        assert!(!conf.log_traffic);
    }
}
