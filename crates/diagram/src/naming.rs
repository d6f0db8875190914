use crate::config::NamingConfig;
use std::collections::BTreeMap;

/// Rewrites a project id into the label shown in the diagram
#[derive(Debug, Clone, Default)]
pub struct NameTransformer {
    strip_prefix: Option<String>,
    aliases: BTreeMap<String, String>,
}

impl NameTransformer {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            strip_prefix: config.strip_prefix.clone().filter(|p| !p.is_empty()),
            aliases: config.aliases.clone(),
        }
    }

    /// Strip the configured prefix (case-sensitive), then apply the alias of
    /// the stripped name if there is one.
    pub fn transform(&self, raw_name: &str) -> String {
        let name = match &self.strip_prefix {
            Some(prefix) => raw_name.strip_prefix(prefix.as_str()).unwrap_or(raw_name),
            None => raw_name,
        };

        self.aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}
