use crate::aggregate::{aggregate, extract_rule_ids};
use crate::model::instance::Instance;
use crate::model::rule::Rule;
use crate::parser::parse_str;
use serde::Serialize;

/// A parsed MOF document: its instances and the rule catalog built from them
///
/// `rules` is sorted ascending by `rule_id` (ordinal) and ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document {
    pub instances: Vec<Instance>,
    pub rules: Vec<Rule>,
}

impl Document {
    /// Build the rule catalog for already-parsed instances
    pub fn from_instances(instances: Vec<Instance>) -> Self {
        let rules = aggregate(&instances);
        Self { instances, rules }
    }

    /// Parse and aggregate in-memory MOF text
    pub fn parse(text: &str) -> Self {
        Self::from_instances(parse_str(text))
    }

    /// Look up a rule by exact id
    pub fn rule(&self, rule_id: &str) -> Option<&Rule> {
        self.rules
            .binary_search_by(|r| r.rule_id.as_str().cmp(rule_id))
            .ok()
            .map(|idx| &self.rules[idx])
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.rule_id.as_str())
    }

    /// Instances whose `ResourceID` yields `rule_id`, in document order
    pub fn contributing_instances(&self, rule_id: &str) -> Vec<&Instance> {
        self.instances
            .iter()
            .filter(|inst| {
                inst.resource_id()
                    .map(|rid| extract_rule_ids(rid).iter().any(|id| id == rule_id))
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RULES: &str = r#"
instance of MSFT_RegistryResource as $MSFT_RegistryResource1ref
{
    ResourceID = "[Registry][V-200]::[WindowsServer]";
    Ensure = "Present";
};
instance of MSFT_RegistryResource as $MSFT_RegistryResource2ref
{
    ResourceID = "[Registry][V-100]::[WindowsServer]";
    Ensure = "Absent";
};
"#;

    #[test]
    fn test_rules_sorted_and_lookup() {
        let doc = Document::parse(TWO_RULES);
        let ids: Vec<&str> = doc.rule_ids().collect();
        assert_eq!(ids, vec!["V-100", "V-200"]);
        assert_eq!(
            doc.rule("V-200").and_then(|r| r.details.get("Ensure")),
            Some("Present")
        );
        assert!(doc.rule("V-300").is_none());
    }

    #[test]
    fn test_contributing_instances() {
        let doc = Document::parse(TWO_RULES);
        let insts = doc.contributing_instances("V-100");
        assert_eq!(insts.len(), 1);
        assert_eq!(
            insts[0].instance_name.as_deref(),
            Some("MSFT_RegistryResource2ref")
        );
        assert!(doc.contributing_instances("V-999").is_empty());
    }
}
