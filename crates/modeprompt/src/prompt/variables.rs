//! `{{name}}` placeholder substitution for override prompts.

use serde::{Deserialize, Serialize};

/// Values available to override prompt files for one request.
///
/// Only these five names are substituted. A placeholder for any other name,
/// or for a name whose value is `None`, is left in the text as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptVariables {
    pub workspace: Option<String>,
    pub mode: Option<String>,
    pub language: Option<String>,
    pub shell: Option<String>,
    pub operating_system: Option<String>,
}

impl PromptVariables {
    /// Declared keys paired with their values, in declaration order.
    fn entries(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("workspace", self.workspace.as_deref()),
            ("mode", self.mode.as_deref()),
            ("language", self.language.as_deref()),
            ("shell", self.shell.as_deref()),
            ("operatingSystem", self.operating_system.as_deref()),
        ]
    }

    /// Replace every `{{key}}` whose key has a value.
    ///
    /// Case-sensitive. Each key is substituted across the original text in a
    /// single pass, so substituted values are never rescanned for their own
    /// placeholders.
    pub fn interpolate(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            let (before, candidate) = rest.split_at(start);
            out.push_str(before);
            match self.match_placeholder(candidate) {
                Some((value, consumed)) => {
                    out.push_str(value);
                    rest = candidate.get(consumed..).unwrap_or_default();
                }
                None => {
                    out.push_str("{{");
                    rest = candidate.get(2..).unwrap_or_default();
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// If `text` opens with `{{key}}` for a key with a value, that value and
    /// the placeholder length.
    fn match_placeholder(&self, text: &str) -> Option<(&str, usize)> {
        let inner = text.strip_prefix("{{")?;
        self.entries().into_iter().find_map(|(key, value)| {
            let value = value?;
            inner
                .strip_prefix(key)
                .and_then(|after| after.strip_prefix("}}"))
                .map(|_| (value, key.len() + 4))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> PromptVariables {
        PromptVariables {
            workspace: Some("/proj".into()),
            mode: Some("architect".into()),
            ..Default::default()
        }
    }

    #[test]
    fn substitutes_declared_keys() {
        assert_eq!(
            vars().interpolate("Role: {{mode}} in {{workspace}}"),
            "Role: architect in /proj"
        );
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(vars().interpolate("{{mode}}/{{mode}}"), "architect/architect");
    }

    #[test]
    fn unknown_and_unset_placeholders_stay_literal() {
        let text = "{{shell}} {{unknown}} {{Mode}} {{ mode }}";
        assert_eq!(vars().interpolate(text), text);
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let vars = PromptVariables {
            workspace: Some("{{mode}}".into()),
            mode: Some("code".into()),
            ..Default::default()
        };
        assert_eq!(vars.interpolate("{{workspace}}"), "{{mode}}");
    }

    #[test]
    fn operating_system_uses_camel_case_key() {
        let vars = PromptVariables {
            operating_system: Some("Linux".into()),
            ..Default::default()
        };
        assert_eq!(vars.interpolate("os={{operatingSystem}}"), "os=Linux");
    }

    #[test]
    fn unterminated_braces_pass_through() {
        assert_eq!(vars().interpolate("{{mode"), "{{mode");
        assert_eq!(vars().interpolate("a {{ b {{mode}}"), "a {{ b architect");
    }

    #[test]
    fn interpolation_is_idempotent_without_new_placeholders() {
        let once = vars().interpolate("Work in {{workspace}} as {{mode}}; keep {{other}}.");
        assert_eq!(vars().interpolate(&once), once);
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        assert_eq!(
            vars().interpolate("Режим: {{mode}}, готово"),
            "Режим: architect, готово"
        );
    }
}
