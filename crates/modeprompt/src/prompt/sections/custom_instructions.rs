//! The USER'S CUSTOM INSTRUCTIONS section.
//!
//! Gathers, in order: the language preference, global instructions, the
//! mode's own instructions, and rules. Rules are the mode's rule files, then
//! the generic rule files, then the host's ignore instructions. Rule files
//! are read from `rules-<mode>/` and `rules/` in the project and global
//! config dirs; a project-root `.roorules-<mode>` or `.roorules` file is the
//! legacy fallback when no directory supplies anything.

use std::path::Path;

use tracing::debug;

use crate::error::PromptError;
use crate::host::ExtensionContext;
use crate::prompt::builder::{SystemPromptBuilder, section};
use crate::prompt::language::language_name;

const INTRO: &str = "The following additional instructions are provided by the user, and should be \
                     followed to the best of your ability without interfering with the TOOL USE guidelines.";

#[derive(Debug, Clone, Copy, Default)]
pub struct CustomInstructionsOptions<'a> {
    /// Normalised language code, e.g. `pt-BR`.
    pub language: Option<&'a str>,
    /// Host summary of files the assistant must not access.
    pub ignore_instructions: Option<&'a str>,
}

/// Render the section, or an empty string when nothing contributes.
pub async fn custom_instructions_section(
    ctx: &ExtensionContext,
    cwd: &Path,
    mode: &str,
    mode_instructions: &str,
    global_instructions: &str,
    options: CustomInstructionsOptions<'_>,
) -> Result<String, PromptError> {
    let language = options.language.filter(|l| !l.trim().is_empty()).map(|code| {
        format!(
            "Language Preference:\nYou should always speak and think in the \"{}\" ({code}) language \
             unless the user gives you instructions below to do otherwise.",
            language_name(code)
        )
    });
    let global = non_blank(global_instructions).map(|g| format!("Global Instructions:\n{g}"));
    let mode_specific =
        non_blank(mode_instructions).map(|m| format!("Mode-specific Instructions:\n{m}"));

    let mode_rules = load_rules(ctx, cwd, &format!("rules-{mode}"), &format!(".roorules-{mode}")).await?;
    let generic_rules = load_rules(ctx, cwd, "rules", ".roorules").await?;
    let rules: Vec<String> = [
        mode_rules,
        generic_rules,
        options.ignore_instructions.and_then(non_blank).map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .collect();
    let rules = (!rules.is_empty()).then(|| format!("Rules:\n\n{}", rules.join("\n\n")));

    if language.is_none() && global.is_none() && mode_specific.is_none() && rules.is_none() {
        return Ok(String::new());
    }

    let body = SystemPromptBuilder::new(INTRO)
        .raw_opt(language)
        .raw_opt(global)
        .raw_opt(mode_specific)
        .raw_opt(rules)
        .build();
    Ok(section("USER'S CUSTOM INSTRUCTIONS", &body))
}

/// Rule files from `dir_name` in every config dir, else the legacy file in
/// the project root. `None` when neither has content.
async fn load_rules(
    ctx: &ExtensionContext,
    cwd: &Path,
    dir_name: &str,
    legacy_file: &str,
) -> Result<Option<String>, PromptError> {
    let mut rendered = Vec::new();
    for config_dir in ctx.config_dirs_for(cwd) {
        let dir = config_dir.join(dir_name);
        for (name, content) in ctx.text_documents(&dir).await? {
            rendered.push(format!("# Rules from {}:\n{content}", dir.join(name).display()));
        }
    }
    if !rendered.is_empty() {
        debug!("Loaded {} rule file(s) from {dir_name}/", rendered.len());
        return Ok(Some(rendered.join("\n\n")));
    }

    Ok(ctx
        .read_trimmed(&cwd.join(legacy_file))
        .await?
        .map(|content| format!("# Rules from {legacy_file}:\n{content}")))
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        _tmp: tempfile::TempDir,
        project: PathBuf,
        global: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let project = tmp.path().join("project");
            let global = tmp.path().join("home/.roo");
            fs::create_dir_all(&project).unwrap();
            Self {
                _tmp: tmp,
                project,
                global,
            }
        }

        fn write(&self, path: PathBuf, content: &str) {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn context(&self) -> ExtensionContext {
            ExtensionContext::new(
                self.project.join("pkg"),
                EngineConfig::default().with_global_config_dir(Some(self.global.clone())),
            )
            .unwrap()
        }
    }

    #[tokio::test]
    async fn nothing_contributes_means_empty() {
        let fx = Fixture::new();
        let text = custom_instructions_section(
            &fx.context(),
            &fx.project,
            "code",
            "  ",
            "",
            CustomInstructionsOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn parts_appear_in_order() {
        let fx = Fixture::new();
        fx.write(fx.project.join(".roo/rules-code/a.md"), "Mode rule.");
        fx.write(fx.global.join("rules/g.txt"), "Generic rule.");

        let text = custom_instructions_section(
            &fx.context(),
            &fx.project,
            "code",
            "Write user stories.",
            "Be concise.",
            CustomInstructionsOptions {
                language: Some("ru"),
                ignore_instructions: Some("Do not read secrets/."),
            },
        )
        .await
        .unwrap();

        assert!(text.starts_with("====\n\nUSER'S CUSTOM INSTRUCTIONS\n\nThe following additional"));
        let positions: Vec<usize> = [
            "Language Preference:\nYou should always speak and think in the \"Русский\" (ru) language",
            "Global Instructions:\nBe concise.",
            "Mode-specific Instructions:\nWrite user stories.",
            "Rules:\n\n# Rules from ",
            "rules-code/a.md:\nMode rule.",
            "rules/g.txt:\nGeneric rule.",
            "Do not read secrets/.",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle:?}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[tokio::test]
    async fn project_rules_precede_global_rules() {
        let fx = Fixture::new();
        fx.write(fx.project.join(".roo/rules-pm/p.md"), "Project.");
        fx.write(fx.global.join("rules-pm/g.md"), "Global.");

        let text = custom_instructions_section(
            &fx.context(),
            &fx.project,
            "pm",
            "",
            "",
            CustomInstructionsOptions::default(),
        )
        .await
        .unwrap();
        assert!(text.find("Project.").unwrap() < text.find("Global.").unwrap());
    }

    #[tokio::test]
    async fn legacy_files_are_the_fallback() {
        let fx = Fixture::new();
        fx.write(fx.project.join(".roorules-debug"), "Legacy mode rule.");
        fx.write(fx.project.join(".roorules"), "Legacy generic rule.");

        let text = custom_instructions_section(
            &fx.context(),
            &fx.project,
            "debug",
            "",
            "",
            CustomInstructionsOptions::default(),
        )
        .await
        .unwrap();
        assert!(text.contains("# Rules from .roorules-debug:\nLegacy mode rule."));
        assert!(text.contains("# Rules from .roorules:\nLegacy generic rule."));
    }

    #[tokio::test]
    async fn legacy_file_ignored_when_directory_has_rules() {
        let fx = Fixture::new();
        fx.write(fx.project.join(".roo/rules/a.md"), "Directory rule.");
        fx.write(fx.project.join(".roorules"), "Legacy rule.");

        let text = custom_instructions_section(
            &fx.context(),
            &fx.project,
            "code",
            "",
            "",
            CustomInstructionsOptions::default(),
        )
        .await
        .unwrap();
        assert!(text.contains("Directory rule."));
        assert!(!text.contains("Legacy rule."));
    }
}
