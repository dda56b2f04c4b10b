//! The MODES section: every available mode with a one-line summary.

use std::path::Path;

use futures::future::join_all;

use crate::host::ExtensionContext;
use crate::modes::{ModeCatalog, ModeConfig};
use crate::prompt::builder::section;
use crate::prompt::mode_info::{ModeInfo, ModeInfoOptions, load_mode_info};

/// List the catalog's modes, custom ones first.
///
/// Each summary is the mode's resolved "when to use" guidance, else its
/// description, else the first line of its role definition. Lookups for
/// all modes run concurrently.
pub async fn modes_section(ctx: &ExtensionContext, cwd: &Path, catalog: &ModeCatalog) -> String {
    let modes = catalog.all_modes();
    let infos = join_all(modes.iter().map(|mode| {
        let options = ModeInfoOptions {
            cwd: Some(cwd),
            custom_modes: Some(catalog.custom_modes()),
            builtin_mode: catalog.builtin_mode(&mode.slug),
        };
        load_mode_info(ctx, &mode.slug, options)
    }))
    .await;

    let entries = modes
        .iter()
        .zip(infos)
        .map(|(mode, info)| {
            format!(
                "  * \"{}\" mode ({}) - {}",
                mode.name,
                mode.slug,
                summary(mode, &info)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    section(
        "MODES",
        &format!(
            "- These are the currently available modes:\n{entries}\n\n\
             - Use the switch_mode tool to move to a mode that fits the task better, or new_task to hand \
             a self-contained piece of work to another mode."
        ),
    )
}

fn summary(mode: &ModeConfig, info: &ModeInfo) -> String {
    if let Some(when_to_use) = non_blank(&info.when_to_use) {
        return when_to_use.replace('\n', "\n    ");
    }
    if let Some(description) = non_blank(&info.description) {
        return description.replace('\n', "\n    ");
    }
    let role = non_blank(&info.role_definition).unwrap_or(mode.role_definition.trim());
    role.lines().next().unwrap_or_default().to_string()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::modes::{GroupEntry, ModeOrigin, ToolGroup};
    use std::fs;

    fn custom(slug: &str, when_to_use: Option<&str>) -> ModeConfig {
        ModeConfig {
            slug: slug.into(),
            name: format!("Custom {slug}"),
            role_definition: "You are custom.\nSecond line.".into(),
            when_to_use: when_to_use.map(Into::into),
            description: None,
            custom_instructions: None,
            groups: vec![GroupEntry::Plain(ToolGroup::Read)],
            origin: ModeOrigin::Custom,
        }
    }

    fn context(root: &Path) -> ExtensionContext {
        ExtensionContext::new(
            root.join("pkg"),
            EngineConfig::default().with_global_config_dir(None),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn custom_modes_come_first_and_shadow_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ModeCatalog::with_custom_modes(vec![
            custom("qa", Some("Use for\ntesting.")),
            custom("pm", None),
        ]);

        let text = modes_section(&context(dir.path()), dir.path(), &catalog).await;
        let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("  * ")).collect();
        assert_eq!(lines[0], "  * \"Custom qa\" mode (qa) - Use for");
        assert!(text.contains("  * \"Custom qa\" mode (qa) - Use for\n    testing."));
        assert_eq!(lines[1], "  * \"Custom pm\" mode (pm) - You are custom.");
        assert_eq!(lines.len(), 1 + 7);
        assert!(lines[2].contains("(code)"));
    }

    #[tokio::test]
    async fn project_rules_feed_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join(".roo/rules-architect");
        fs::create_dir_all(&rules).unwrap();
        fs::write(rules.join("a.md"), "When to use: for diagrams").unwrap();

        let text = modes_section(&context(dir.path()), dir.path(), &ModeCatalog::builtin()).await;
        assert!(text.contains("(architect) - for diagrams"));
        assert!(text.starts_with("====\n\nMODES\n\n- These are the currently available modes:"));
    }
}
