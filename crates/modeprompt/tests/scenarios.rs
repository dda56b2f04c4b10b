//! End-to-end resolution and assembly against a real directory tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use modeprompt::prelude::*;
use modeprompt::prompt::system_prompt_file_path;

struct Workspace {
    _tmp: tempfile::TempDir,
    project: PathBuf,
    package: PathBuf,
    global: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project");
        let package = tmp.path().join("package");
        let global = tmp.path().join("home/.roo");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(package.join("dist/prompts")).unwrap();
        Self {
            _tmp: tmp,
            project,
            package,
            global,
        }
    }

    fn write(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn asset(&self, relative: &str) -> PathBuf {
        self.package.join("dist/prompts").join(relative)
    }

    fn context(&self) -> ExtensionContext {
        ExtensionContext::new(
            &self.package,
            EngineConfig::default().with_global_config_dir(Some(self.global.clone())),
        )
        .unwrap()
    }

    fn request(&self, mode: &str) -> SystemPromptRequest {
        SystemPromptRequest::new(&self.project, mode)
            .with_shell("/bin/bash")
            .with_operating_system("linux")
            .with_home_dir("/home/tester")
    }
}

fn connected_hub() -> Arc<StaticMcpHub> {
    Arc::new(StaticMcpHub::new(vec![McpServer {
        name: "tracker".into(),
        status: McpServerStatus::Connected,
        disabled: false,
        instructions: None,
        tools: vec![McpTool {
            name: "create_issue".into(),
            description: Some("Create an issue".into()),
            input_schema: None,
        }],
        resources: vec![],
    }]))
}

// ── Mode info ───────────────────────────────────────────────────────

#[tokio::test]
async fn packaged_prompt_file_yields_mode_info() {
    let ws = Workspace::new();
    ws.write(
        ws.asset("ba.txt"),
        "You are a senior analyst.\n\nDescription: writes specs.",
    );

    let info = load_mode_info(&ws.context(), "code", ModeInfoOptions::default()).await;
    assert_eq!(info.role_definition.as_deref(), Some("You are a senior analyst."));
    assert_eq!(info.description.as_deref(), Some("writes specs."));
    assert!(info.when_to_use.is_none());
}

#[tokio::test]
async fn project_description_and_packaged_usage_combine() {
    let ws = Workspace::new();
    ws.write(
        ws.project.join(".roo/rules-architect/about.md"),
        "Description: project architect",
    );
    ws.write(
        ws.asset("rules-architect/rules.md"),
        "Description: packaged architect\n\nWhen to use: before coding",
    );
    let options = ModeInfoOptions {
        cwd: Some(&ws.project),
        ..Default::default()
    };

    let info = load_mode_info(&ws.context(), "architect", options).await;
    assert_eq!(info.description.as_deref(), Some("project architect"));
    assert_eq!(info.when_to_use.as_deref(), Some("before coding"));
}

// ── Override resolution ─────────────────────────────────────────────

#[tokio::test]
async fn project_override_is_interpolated() {
    let ws = Workspace::new();
    let ctx = ws.context();
    ws.write(
        system_prompt_file_path(&ctx, &ws.project, "architect"),
        "Role: {{mode}} in {{workspace}}",
    );
    let variables = PromptVariables {
        mode: Some("architect".into()),
        workspace: Some("/proj".into()),
        ..Default::default()
    };

    let body = load_system_prompt_file(&ctx, &ws.project, "architect", &variables)
        .await
        .unwrap();
    assert_eq!(body, "Role: architect in /proj");
}

#[tokio::test]
async fn override_prompt_skips_generated_sections() {
    let ws = Workspace::new();
    ws.write(
        ws.project.join(".roo/system-prompt-architect"),
        "Work in {{workspace}} on {{operatingSystem}}.",
    );
    let request = ws
        .request("architect")
        .with_global_custom_instructions("Keep answers short.");

    let prompt = system_prompt(Some(&ws.context()), &request).await.unwrap();
    let role = &builtin_modes()[1].role_definition;
    assert_eq!(
        prompt.split("\n\n").next(),
        role.split("\n\n").next(),
        "override prompt starts with the role definition"
    );
    assert!(prompt.contains(&format!("Work in {} on linux.", ws.project.display())));
    assert!(prompt.contains("Global Instructions:\nKeep answers short."));
    assert!(!prompt.contains("====\n\nTOOL USE"));
    assert!(!prompt.contains("====\n\nCAPABILITIES"));
}

// ── Full assembly ───────────────────────────────────────────────────

#[tokio::test]
async fn disabled_diff_editing_omits_apply_diff() {
    let ws = Workspace::new();
    let request = ws
        .request("code")
        .with_diff_strategy(Arc::new(MultiSearchReplaceDiffStrategy))
        .with_diff_enabled(false);

    let prompt = system_prompt(Some(&ws.context()), &request).await.unwrap();
    assert!(prompt.contains("## write_to_file"));
    assert!(!prompt.contains("apply_diff"));

    let enabled = request.with_diff_enabled(true);
    let prompt = system_prompt(Some(&ws.context()), &enabled).await.unwrap();
    assert!(prompt.contains("## apply_diff"));
}

#[tokio::test]
async fn mcp_section_needs_group_and_connected_server() {
    let ws = Workspace::new();
    let ctx = ws.context();

    let offline = Arc::new(StaticMcpHub::new(vec![McpServer {
        status: McpServerStatus::Disconnected,
        ..connected_hub().servers[0].clone()
    }]));
    let prompt = system_prompt(Some(&ctx), &ws.request("code").with_mcp_hub(offline))
        .await
        .unwrap();
    assert!(!prompt.contains("MCP SERVERS"));
    assert!(!prompt.contains("use_mcp_tool"));

    let prompt = system_prompt(Some(&ctx), &ws.request("code").with_mcp_hub(connected_hub()))
        .await
        .unwrap();
    assert!(prompt.contains("====\n\nMCP SERVERS"));
    assert!(prompt.contains("- create_issue: Create an issue"));
    assert!(prompt.contains("## use_mcp_tool"));

    // A mode without the mcp group never gets the section.
    let catalog = ModeCatalog::with_custom_modes(vec![ModeConfig {
        slug: "reader".into(),
        name: "Reader".into(),
        role_definition: "You are a reader.".into(),
        when_to_use: None,
        description: None,
        custom_instructions: None,
        groups: vec![GroupEntry::Plain(ToolGroup::Read)],
        origin: ModeOrigin::Custom,
    }]);
    let request = ws
        .request("reader")
        .with_catalog(catalog)
        .with_mcp_hub(connected_hub());
    let prompt = system_prompt(Some(&ctx), &request).await.unwrap();
    assert!(prompt.starts_with("You are a reader.\n\n"));
    assert!(!prompt.contains("MCP SERVERS"));
}

#[tokio::test]
async fn sections_appear_in_fixed_order() {
    let ws = Workspace::new();
    // The first candidate doubles as the packaged override, so use the second.
    ws.write(ws.asset("PM/pm.txt"), "  Track milestones weekly.  ");
    ws.write(ws.project.join(".roo/rules/general.md"), "Use British spelling.");
    let request = ws
        .request("pm")
        .with_locale("en-gb")
        .with_mcp_hub(connected_hub());

    let prompt = system_prompt(Some(&ws.context()), &request).await.unwrap();
    let markers = [
        "You are Roo, a project manager",
        "MARKDOWN RULES",
        "====\n\nTOOL USE",
        "# Tools\n\n",
        "# Tool Use Guidelines",
        "MCP SERVERS",
        "CAPABILITIES",
        "====\n\nMODES",
        "====\n\nRULES",
        "SYSTEM INFORMATION",
        "OBJECTIVE",
        "USER'S CUSTOM INSTRUCTIONS",
        "(en-GB) language",
        "Mode-specific Instructions:\nTrack milestones weekly.",
        "Use British spelling.",
    ];
    let positions: Vec<usize> = markers
        .iter()
        .map(|m| prompt.find(m).unwrap_or_else(|| panic!("missing {m:?}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[tokio::test]
async fn empty_mcp_slot_keeps_blank_line() {
    let ws = Workspace::new();
    let prompt = system_prompt(Some(&ws.context()), &ws.request("helper"))
        .await
        .unwrap();
    assert!(prompt.contains(
        "6. ALWAYS wait for user confirmation after each tool use before proceeding.\n\n\n\n====\n\nCAPABILITIES"
    ));
}

#[tokio::test]
async fn unknown_mode_assembles_default_mode() {
    let ws = Workspace::new();
    let prompt = system_prompt(Some(&ws.context()), &ws.request("nonexistent"))
        .await
        .unwrap();
    assert!(prompt.starts_with(&builtin_modes()[0].role_definition));
}

#[tokio::test]
async fn unknown_mode_override_keeps_default_role() {
    let ws = Workspace::new();
    ws.write(
        ws.project.join(".roo/system-prompt-translator"),
        "Translate everything.",
    );

    let prompt = system_prompt(Some(&ws.context()), &ws.request("translator"))
        .await
        .unwrap();
    let role = &builtin_modes()[0].role_definition;
    assert!(prompt.starts_with(&format!("{role}\n\nTranslate everything.")));
    assert!(!prompt.contains("====\n\nTOOL USE"));
}

#[tokio::test]
async fn missing_context_is_an_error() {
    let ws = Workspace::new();
    let err = system_prompt(None, &ws.request("code")).await.unwrap_err();
    assert!(matches!(err, PromptError::MissingContext));
}

#[tokio::test]
async fn repeated_generation_is_byte_identical() {
    let ws = Workspace::new();
    for (i, name) in ["c.md", "a.md", "b.txt"].iter().enumerate() {
        ws.write(ws.project.join(".roo/rules-code").join(name), &format!("Rule {i}."));
    }
    ws.write(ws.global.join("rules/shared.md"), "Shared rule.");
    ws.write(ws.asset("rules-designer/about.md"), "When to use: screens");
    let request = ws
        .request("code")
        .with_locale("ru")
        .with_mcp_hub(connected_hub())
        .with_computer_use(true);
    let ctx = ws.context();

    let first = system_prompt(Some(&ctx), &request).await.unwrap();
    let second = system_prompt(Some(&ctx), &request).await.unwrap();
    assert_eq!(first, second);
    assert!(first.find("Rule 1.").unwrap() < first.find("Rule 2.").unwrap());
    assert!(first.find("Rule 2.").unwrap() < first.find("Rule 0.").unwrap());
    assert!(first.contains("(designer) - screens"));
}

#[tokio::test]
async fn exported_rules_feed_mode_info() {
    let ws = Workspace::new();
    ws.write(ws.asset("rules-helper/about.md"), "Description: answers questions");
    let ctx = ws.context();

    let exported = export_builtin_rules(&ctx, &ws.project).await.unwrap();
    assert_eq!(exported, vec!["rules-helper"]);

    fs::remove_dir_all(ws.package.join("dist")).unwrap();
    let options = ModeInfoOptions {
        cwd: Some(&ws.project),
        ..Default::default()
    };
    let info = load_mode_info(&ctx, "helper", options).await;
    assert_eq!(info.description.as_deref(), Some("answers questions"));
}
