//! Configuration resolution: memoization, injection and retry.

use std::rc::Rc;

use project_host::config::{ModuleKind, ModuleResolution, ParsedConfig, Target};
use project_host::{
    ConfigError, ConfigParser, DeclarationScanner, HostError, HostOptions, ProjectConfig,
    ProjectHost, ResolvedPath,
};
use rstest::rstest;

use crate::helpers::fixtures::*;
use crate::helpers::recording_listener::RecordingListener;

const PROJECT_JSON: &str = r#"
  {
    // comments and trailing commas are accepted
    "compilerOptions": {
      "target": "es6",
      "module": "commonjs",
      "lib": ["es6"],
      "strict": true,
      "moduleResolution": "node",
    }
  }
"#;

#[test]
fn test_resolves_configuration_from_file() {
    let (mut host, listener) = host_without_config();
    host.set_content_at_path("project.json", PROJECT_JSON)
        .unwrap();

    let config = host.configuration().unwrap();

    assert_eq!(listener.configuration_resolved.get(), 1);
    assert_eq!(config.target, Target::Es2015);
    assert_eq!(config.module, ModuleKind::CommonJs);
    assert_eq!(config.lib, vec!["lib.es2015.d.ts"]);
    assert!(config.strict);
    assert_eq!(config.module_resolution, Some(ModuleResolution::Node10));

    let again = host.configuration().unwrap();
    assert!(Rc::ptr_eq(&config, &again));
    assert_eq!(listener.configuration_resolved.get(), 1);
    assert_eq!(listener.loaded(), vec!["/project.json"]);
}

#[test]
fn test_injected_configuration_is_never_resolved() {
    let injected = Rc::new(ProjectConfig {
        target: Target::EsNext,
        module: ModuleKind::NodeNext,
        lib: vec!["lib.es2015.d.ts".into()],
        ..ProjectConfig::default()
    });
    let listener = Rc::new(RecordingListener::default());
    let options = HostOptions {
        configuration: Some(injected.clone()),
        listener: Some(listener.clone()),
        ..HostOptions::default()
    };
    let mut host = ProjectHost::with_options("/", DeclarationScanner::new(), options).unwrap();
    host.set_content_at_path("project.json", PROJECT_JSON)
        .unwrap();

    let config = host.configuration().unwrap();

    assert!(Rc::ptr_eq(&config, &injected));
    assert_eq!(listener.configuration_resolved.get(), 0);
    assert!(listener.loaded().is_empty());
}

#[test]
fn test_missing_configuration_is_retried() {
    let (mut host, listener) = host_without_config();

    let err = host.configuration().unwrap_err();
    assert!(matches!(err, HostError::NotFound { ref path } if path == "/project.json"));
    assert_eq!(listener.configuration_resolved.get(), 0);

    host.set_content_at_path("project.json", r#"{ "compilerOptions": {} }"#)
        .unwrap();
    let config = host.configuration().unwrap();

    assert_eq!(*config, ProjectConfig::default());
    assert_eq!(listener.configuration_resolved.get(), 1);
}

#[test]
fn test_syntax_error_is_wrapped_and_retried() {
    let (mut host, listener) = host_without_config();
    host.set_content_at_path("project.json", "{ \"compilerOptions\": { \"target\": }")
        .unwrap();

    let err = host.configuration().unwrap_err();
    match &err {
        HostError::ConfigParse { path, source } => {
            assert_eq!(path, "/project.json");
            assert_eq!(source.line, 1);
        }
        other => panic!("expected a config parse error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("failed to parse configuration '/project.json'"));

    // Nothing was cached: the next access reads the file again.
    host.set_content_at_path("project.json", PROJECT_JSON)
        .unwrap();
    let config = host.configuration().unwrap();
    assert_eq!(config.target, Target::Es2015);
    assert_eq!(listener.configuration_resolved.get(), 1);
    assert_eq!(listener.loaded(), vec!["/project.json", "/project.json"]);
}

#[rstest]
#[case(r#"{ "compilerOptions": { "fancy": true } }"#)]
#[case(r#"{ "compilerOptions": { "target": "es1999" } }"#)]
#[case(r#"{ "compilerOptions": { "strict": "yes" } }"#)]
fn test_validation_problems_are_discarded(#[case] text: &str) {
    let (mut host, listener) = host_without_config();
    host.set_content_at_path("project.json", text).unwrap();

    let config = host.configuration().unwrap();

    assert_eq!(config.target, Target::Es5);
    assert!(!config.strict);
    assert_eq!(listener.configuration_resolved.get(), 1);
}

struct FixedTargetParser;

impl ConfigParser for FixedTargetParser {
    fn parse(&self, path: &ResolvedPath, text: &str) -> Result<ParsedConfig, ConfigError> {
        if text.trim().is_empty() {
            return Err(ConfigError::new(format!("{path} is empty"), 1, 1));
        }
        Ok(ParsedConfig {
            config: ProjectConfig {
                target: Target::Es2020,
                no_lib: text.contains("nolib"),
                ..ProjectConfig::default()
            },
            diagnostics: Vec::new(),
        })
    }
}

#[test]
fn test_custom_config_file_and_parser() {
    let options = HostOptions {
        config_file: "settings/host.cfg".to_string(),
        config_parser: Some(Box::new(FixedTargetParser)),
        ..HostOptions::default()
    };
    let mut host = ProjectHost::with_options("/work", DeclarationScanner::new(), options).unwrap();

    host.set_content_at_path("settings/host.cfg", "").unwrap();
    assert!(matches!(
        host.configuration(),
        Err(HostError::ConfigParse { ref path, .. }) if path == "/work/settings/host.cfg"
    ));

    host.set_content_at_path("/work/settings/host.cfg", "nolib")
        .unwrap();
    let config = host.configuration().unwrap();
    assert_eq!(config.target, Target::Es2020);
    assert!(config.no_lib);
}

#[test]
fn test_open_declared_type_units() {
    let config = ProjectConfig {
        types: vec!["Long".into(), "Missing".into()],
        type_roots: vec!["types".into()],
        ..default_config()
    };
    let (mut host, listener) = host_with(config);
    host.set_content_at_path("types/Long.d.ts", "declare class Long {}")
        .unwrap();

    let opened = host.open_declared_type_units().unwrap();

    let opened: Vec<_> = opened.iter().map(|p| p.absolute_path()).collect();
    assert_eq!(opened, vec!["/types/Long.d.ts"]);
    assert!(host.get_opened_unit("types/Long.d.ts").is_some());
    assert_eq!(listener.created(), vec!["/types/Long.d.ts"]);
}

#[test]
fn test_declared_types_default_to_the_root() {
    let config = ProjectConfig {
        types: vec!["globals".into()],
        ..default_config()
    };
    let (mut host, _) = host_with(config);
    host.set_content_at_path("globals.d.ts", "declare const VERSION: string;")
        .unwrap();

    let opened = host.open_declared_type_units().unwrap();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].absolute_path(), "/globals.d.ts");
}
