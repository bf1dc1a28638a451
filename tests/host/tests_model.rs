//! Lazy model rebuilds, dirty tracking and engine failures.

use std::cell::Cell;
use std::rc::Rc;

use project_host::config::{ParseOptions, Target};
use project_host::scan::UnresolvedImport;
use project_host::{
    AnalysisEngine, DeclarationScanner, HostCallbacks, HostError, HostOptions, ProjectConfig,
    ProjectHost, ResolvedPath, Result, ScanModel, ScannedUnit, UnitKind,
};

use crate::helpers::fixtures::*;
use crate::helpers::recording_listener::RecordingListener;

const MAIN: &str = "import { dep } from './dep';\n\
                    import React from 'react';\n\
                    import './missing';\n\
                    export const main = dep;\n";

#[test]
fn test_model_rebuild_is_lazy_and_idempotent() {
    let (mut host, listener) = host();
    host.create_source_unit("main.ts", "export const N = 42;")
        .unwrap();
    assert!(host.model().is_none());

    let model = host.load_model_if_needed().unwrap();
    assert_eq!(listener.rebuilds(), (1, 1));

    let again = host.load_model_if_needed().unwrap();
    assert!(Rc::ptr_eq(&model, &again));
    assert_eq!(listener.rebuilds(), (1, 1));
    assert!(Rc::ptr_eq(&model, &host.model().unwrap()));

    assert_eq!(
        listener.timeline(),
        vec![
            "loaded /main.ts",
            "created /main.ts",
            "model-will-change",
            "loaded /__libs__/lib.es2015.d.ts",
            "created /__libs__/lib.es2015.d.ts",
            "loaded /__libs__/lib.es5.d.ts",
            "created /__libs__/lib.es5.d.ts",
            "model-changed",
        ]
    );
}

#[test]
fn test_first_load_builds_even_when_clean() {
    let (mut host, listener) = host();
    assert!(!host.is_dirty());

    let model = host.load_model_if_needed().unwrap();

    assert_eq!(listener.rebuilds(), (1, 1));
    assert_eq!(
        model.unit_paths(),
        vec!["/__libs__/lib.es2015.d.ts", "/__libs__/lib.es5.d.ts"]
    );
}

#[test]
fn test_dependencies_pulled_in_by_rebuild_do_not_dirty_the_host() {
    let (mut host, listener) = host();
    host.set_content_at_path("dep.ts", "export const dep = 1;")
        .unwrap();
    host.create_source_unit("main.ts", MAIN).unwrap();
    assert!(host.is_dirty());

    let model = host.load_model_if_needed().unwrap();

    assert!(!host.is_dirty());
    assert_eq!(
        model.unit_paths(),
        vec![
            "/main.ts",
            "/dep.ts",
            "/__libs__/lib.es2015.d.ts",
            "/__libs__/lib.es5.d.ts",
        ]
    );
    assert_eq!(
        model.unresolved(),
        &[UnresolvedImport {
            from: ResolvedPath::from_absolute("/main.ts"),
            specifier: "./missing".to_string(),
        }]
    );
    assert_eq!(model.external_modules().collect::<Vec<_>>(), vec!["react"]);
    assert_eq!(model.reused_units(), 0);
    assert!(host.get_opened_unit("dep.ts").is_some());

    host.load_model_if_needed().unwrap();
    assert_eq!(listener.rebuilds(), (1, 1));
}

#[test]
fn test_edit_triggers_rebuild_reusing_unchanged_units() {
    let (mut host, listener) = host();
    host.set_content_at_path("dep.ts", "export const dep = 1;")
        .unwrap();
    host.create_source_unit("main.ts", MAIN).unwrap();
    let first = host.load_model_if_needed().unwrap();

    host.set_content_at_path("dep.ts", "export const dep = 2;\nexport const extra = 3;")
        .unwrap();
    assert!(host.is_dirty());
    assert_eq!(listener.invalidated(), vec!["/dep.ts"]);

    let second = host.load_model_if_needed().unwrap();

    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(listener.rebuilds(), (2, 2));
    assert_eq!(second.unit_count(), 4);
    assert_eq!(second.reused_units(), 3);
    let dep = second.unit(&host.resolve_path("dep.ts")).unwrap();
    assert_eq!(dep.statement_count(), 2);
    assert_eq!(second.declaration_count(), 9);
}

#[test]
fn test_opening_a_unit_after_a_build_dirties_the_host() {
    let (mut host, listener) = host();
    host.load_model_if_needed().unwrap();
    assert!(!host.is_dirty());

    host.create_source_unit("late.ts", "export {};").unwrap();
    assert!(host.is_dirty());

    let model = host.load_model_if_needed().unwrap();
    assert_eq!(listener.rebuilds(), (2, 2));
    assert!(model.unit(&host.resolve_path("late.ts")).is_some());
}

#[test]
fn test_index_and_exact_file_resolution() {
    let (mut host, _) = host();
    host.set_content_at_path("lib/index.ts", "export const fromIndex = 1;")
        .unwrap();
    host.set_content_at_path("data.json", "{ \"a\": 1 }")
        .unwrap();
    host.create_source_unit(
        "src/../main.ts",
        "import { fromIndex } from './lib';\nimport data from './data.json';",
    )
    .unwrap();

    let model = host.load_model_if_needed().unwrap();

    assert!(model.unresolved().is_empty());
    let data = model.unit(&host.resolve_path("data.json")).unwrap();
    assert_eq!(data.kind, UnitKind::Json);
    assert!(model.unit(&host.resolve_path("lib/index.ts")).is_some());
}

#[test]
fn test_default_baseline_when_no_lib_is_configured() {
    let config = ProjectConfig {
        target: Target::Es5,
        ..ProjectConfig::default()
    };
    let (mut host, _) = host_with(config);
    host.create_source_unit("main.ts", "export {};").unwrap();

    let model = host.load_model_if_needed().unwrap();

    assert_eq!(
        model.unit_paths(),
        vec!["/main.ts", "/__libs__/lib.d.ts", "/__libs__/lib.es5.d.ts"]
    );
}

#[test]
fn test_no_lib_skips_baseline() {
    let config = ProjectConfig {
        no_lib: true,
        ..default_config()
    };
    let (mut host, _) = host_with(config);
    host.create_source_unit("main.ts", "export {};").unwrap();

    let model = host.load_model_if_needed().unwrap();
    assert_eq!(model.unit_paths(), vec!["/main.ts"]);
}

#[test]
fn test_missing_baseline_is_recorded() {
    let config = ProjectConfig {
        lib: vec!["dom".into()],
        ..default_config()
    };
    let (mut host, _) = host_with(config);

    let model = host.load_model_if_needed().unwrap();

    assert_eq!(model.unit_count(), 0);
    assert_eq!(model.unresolved().len(), 1);
    assert_eq!(model.unresolved()[0].specifier, "/__libs__/lib.dom.d.ts");
}

/// Scanner whose model builder can be switched off.
#[derive(Default)]
struct FlakyEngine {
    inner: DeclarationScanner,
    fail: Cell<bool>,
}

impl AnalysisEngine for FlakyEngine {
    type Unit = ScannedUnit;
    type Model = ScanModel;

    fn parse_unit(
        &self,
        path: &ResolvedPath,
        text: &str,
        version: &str,
        kind: UnitKind,
        options: &ParseOptions,
    ) -> Result<ScannedUnit> {
        self.inner.parse_unit(path, text, version, kind, options)
    }

    fn build_model(
        &self,
        roots: &[ResolvedPath],
        config: &ProjectConfig,
        host: &mut dyn HostCallbacks<ScannedUnit>,
        previous: Option<&ScanModel>,
    ) -> Result<ScanModel> {
        if self.fail.get() {
            return Err(HostError::engine("model builder unavailable"));
        }
        self.inner.build_model(roots, config, host, previous)
    }
}

#[test]
fn test_failed_rebuild_keeps_previous_model_and_dirty_flag() {
    let listener = Rc::new(RecordingListener::default());
    let options = HostOptions {
        configuration: Some(Rc::new(default_config())),
        listener: Some(listener.clone()),
        baseline: baseline(),
        ..HostOptions::default()
    };
    let mut host = ProjectHost::with_options("/", FlakyEngine::default(), options).unwrap();
    host.create_source_unit("main.ts", "export const a = 1;")
        .unwrap();
    let first = host.load_model_if_needed().unwrap();

    host.set_content_at_path("main.ts", "export const a = 2;")
        .unwrap();
    host.engine().fail.set(true);

    let err = host.load_model_if_needed().unwrap_err();
    assert!(matches!(err, HostError::Engine(_)));
    assert_eq!(err.to_string(), "model builder unavailable");
    assert!(host.is_dirty());
    assert!(Rc::ptr_eq(&first, &host.model().unwrap()));
    assert_eq!(listener.rebuilds(), (2, 1));

    host.engine().fail.set(false);
    let second = host.load_model_if_needed().unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
    assert!(!host.is_dirty());
    assert_eq!(listener.rebuilds(), (3, 2));

    // The guard was released by the failed rebuild.
    host.create_source_unit("other.ts", "export {};").unwrap();
    assert!(host.is_dirty());
}

#[test]
fn test_destroy_releases_everything() {
    let (mut host, listener) = host();
    let injected = host.configuration().unwrap();
    host.create_source_unit("main.ts", "export {};").unwrap();
    host.load_model_if_needed().unwrap();

    host.destroy();

    assert!(host.model().is_none());
    assert!(host.get_opened_unit("main.ts").is_none());
    assert!(!host.file_exists("main.ts"));
    assert!(!host.directory_exists("/__libs__"));
    assert!(host.units().is_empty());
    assert!(!host.is_dirty());

    // The injected configuration is kept and never resolved from content.
    host.set_content_at_path("project.json", "{}").unwrap();
    assert!(Rc::ptr_eq(&host.configuration().unwrap(), &injected));
    assert_eq!(listener.configuration_resolved.get(), 0);
}

#[test]
fn test_destroy_drops_resolved_configuration() {
    let (mut host, listener) = host_without_config();
    host.set_content_at_path("project.json", "{}").unwrap();
    host.configuration().unwrap();

    host.destroy();

    assert!(host.configuration().unwrap_err().is_not_found());
    host.set_content_at_path("project.json", "{}").unwrap();
    host.configuration().unwrap();
    assert_eq!(listener.configuration_resolved.get(), 2);
}
