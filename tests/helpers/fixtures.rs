//! Hosts and configurations shared by the integration tests.

use std::rc::Rc;

use project_host::config::{ModuleKind, Target};
use project_host::{
    BaselineLibrary, DeclarationScanner, HostOptions, ProjectConfig, ProjectHost,
};

use super::recording_listener::RecordingListener;

pub type ScanHost = ProjectHost<DeclarationScanner>;

pub fn default_config() -> ProjectConfig {
    ProjectConfig {
        target: Target::EsNext,
        module: ModuleKind::NodeNext,
        lib: vec!["lib.es2015.d.ts".to_string()],
        ..ProjectConfig::default()
    }
}

/// Baseline units: `lib.es2015.d.ts` pulls in `lib.es5.d.ts`.
pub fn baseline() -> BaselineLibrary {
    let mut library = BaselineLibrary::new();
    library
        .add_text("lib.d.ts", "/// <reference lib=\"es5\" />\n")
        .add_text(
            "lib.es5.d.ts",
            "declare var NaN: number;\ninterface Array<T> { length: number }\n",
        )
        .add_text(
            "lib.es2015.d.ts",
            "/// <reference lib=\"es5\" />\ninterface PromiseLike<T> {}\n",
        );
    library
}

/// Host rooted at `/` with `config` injected and a recording listener.
pub fn host_with(config: ProjectConfig) -> (ScanHost, Rc<RecordingListener>) {
    let listener = Rc::new(RecordingListener::default());
    let options = HostOptions {
        configuration: Some(Rc::new(config)),
        listener: Some(listener.clone()),
        baseline: baseline(),
        ..HostOptions::default()
    };
    let host = ProjectHost::with_options("/", DeclarationScanner::new(), options).unwrap();
    (host, listener)
}

pub fn host() -> (ScanHost, Rc<RecordingListener>) {
    host_with(default_config())
}

/// Host that resolves its configuration from the config file.
pub fn host_without_config() -> (ScanHost, Rc<RecordingListener>) {
    let listener = Rc::new(RecordingListener::default());
    let options = HostOptions {
        listener: Some(listener.clone()),
        baseline: baseline(),
        ..HostOptions::default()
    };
    let host = ProjectHost::with_options("/", DeclarationScanner::new(), options).unwrap();
    (host, listener)
}
